//! Unit newtypes used by the simulation.

/// Seconds left on a countdown (cooldowns, invulnerability windows).
///
/// Clamped on write, so it is never negative and reads as "elapsed" once it
/// reaches zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Countdown(f32);

impl Countdown {
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub fn new(secs: f32) -> Self {
        Self(secs.max(0.0))
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn restart(&mut self, secs: f32) {
        self.0 = secs.max(0.0);
    }

    #[inline]
    pub fn tick_down(&mut self, dt: f32) {
        self.0 = (self.0 - dt).max(0.0);
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self.0 > 0.0
    }

    #[inline]
    pub fn is_elapsed(self) -> bool {
        !self.is_running()
    }
}
