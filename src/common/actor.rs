//! Capabilities shared by every actor (player and bosses).

use super::units::Countdown;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing that looks from `from_x` toward `to_x`. Ties keep looking right.
    #[inline]
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x < from_x { Self::Left } else { Self::Right }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Health plus the invulnerability window.
///
/// Invariant: `health <= max_health`. Every write goes through saturating
/// arithmetic or a `min(max_health)` clamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vitals {
    health: u32,
    max_health: u32,
    pub invulnerability: Countdown,
}

impl Vitals {
    pub fn full(max_health: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            invulnerability: Countdown::ZERO,
        }
    }

    #[inline]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability.is_running()
    }

    /// Remove up to `amount` health. Returns what was actually removed.
    pub fn lose(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        before - self.health
    }

    /// Restore up to `amount` health. Returns what was actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Overwrite health, clamped into `[0, max_health]`.
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }
}
