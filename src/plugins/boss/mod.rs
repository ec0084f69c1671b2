//! Boss actor: the Dragon Lord.
//!
//! Bosses are owned by their room and advanced by the room stage; there is no
//! boss plugin. The AI is a distance-driven state machine:
//!
//! ```text
//! Dead                          -> nothing (terminal)
//! Hurt                          -> hold until the scheduled clear fires
//! Attack, elapsed < settle      -> hold (swing in progress)
//! d <= range, cooldown elapsed  -> Attack, emit BossCue::Strike
//! d <= range                    -> Idle
//! d >  range                    -> Chase toward the player
//! ```
//!
//! `d` is the horizontal distance between the boss and the player. The strike
//! itself is not resolved here: the cue is turned into a delayed strike check
//! that re-tests the swing box when it fires.

use bevy::prelude::*;

use crate::common::{
    actor::{Facing, Vitals},
    collision::Hitbox,
    tunables::Tunables,
    units::Countdown,
};
use crate::plugins::combat::Combatant;

pub const FRAME_SIZE: f32 = 74.0;
pub const SCALE: f32 = 3.0;
pub const STRIKE_REACH: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossState {
    Idle,
    Chase,
    /// `elapsed` counts up to the settle window.
    Attack { elapsed: f32 },
    Hurt,
    Dead,
}

impl BossState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Chase => "walk",
            Self::Attack { .. } => "attack",
            Self::Hurt => "hurt",
            Self::Dead => "death",
        }
    }
}

/// Decisions the room has to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossCue {
    Strike,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub name: &'static str,
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub vitals: Vitals,
    pub state: BossState,
    pub attack_cooldown: Countdown,
}

impl Boss {
    pub fn dragon_lord(position: Vec2, tunables: &Tunables) -> Self {
        Self {
            name: "Dragon Lord",
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Left,
            vitals: Vitals::full(tunables.boss_max_health),
            state: BossState::Idle,
            attack_cooldown: Countdown::ZERO,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::splat(FRAME_SIZE * SCALE)
    }

    /// Advance one tick against the player's current x.
    pub fn update(
        &mut self,
        player_x: f32,
        room_width: f32,
        tunables: &Tunables,
        dt: f32,
    ) -> Option<BossCue> {
        if self.state == BossState::Dead {
            return None;
        }

        self.vitals.invulnerability.tick_down(dt);
        self.attack_cooldown.tick_down(dt);

        let cue = self.decide(player_x, tunables, dt);

        let max_x = (room_width - self.size().x).max(0.0);
        self.position.x = (self.position.x + self.velocity.x * dt).clamp(0.0, max_x);
        cue
    }

    fn decide(&mut self, player_x: f32, tunables: &Tunables, dt: f32) -> Option<BossCue> {
        match &mut self.state {
            BossState::Hurt => {
                self.velocity.x = 0.0;
                return None;
            }
            BossState::Attack { elapsed } => {
                *elapsed += dt;
                if *elapsed < tunables.boss_settle_time {
                    return None;
                }
            }
            _ => {}
        }

        let distance = (self.position.x - player_x).abs();
        if distance <= tunables.boss_attack_range {
            self.velocity.x = 0.0;
            if self.attack_cooldown.is_elapsed() {
                self.facing = Facing::toward(self.position.x, player_x);
                self.attack_cooldown.restart(tunables.boss_attack_cooldown);
                self.state = BossState::Attack { elapsed: 0.0 };
                return Some(BossCue::Strike);
            }
            self.state = BossState::Idle;
            return None;
        }

        self.facing = Facing::toward(self.position.x, player_x);
        self.velocity.x = tunables.boss_speed * self.facing.sign();
        self.state = BossState::Chase;
        None
    }

    /// Called by the scheduled hurt expiry.
    pub fn recover(&mut self) {
        if self.state == BossState::Hurt {
            self.state = BossState::Idle;
        }
    }
}

impl Combatant for Boss {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn hitbox(&self) -> Hitbox {
        Hitbox::at(self.position, self.size())
    }

    fn attack_hitbox(&self) -> Option<Hitbox> {
        let BossState::Attack { .. } = self.state else {
            return None;
        };
        let body = self.hitbox();
        let x = match self.facing {
            Facing::Right => body.x + body.width,
            Facing::Left => body.x - STRIKE_REACH,
        };
        Some(Hitbox::new(x, body.y, STRIKE_REACH, body.height))
    }

    fn is_dead(&self) -> bool {
        self.state == BossState::Dead
    }

    fn invulnerability_window(&self, tunables: &Tunables) -> f32 {
        tunables.boss_invulnerability
    }

    /// A swing in progress is not interrupted.
    fn enter_hurt(&mut self) {
        if matches!(self.state, BossState::Attack { .. }) {
            return;
        }
        self.state = BossState::Hurt;
        self.velocity.x = 0.0;
    }

    fn enter_dead(&mut self) {
        self.state = BossState::Dead;
        self.velocity = Vec2::ZERO;
    }
}
