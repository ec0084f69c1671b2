//! Player plugin.
//!
//! Pipeline:
//! - Update (before the simulation sets): sample keys, write the `Intent` resource
//! - `SimSet::Actors`: run the player state machine against the current room
//!
//! The state machine is a single transition function over [`PlayerState`],
//! evaluated once per tick in priority order:
//!
//! ```text
//! health == 0            -> Dead (terminal)
//! Attack (cooldown > 0)  -> stay, input ignored
//! Hurt                   -> stay until the scheduled clear fires
//! defend held            -> Defend, no horizontal motion
//! attack asserted, ready -> Attack { next combo variant }
//! moving                 -> Move
//! not grounded           -> Jump (display only)
//! otherwise              -> Idle
//! ```

use bevy::prelude::*;

use crate::common::{
    actor::{Facing, Vitals},
    collision::Hitbox,
    tunables::Tunables,
    units::Countdown,
};
use crate::plugins::combat::Combatant;
use crate::plugins::sim::{SimSet, SimulationContext};

/// Sprite frame edge before scaling.
pub const FRAME_SIZE: f32 = 64.0;
pub const SCALE: f32 = 2.0;
/// Width of the swing area in front of the player.
pub const SWING_REACH: f32 = 80.0;
/// Number of attack variants the combo cycles through.
pub const COMBO_LEN: u8 = 3;

/// Per-tick intent vector. Everything defaults to `false`.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub move_left: bool,
    pub move_right: bool,
    pub attack: bool,
    pub defend: bool,
    pub run: bool,
    pub interact: bool,
    pub restart: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerState {
    Idle,
    Move { running: bool },
    /// Shown until the first ground snap. No jump physics exist.
    Jump,
    /// `elapsed` is the attack animation cursor, reset on entry.
    Attack { combo: u8, elapsed: f32 },
    Defend,
    Hurt,
    Dead,
}

impl PlayerState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Move { running: false } => "WALK",
            Self::Move { running: true } => "RUN",
            Self::Jump => "JUMP",
            Self::Attack { combo: 0, .. } => "ATTACK1",
            Self::Attack { combo: 1, .. } => "ATTACK2",
            Self::Attack { .. } => "ATTACK3",
            Self::Defend => "DEFEND",
            Self::Hurt => "HURT",
            Self::Dead => "DEATH",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub vitals: Vitals,
    pub state: PlayerState,
    pub attack_cooldown: Countdown,
    next_combo: u8,
    grounded: bool,
}

impl Player {
    pub fn spawn(x: f32, tunables: &Tunables) -> Self {
        Self {
            position: Vec2::new(x, tunables.ground_y),
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            vitals: Vitals::full(tunables.player_max_health),
            state: PlayerState::Idle,
            attack_cooldown: Countdown::ZERO,
            next_combo: 0,
            grounded: false,
        }
    }

    /// Advance one tick: timers, transition, then motion clamped to the room.
    pub fn update(&mut self, intent: &Intent, room_width: f32, tunables: &Tunables, dt: f32) {
        self.vitals.invulnerability.tick_down(dt);
        self.attack_cooldown.tick_down(dt);
        if let PlayerState::Attack { elapsed, .. } = &mut self.state {
            *elapsed += dt;
        }

        self.state = self.next_state(intent, tunables);

        let min_x = tunables.room_margin_left;
        let max_x = (room_width - tunables.room_margin_right).max(min_x);
        self.position.x = (self.position.x + self.velocity.x * dt).clamp(min_x, max_x);
        self.position.y = tunables.ground_y;
        self.grounded = true;
    }

    fn next_state(&mut self, intent: &Intent, tunables: &Tunables) -> PlayerState {
        if self.vitals.is_depleted() {
            self.velocity = Vec2::ZERO;
            return PlayerState::Dead;
        }

        match self.state {
            PlayerState::Dead => return PlayerState::Dead,
            PlayerState::Attack { .. } if self.attack_cooldown.is_running() => return self.state,
            PlayerState::Hurt => {
                self.velocity.x = 0.0;
                return PlayerState::Hurt;
            }
            _ => {}
        }

        self.velocity.x = 0.0;

        if intent.defend {
            return PlayerState::Defend;
        }

        let speed = if intent.run { tunables.player_run_speed } else { tunables.player_speed };
        if intent.move_left {
            self.velocity.x = -speed;
            self.facing = Facing::Left;
        }
        if intent.move_right {
            self.velocity.x = speed;
            self.facing = Facing::Right;
        }

        if intent.attack && self.attack_cooldown.is_elapsed() {
            let combo = self.next_combo;
            self.next_combo = (combo + 1) % COMBO_LEN;
            self.attack_cooldown.restart(tunables.player_attack_cooldown);
            return PlayerState::Attack { combo, elapsed: 0.0 };
        }

        if self.velocity.x != 0.0 {
            PlayerState::Move { running: intent.run }
        } else if !self.grounded {
            PlayerState::Jump
        } else {
            PlayerState::Idle
        }
    }

    /// Called by the scheduled hurt expiry. Only a hurt player recovers.
    pub fn recover(&mut self) {
        if self.state == PlayerState::Hurt {
            self.state = PlayerState::Idle;
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::splat(FRAME_SIZE * SCALE)
    }
}

impl Combatant for Player {
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
        let PlayerState::Attack { .. } = self.state else {
            return None;
        };
        let body = self.hitbox();
        let x = match self.facing {
            Facing::Right => body.x + body.width,
            Facing::Left => body.x - SWING_REACH,
        };
        Some(Hitbox::new(x, body.y, SWING_REACH, body.height))
    }

    fn is_defending(&self) -> bool {
        self.state == PlayerState::Defend
    }

    fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    fn invulnerability_window(&self, tunables: &Tunables) -> f32 {
        tunables.player_invulnerability
    }

    fn enter_hurt(&mut self) {
        self.state = PlayerState::Hurt;
        self.velocity.x = 0.0;
    }

    fn enter_dead(&mut self) {
        self.state = PlayerState::Dead;
        self.velocity = Vec2::ZERO;
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(Intent::default())
        .add_systems(Update, gather_input.before(SimSet::Clock))
        .add_systems(Update, update_player.in_set(SimSet::Actors));
}

/// Sample the keyboard into `Intent`.
///
/// Headless apps have no `ButtonInput`; the intent is then left as written by
/// whoever drives the app.
pub fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut intent: ResMut<Intent>) {
    let Some(keys) = keys else {
        return;
    };

    *intent = Intent {
        move_left: keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        move_right: keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
        attack: keys.pressed(KeyCode::Space),
        defend: keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
        run: keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        interact: keys.just_pressed(KeyCode::KeyE),
        restart: keys.just_pressed(KeyCode::KeyR),
    };
}

fn update_player(
    time: Res<Time>,
    tunables: Res<Tunables>,
    intent: Res<Intent>,
    mut ctx: ResMut<SimulationContext>,
) {
    step_player(&mut ctx, &intent, &tunables, time.delta_secs());
}

/// Player stage of the tick.
pub fn step_player(ctx: &mut SimulationContext, intent: &Intent, tunables: &Tunables, dt: f32) {
    let Some(room_width) = ctx.rooms.get(ctx.current_room).map(|room| room.width) else {
        return;
    };
    ctx.player.update(intent, room_width, tunables, dt);
}

#[cfg(test)]
mod tests;
