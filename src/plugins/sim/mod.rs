//! Simulation plugin: the per-frame clock and the stage order.
//!
//! ```text
//! Update:
//!   gather_input, restart_on_request
//!   SimSet::Clock   advance clock, fire due scheduled effects
//!   SimSet::Actors  player state machine
//!   SimSet::Rooms   collectibles, bosses, doors, potion use
//!   SimSet::Combat  player swing vs. bosses of the current room
//!   SimSet::Camera  viewport offset
//!   flush_ui_events (always runs, also after the outcome)
//! ```
//!
//! The chain only runs in `GameState::InGame` while no outcome is decided.
//! Every stage is a plain `step_*` function over [`SimulationContext`]; the
//! systems here are thin wrappers so the whole tick can be driven without an
//! `App` through [`tick`].

pub mod context;
pub mod draw;

use bevy::prelude::*;

pub use context::{Outcome, Score, SimulationContext};

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::camera::step_camera;
use crate::plugins::combat::{effects, step_combat};
use crate::plugins::player::{Intent, step_player};
use crate::plugins::rooms::step_room;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Clock,
    Actors,
    Rooms,
    Combat,
    Camera,
}

pub fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (
            SimSet::Clock,
            SimSet::Actors,
            SimSet::Rooms,
            SimSet::Combat,
            SimSet::Camera,
        )
            .chain()
            .run_if(in_state(GameState::InGame))
            .run_if(simulation_running),
    )
    .add_systems(Update, advance_clock.in_set(SimSet::Clock));
}

/// Run condition: a context exists and no outcome has been decided.
pub fn simulation_running(ctx: Option<Res<SimulationContext>>) -> bool {
    ctx.is_some_and(|ctx| !ctx.is_over())
}

fn advance_clock(time: Res<Time>, tunables: Res<Tunables>, mut ctx: ResMut<SimulationContext>) {
    step_clock(&mut ctx, &tunables, time.delta_secs());
}

/// Clock stage: advance, then fire whatever became due.
pub fn step_clock(ctx: &mut SimulationContext, tunables: &Tunables, dt: f32) {
    ctx.clock += f64::from(dt);
    effects::run_due(ctx, tunables);
}

/// One whole tick in stage order. Does nothing once an outcome is decided.
///
/// Outcomes are only decided by announcements, which fire in the clock stage.
pub fn tick(ctx: &mut SimulationContext, intent: &Intent, tunables: &Tunables, dt: f32) {
    if ctx.is_over() {
        return;
    }
    step_clock(ctx, tunables, dt);
    if ctx.is_over() {
        return;
    }
    step_player(ctx, intent, tunables, dt);
    step_room(ctx, intent, tunables, dt);
    step_combat(ctx, tunables);
    step_camera(ctx, tunables);
}
