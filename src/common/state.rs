//! App-level state.
//!
//! There is a single playable state; a finished run stays in `InGame` and is
//! restarted by rebuilding the `SimulationContext`, not by a state change.
//! Render entities are scoped to it with `DespawnOnExit`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
