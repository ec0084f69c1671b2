//! Camera plugin.
//!
//! Two halves with different hosts:
//! - [`plugin`] (gameplay, headless-safe): `SimSet::Camera` recomputes the
//!   viewport offset after combat, so it always sees the settled tick.
//! - [`render_plugin`] (full app): spawns the `MainCamera` and parks it on
//!   that offset.
//!
//! Room space is y-down with a top-left origin; Bevy world space is y-up and
//! sprites are centred, hence [`room_to_world`]:
//!
//! ```text
//! world = ( room.x + w / 2,  -(room.y + h / 2) )
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::sim::{SimSet, SimulationContext};

#[derive(Component)]
pub struct MainCamera;

/// Viewport top-left for a player at `player`, clamped so the view never
/// leaves a room of size `room`. Rooms narrower than the viewport pin to 0.
///
/// Only x follows the player; the vertical offset is always 0, which every
/// room height (at least the viewport's) admits.
pub fn viewport_offset(player: Vec2, room: Vec2, viewport: Vec2) -> Vec2 {
    let max_x = (room.x - viewport.x).max(0.0);
    Vec2::new((player.x - viewport.x / 2.0).clamp(0.0, max_x), 0.0)
}

/// Centre, in world space, of a room-space box at `top_left` of `size`.
#[inline]
pub fn room_to_world(top_left: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(top_left.x + size.x / 2.0, -(top_left.y + size.y / 2.0))
}

pub fn plugin(app: &mut App) {
    app.add_systems(Update, update_offset.in_set(SimSet::Camera));
}

fn update_offset(tunables: Res<Tunables>, mut ctx: ResMut<SimulationContext>) {
    step_camera(&mut ctx, &tunables);
}

/// Camera stage of the tick.
pub fn step_camera(ctx: &mut SimulationContext, tunables: &Tunables) {
    let Some(room) = ctx.room() else {
        return;
    };
    let bounds = Vec2::new(room.width, room.height);
    ctx.camera = viewport_offset(ctx.player.position, bounds, tunables.viewport);
}

// -----------------------------------------------------------------------------
// Render
// -----------------------------------------------------------------------------

pub fn render_plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera).add_systems(
        PostUpdate,
        follow_offset
            .before(TransformSystems::Propagate)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_offset(
    tunables: Res<Tunables>,
    ctx: Res<SimulationContext>,
    mut q_cam: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut tf) = q_cam.single_mut() else {
        return;
    };
    let centre = room_to_world(ctx.camera, tunables.viewport);
    tf.translation.x = centre.x;
    tf.translation.y = centre.y;
}
