//! Render plugin (render-only): coloured sprites mirroring the simulation.
//!
//! The simulation is never written from here. Each frame:
//!
//! ```text
//! PostUpdate:
//!   rebuild_scenery  (epoch, room) changed -> despawn Scenery, spawn backdrop + torches
//!   sync_avatars     SimulationContext::drawables() -> one Avatar sprite per DrawKey
//! ```
//!
//! Avatars are keyed, not room-scoped: a key missing from this frame's
//! drawables hides its sprite, a new key spawns one.

use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{actor::Facing, state::GameState};
use crate::plugins::camera::room_to_world;
use crate::plugins::rooms::RoomId;
use crate::plugins::sim::{
    SimulationContext,
    draw::{DrawKey, Drawable},
};

const TORCH_SIZE: f32 = 48.0;

/// Room dressing, rebuilt whenever the shown room changes.
#[derive(Component)]
pub struct Scenery;

#[derive(Component)]
pub struct Torch;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avatar(pub DrawKey);

pub fn plugin(app: &mut App) {
    app.add_systems(
        PostUpdate,
        (rebuild_scenery, sync_avatars)
            .chain()
            .before(TransformSystems::Propagate)
            .run_if(in_state(GameState::InGame)),
    );
}

fn rebuild_scenery(
    mut commands: Commands,
    ctx: Res<SimulationContext>,
    mut shown: Local<Option<(u32, RoomId)>>,
    q_scenery: Query<Entity, With<Scenery>>,
) {
    let key = (ctx.epoch, ctx.current_room);
    if *shown == Some(key) {
        return;
    }
    *shown = Some(key);

    for e in &q_scenery {
        commands.entity(e).despawn();
    }

    let Some(room) = ctx.room() else {
        return;
    };
    let size = Vec2::new(room.width, room.height);

    commands.spawn((
        Name::new(format!("Backdrop {:?}", room.id)),
        Scenery,
        Sprite::from_color(room.backdrop.color, size),
        Transform::from_translation(room_to_world(Vec2::ZERO, size).extend(-10.0)),
        DespawnOnExit(GameState::InGame),
    ));

    for &at in &room.backdrop.torches {
        commands.spawn((
            Name::new("Torch"),
            Scenery,
            Torch,
            Sprite::from_color(Color::srgb(1.0, 0.7, 0.2), Vec2::splat(TORCH_SIZE)),
            Transform::from_translation(room_to_world(at, Vec2::splat(TORCH_SIZE)).extend(-5.0)),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn tint(d: &Drawable) -> Color {
    let base = match (d.key, d.label) {
        (DrawKey::Player, "HURT") => Color::srgb(1.0, 0.45, 0.45),
        (DrawKey::Player, "DEFEND") => Color::srgb(0.55, 0.75, 1.0),
        (DrawKey::Player, _) => Color::srgb(0.35, 0.55, 0.95),
        (DrawKey::Boss(_), "death") => Color::srgb(0.25, 0.1, 0.1),
        (DrawKey::Boss(_), _) => Color::srgb(0.75, 0.15, 0.1),
        (DrawKey::Item(_), "coin") => Color::srgb(1.0, 0.87, 0.0),
        (DrawKey::Item(_), _) => Color::srgb(1.0, 0.0, 1.0),
        (DrawKey::Door(_), _) => Color::srgba(0.4, 0.4, 0.8, 0.3),
    };
    if d.flashing { base.with_alpha(0.5) } else { base }
}

fn depth(key: DrawKey) -> f32 {
    match key {
        DrawKey::Door(_) => 0.0,
        DrawKey::Item(_) => 1.0,
        DrawKey::Boss(_) => 2.0,
        DrawKey::Player => 3.0,
    }
}

fn place(d: &Drawable, sprite: &mut Sprite, tf: &mut Transform) {
    sprite.color = tint(d);
    sprite.custom_size = Some(d.size);
    sprite.flip_x = d.facing == Facing::Left;
    tf.translation = room_to_world(d.position, d.size).extend(depth(d.key));
}

fn sync_avatars(
    mut commands: Commands,
    ctx: Res<SimulationContext>,
    mut q_avatars: Query<(&Avatar, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let drawables = ctx.drawables();
    let mut known = HashSet::new();

    for (avatar, mut sprite, mut tf, mut vis) in &mut q_avatars {
        known.insert(avatar.0);
        match drawables.iter().find(|d| d.key == avatar.0) {
            Some(d) => {
                place(d, &mut sprite, &mut tf);
                *vis = Visibility::Visible;
            }
            None => *vis = Visibility::Hidden,
        }
    }

    for d in drawables.iter().filter(|d| !known.contains(&d.key)) {
        let mut sprite = Sprite::default();
        let mut tf = Transform::default();
        place(d, &mut sprite, &mut tf);
        commands.spawn((
            Name::new(format!("Avatar {:?}", d.key)),
            Avatar(d.key),
            sprite,
            tf,
            Visibility::Visible,
            DespawnOnExit(GameState::InGame),
        ));
    }
}
