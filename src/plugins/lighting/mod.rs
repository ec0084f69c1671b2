//! Lighting plugin (Firefly) (render-only).
//!
//! One warm light rides on the player avatar; every torch of the shown room
//! gets its own light when it is spawned, and loses it with the scenery.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::render::{Avatar, Torch};
use crate::plugins::sim::draw::DrawKey;

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, light_new_torches)
        .add_systems(PostUpdate, follow_player_light.before(TransformSystems::Propagate));
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            range: 450.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn light_new_torches(mut commands: Commands, q_torches: Query<Entity, Added<Torch>>) {
    for e in &q_torches {
        commands.entity(e).insert(PointLight2d {
            color: Color::srgb(1.0, 0.65, 0.3),
            range: 260.0,
            ..default()
        });
    }
}

fn follow_player_light(
    q_avatars: Query<(&Avatar, &Transform), Without<PlayerLight>>,
    mut q_light: Query<&mut Transform, (With<PlayerLight>, Without<Avatar>)>,
) {
    let Some((_, tf_player)) = q_avatars.iter().find(|(a, _)| a.0 == DrawKey::Player) else {
        return;
    };
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
}
