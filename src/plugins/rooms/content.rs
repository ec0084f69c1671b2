//! Authored room content.
//!
//! Heights follow the viewport. Collectibles rest on the floor line, doors and
//! the boss stand on it, so every one of them can meet the player's body box.

use bevy::prelude::*;

use super::{Backdrop, Collectible, Door, ItemKind, Room, RoomGraph, RoomId};
use crate::common::{collision::Hitbox, tunables::Tunables};
use crate::plugins::boss::Boss;

pub const START_WIDTH: f32 = 2000.0;
pub const DUNGEON_WIDTH: f32 = 2500.0;
pub const LAIR_WIDTH: f32 = 1800.0;

/// Player x on arrival, per destination.
pub const START_SPAWN_X: f32 = 100.0;
pub const DUNGEON_SPAWN_X: f32 = 200.0;
pub const LAIR_SPAWN_X: f32 = 200.0;

const DOOR_SIZE: Vec2 = Vec2::new(100.0, 150.0);

/// Where a new game puts the player.
pub const START_ROOM: RoomId = RoomId::Start;

pub fn build(tunables: &Tunables) -> RoomGraph {
    RoomGraph::from_rooms([start(tunables), dungeon(tunables), lair(tunables)])
}

fn floor_item(x: f32, kind: ItemKind, tunables: &Tunables) -> Collectible {
    // Inside the band swept by the player's body box.
    let y = tunables.ground_y + 48.0;
    Collectible::new(Vec2::new(x, y), kind)
}

fn door(x: f32, target: RoomId, prompt: &'static str, tunables: &Tunables) -> Door {
    let spawn_x = match target {
        RoomId::Start => START_SPAWN_X,
        RoomId::Dungeon => DUNGEON_SPAWN_X,
        RoomId::Lair => LAIR_SPAWN_X,
    };
    let y = tunables.viewport.y - 300.0;
    Door {
        area: Hitbox::at(Vec2::new(x, y), DOOR_SIZE),
        target,
        prompt,
        spawn_x,
    }
}

fn start(t: &Tunables) -> Room {
    let mut room = Room::new(
        RoomId::Start,
        START_WIDTH,
        t.viewport.y,
        Backdrop {
            color: Color::srgb_u8(0x1a, 0x1a, 0x2e),
            torches: vec![Vec2::new(1000.0, 200.0)],
        },
    );

    room.items = vec![
        floor_item(300.0, ItemKind::Coin, t),
        floor_item(500.0, ItemKind::Coin, t),
        floor_item(700.0, ItemKind::Potion, t),
        floor_item(900.0, ItemKind::Coin, t),
    ];
    room.doors = vec![door(1800.0, RoomId::Dungeon, "Press E to enter the Dungeon", t)];
    room
}

fn dungeon(t: &Tunables) -> Room {
    let mut room = Room::new(
        RoomId::Dungeon,
        DUNGEON_WIDTH,
        t.viewport.y,
        Backdrop {
            color: Color::srgb_u8(0x0f, 0x0f, 0x1a),
            torches: (0..8).map(|i| Vec2::new(i as f32 * 300.0 + 100.0, 150.0)).collect(),
        },
    );

    room.items = vec![
        floor_item(400.0, ItemKind::Potion, t),
        floor_item(800.0, ItemKind::Coin, t),
        floor_item(1200.0, ItemKind::Coin, t),
        floor_item(1600.0, ItemKind::Potion, t),
        floor_item(2000.0, ItemKind::Coin, t),
    ];
    room.doors = vec![
        door(50.0, RoomId::Start, "Press E to return to Start", t),
        door(2300.0, RoomId::Lair, "Press E to face the Dragon Lord", t),
    ];
    room
}

fn lair(t: &Tunables) -> Room {
    let mut room = Room::new(
        RoomId::Lair,
        LAIR_WIDTH,
        t.viewport.y,
        Backdrop {
            color: Color::srgb_u8(0x0a, 0x0a, 0x15),
            torches: vec![Vec2::new(100.0, 80.0), Vec2::new(1600.0, 80.0)],
        },
    );

    room.items = vec![
        floor_item(200.0, ItemKind::Potion, t),
        floor_item(1500.0, ItemKind::Potion, t),
    ];
    room.bosses = vec![Boss::dragon_lord(Vec2::new(1200.0, t.viewport.y - 350.0), t)];
    room.doors = vec![door(50.0, RoomId::Dungeon, "Press E to retreat", t)];
    room
}
