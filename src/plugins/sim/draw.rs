//! Read-only renderer surface.
//!
//! The renderer gets plain values and never writes back. Positions are room
//! space, top-left origin; `size` is already scaled.

use bevy::prelude::*;

use super::SimulationContext;
use crate::common::actor::{Facing, Vitals};
use crate::plugins::combat::Combatant;
use crate::plugins::rooms::{ITEM_SIZE, ItemKind};
use crate::plugins::{boss, player};

/// Stable identity of a drawable within the current room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawKey {
    Player,
    Boss(usize),
    Item(usize),
    Door(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub key: DrawKey,
    pub position: Vec2,
    pub size: Vec2,
    pub scale: f32,
    pub facing: Facing,
    pub label: &'static str,
    /// Blink phase of an invulnerability window.
    pub flashing: bool,
    /// `(current, max)` for actors that show a health bar.
    pub health: Option<(u32, u32)>,
}

/// Blink at 10 Hz while invulnerable.
fn flashing(vitals: &Vitals, clock: f64) -> bool {
    vitals.is_invulnerable() && (clock * 10.0).floor() as i64 % 2 == 0
}

impl SimulationContext {
    /// Everything visible in the current room, back to front.
    pub fn drawables(&self) -> Vec<Drawable> {
        let Some(room) = self.room() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(1 + room.doors.len() + room.items.len() + room.bosses.len());

        out.extend(room.doors.iter().enumerate().map(|(i, door)| Drawable {
            key: DrawKey::Door(i),
            position: Vec2::new(door.area.x, door.area.y),
            size: Vec2::new(door.area.width, door.area.height),
            scale: 1.0,
            facing: Facing::Right,
            label: "door",
            flashing: false,
            health: None,
        }));

        out.extend(
            room.items
                .iter()
                .enumerate()
                .filter(|(_, item)| !item.is_collected())
                .map(|(i, item)| Drawable {
                    key: DrawKey::Item(i),
                    position: item.position + Vec2::Y * item.bob_offset(),
                    size: Vec2::splat(ITEM_SIZE),
                    scale: 2.0,
                    facing: Facing::Right,
                    label: match item.kind {
                        ItemKind::Coin => "coin",
                        ItemKind::Potion => "potion",
                    },
                    flashing: false,
                    health: None,
                }),
        );

        out.extend(room.bosses.iter().enumerate().map(|(i, b)| Drawable {
            key: DrawKey::Boss(i),
            position: b.position,
            size: b.size(),
            scale: boss::SCALE,
            facing: b.facing,
            label: b.state.label(),
            flashing: flashing(&b.vitals, self.clock),
            health: (!b.is_dead()).then(|| (b.vitals.health(), b.vitals.max_health())),
        }));

        let p = &self.player;
        out.push(Drawable {
            key: DrawKey::Player,
            position: p.position,
            size: p.size(),
            scale: player::SCALE,
            facing: p.facing,
            label: p.state.label(),
            flashing: flashing(&p.vitals, self.clock),
            health: Some((p.vitals.health(), p.vitals.max_health())),
        });

        out
    }
}
