//! Rooms plugin: the room graph, per-room update and door transitions.
//!
//! Rooms own everything inside them (collectibles, doors, bosses) and keep it
//! when the player leaves, so a room is re-entered exactly as it was left.
//!
//! ```text
//! SimSet::Rooms:
//!   Room::update   -> bob items, run bosses, collect, find overlapped door
//!   step_room      -> score + UI, schedule strike checks, prompt,
//!                     door transition (interact on a door) or potion (interact elsewhere)
//! ```
//!
//! Doors are the only edges. Each door carries its own spawn x for the
//! destination, so reverse edges are authored separately and checked by tests.

pub mod content;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::common::{collision::Hitbox, tunables::Tunables};
use crate::plugins::boss::{Boss, BossCue};
use crate::plugins::combat::{
    Combatant,
    effects::{ActorRef, BossRef, Effect},
};
use crate::plugins::player::{Intent, Player};
use crate::plugins::sim::{SimSet, SimulationContext};
use crate::plugins::ui::UiEvent;

/// Collectible sprite edge after scaling (16 px at 2x).
pub const ITEM_SIZE: f32 = 32.0;
/// Vertical amplitude of the idle bob, in pixels.
pub const ITEM_BOB_AMPLITUDE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomId {
    Start,
    Dungeon,
    Lair,
}

impl RoomId {
    pub const ALL: [RoomId; 3] = [RoomId::Start, RoomId::Dungeon, RoomId::Lair];

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Starting Chamber",
            Self::Dungeon => "Dark Dungeon",
            Self::Lair => "Dragon Lord's Lair",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Coin,
    Potion,
}

#[derive(Debug, Clone)]
pub struct Collectible {
    pub position: Vec2,
    pub kind: ItemKind,
    pub bob_phase: f32,
    collected: bool,
}

impl Collectible {
    pub fn new(position: Vec2, kind: ItemKind) -> Self {
        Self {
            position,
            kind,
            bob_phase: 0.0,
            collected: false,
        }
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::at(self.position, Vec2::splat(ITEM_SIZE))
    }

    /// Mark as collected. Returns `true` only the first time.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }

    /// Draw-only vertical offset of the idle bob.
    pub fn bob_offset(&self) -> f32 {
        self.bob_phase.sin() * ITEM_BOB_AMPLITUDE
    }
}

/// Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Door {
    pub area: Hitbox,
    pub target: RoomId,
    pub prompt: &'static str,
    /// Player x on arrival in `target`.
    pub spawn_x: f32,
}

/// What the renderer needs to paint a room.
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub color: Color,
    pub torches: Vec<Vec2>,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub width: f32,
    pub height: f32,
    pub backdrop: Backdrop,
    pub items: Vec<Collectible>,
    pub doors: Vec<Door>,
    pub bosses: Vec<Boss>,
}

/// Outcome of one room tick, for the simulation to act on.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RoomReport {
    /// Indices of bosses that started a swing this tick.
    pub strikes: Vec<usize>,
    pub collected: Vec<ItemKind>,
    /// First door the player overlaps.
    pub door: Option<usize>,
}

impl Room {
    pub fn new(id: RoomId, width: f32, height: f32, backdrop: Backdrop) -> Self {
        Self {
            id,
            width,
            height,
            backdrop,
            items: Vec::new(),
            doors: Vec::new(),
            bosses: Vec::new(),
        }
    }

    pub fn update(&mut self, dt: f32, player: &Player, tunables: &Tunables) -> RoomReport {
        let mut report = RoomReport::default();
        let body = player.hitbox();

        for item in self.items.iter_mut().filter(|i| !i.collected) {
            item.bob_phase += tunables.item_bob_rate * dt;
        }

        for (index, boss) in self.bosses.iter_mut().enumerate() {
            if let Some(BossCue::Strike) = boss.update(player.position.x, self.width, tunables, dt) {
                report.strikes.push(index);
            }
        }

        for item in &mut self.items {
            if item.hitbox().overlaps(&body) && item.collect() {
                report.collected.push(item.kind);
            }
        }

        report.door = self.doors.iter().position(|door| door.area.overlaps(&body));
        report
    }
}

/// Every room of the game, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct RoomGraph {
    rooms: HashMap<RoomId, Room>,
}

impl RoomGraph {
    pub fn from_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        Self {
            rooms: rooms.into_iter().map(|room| (room.id, room)).collect(),
        }
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    pub fn boss(&self, at: BossRef) -> Option<&Boss> {
        self.get(at.room)?.bosses.get(at.index)
    }

    pub fn boss_mut(&mut self, at: BossRef) -> Option<&mut Boss> {
        self.get_mut(at.room)?.bosses.get_mut(at.index)
    }

    pub fn all_bosses_dead(&self) -> bool {
        self.rooms
            .values()
            .flat_map(|room| &room.bosses)
            .all(|boss| boss.is_dead())
    }

    /// Directed edges `(source, door)`.
    pub fn edges(&self) -> impl Iterator<Item = (RoomId, &Door)> {
        self.rooms
            .values()
            .flat_map(|room| room.doors.iter().map(move |door| (room.id, door)))
    }
}

// -----------------------------------------------------------------------------
// Plugin
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.add_systems(Update, update_room.in_set(SimSet::Rooms));
}

fn update_room(
    time: Res<Time>,
    tunables: Res<Tunables>,
    intent: Res<Intent>,
    mut ctx: ResMut<SimulationContext>,
) {
    step_room(&mut ctx, &intent, &tunables, time.delta_secs());
}

/// Room stage of the tick.
pub fn step_room(ctx: &mut SimulationContext, intent: &Intent, tunables: &Tunables, dt: f32) {
    let room_id = ctx.current_room;
    let Some(room) = ctx.rooms.get_mut(room_id) else {
        return;
    };
    let report = room.update(dt, &ctx.player, tunables);
    let door = report.door.and_then(|i| room.doors.get(i).copied());

    for index in report.strikes {
        let boss = BossRef { room: room_id, index };
        ctx.schedule(
            tunables.boss_strike_delay,
            Effect::StrikeCheck { boss, damage: tunables.boss_strike_damage },
            Some(ActorRef::Boss(boss)),
        );
    }

    for kind in report.collected {
        debug!(?kind, room = ?room_id, "collected");
        match kind {
            ItemKind::Coin => {
                ctx.score.coins += 1;
                ctx.emit(UiEvent::CoinsChanged(ctx.score.coins));
            }
            ItemKind::Potion => {
                ctx.score.potions += 1;
                ctx.emit(UiEvent::PotionsChanged(ctx.score.potions));
            }
        }
    }

    let interact = intent.interact && !ctx.player.is_dead();
    match door {
        Some(door) if interact => enter_door(ctx, &door),
        Some(door) => ctx.show_prompt(door.prompt),
        None => {
            ctx.hide_prompt();
            if interact {
                drink_potion(ctx, tunables);
            }
        }
    }
}

/// Move the player through `door`.
pub fn enter_door(ctx: &mut SimulationContext, door: &Door) {
    info!(from = ?ctx.current_room, to = ?door.target, "room transition");
    ctx.current_room = door.target;
    ctx.player.position.x = door.spawn_x;
    ctx.hide_prompt();
    ctx.emit(UiEvent::RoomChanged(door.target.label()));
}

/// Consume one potion if it would heal anything. Returns the health restored.
pub fn drink_potion(ctx: &mut SimulationContext, tunables: &Tunables) -> u32 {
    let vitals = ctx.player.vitals;
    if ctx.score.potions == 0 || ctx.player.is_dead() || vitals.health() >= vitals.max_health() {
        return 0;
    }

    ctx.score.potions -= 1;
    let restored = ctx.player.vitals.heal(tunables.potion_heal);
    debug!(restored, left = ctx.score.potions, "potion used");

    ctx.emit(UiEvent::PotionsChanged(ctx.score.potions));
    let vitals = ctx.player.vitals;
    ctx.emit(UiEvent::HealthChanged {
        current: vitals.health(),
        max: vitals.max_health(),
    });
    restored
}
