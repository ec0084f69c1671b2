//! The single mutable world state every stage works on.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::combat::{
    Combatant,
    effects::{ActorRef, Effect, EffectQueue, Guard},
};
use crate::plugins::player::Player;
use crate::plugins::rooms::{Room, RoomGraph, RoomId, content};
use crate::plugins::ui::UiEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub coins: u32,
    pub potions: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Created at game start, mutated by every stage, replaced wholesale on restart.
#[derive(Resource, Debug)]
pub struct SimulationContext {
    /// Bumped on every restart. Scheduled effects carry the epoch they were made in.
    pub epoch: u32,
    /// Simulation seconds since this epoch started.
    pub clock: f64,
    pub current_room: RoomId,
    pub player: Player,
    pub rooms: RoomGraph,
    pub score: Score,
    pub outcome: Option<Outcome>,
    /// Top-left corner of the viewport in room space.
    pub camera: Vec2,
    pub prompt: Option<&'static str>,
    pub effects: EffectQueue,
    outbox: Vec<UiEvent>,
}

impl SimulationContext {
    pub fn new(tunables: &Tunables) -> Self {
        Self::with_epoch(0, tunables)
    }

    fn with_epoch(epoch: u32, tunables: &Tunables) -> Self {
        let player = Player::spawn(content::START_SPAWN_X, tunables);
        let current_room = content::START_ROOM;

        let mut ctx = Self {
            epoch,
            clock: 0.0,
            current_room,
            player,
            rooms: content::build(tunables),
            score: Score::default(),
            outcome: None,
            camera: Vec2::ZERO,
            prompt: None,
            effects: EffectQueue::default(),
            outbox: Vec::new(),
        };

        let vitals = ctx.player.vitals;
        ctx.emit(UiEvent::HealthChanged {
            current: vitals.health(),
            max: vitals.max_health(),
        });
        ctx.emit(UiEvent::CoinsChanged(0));
        ctx.emit(UiEvent::PotionsChanged(0));
        ctx.emit(UiEvent::RoomChanged(current_room.label()));
        ctx
    }

    /// Discard everything and start over in the next epoch.
    pub fn restart(&mut self, tunables: &Tunables) {
        let epoch = self.epoch.wrapping_add(1);
        info!(epoch, "restarting");
        *self = Self::with_epoch(epoch, tunables);
    }

    pub fn room(&self) -> Option<&Room> {
        self.rooms.get(self.current_room)
    }

    pub fn actor(&self, actor: ActorRef) -> Option<&dyn Combatant> {
        match actor {
            ActorRef::Player => Some(&self.player),
            ActorRef::Boss(at) => self.rooms.boss(at).map(|boss| boss as &dyn Combatant),
        }
    }

    /// Queue `effect` to fire `delay` seconds from now, guarded by the current
    /// epoch and, when given, the liveness of `subject`.
    pub fn schedule(&mut self, delay: f32, effect: Effect, subject: Option<ActorRef>) {
        let guard = Guard {
            epoch: self.epoch,
            subject,
        };
        self.effects.schedule(self.clock + f64::from(delay), effect, guard);
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Decide the outcome. The first call wins; later ones are ignored.
    pub fn finish(&mut self, outcome: Outcome) {
        if let Some(decided) = self.outcome {
            debug!(?decided, ignored = ?outcome, "outcome already decided");
            return;
        }
        info!(?outcome, coins = self.score.coins, "game over");
        self.outcome = Some(outcome);
        self.emit(UiEvent::GameEnded {
            victory: outcome == Outcome::Victory,
        });
    }

    pub fn show_prompt(&mut self, text: &'static str) {
        if self.prompt != Some(text) {
            self.prompt = Some(text);
            self.emit(UiEvent::PromptShown(text));
        }
    }

    pub fn hide_prompt(&mut self) {
        if self.prompt.take().is_some() {
            self.emit(UiEvent::PromptHidden);
        }
    }

    #[inline]
    pub fn emit(&mut self, event: UiEvent) {
        self.outbox.push(event);
    }

    /// Hand over everything emitted since the last call.
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.outbox)
    }
}
