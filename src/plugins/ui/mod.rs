//! UI plugin: the notification sink.
//!
//! The simulation never touches presentation. Stages push [`UiEvent`]s into
//! the context outbox; once per frame the outbox is flushed as Bevy messages
//! and folded into the [`Hud`] resource that any presenter can read.
//!
//! ```text
//! SimulationContext::emit -> outbox -> flush_ui_events -> Messages<UiEvent> -> fold_into_hud -> Hud
//! ```

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::plugins::sim::{SimSet, SimulationContext};

/// Fire-and-forget notification. Nothing is acknowledged.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    HealthChanged { current: u32, max: u32 },
    CoinsChanged(u32),
    PotionsChanged(u32),
    RoomChanged(&'static str),
    PromptShown(&'static str),
    PromptHidden,
    GameEnded { victory: bool },
}

/// Latest value of everything the HUD shows.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    pub health: (u32, u32),
    pub coins: u32,
    pub potions: u32,
    pub room: &'static str,
    pub prompt: Option<&'static str>,
    /// `Some(victory)` once the game has ended.
    pub ended: Option<bool>,
}

impl Hud {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::HealthChanged { current, max } => self.health = (current, max),
            UiEvent::CoinsChanged(n) => self.coins = n,
            UiEvent::PotionsChanged(n) => self.potions = n,
            UiEvent::RoomChanged(label) => {
                // A new room label after an ending means a restart.
                self.ended = None;
                self.room = label;
            }
            UiEvent::PromptShown(text) => self.prompt = Some(text),
            UiEvent::PromptHidden => self.prompt = None,
            UiEvent::GameEnded { victory } => self.ended = Some(victory),
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<UiEvent>()
        .init_resource::<Hud>()
        .add_systems(Update, (flush_ui_events, fold_into_hud).chain().after(SimSet::Camera));
}

fn flush_ui_events(ctx: Option<ResMut<SimulationContext>>, mut writer: MessageWriter<UiEvent>) {
    let Some(mut ctx) = ctx else {
        return;
    };
    for event in ctx.take_events() {
        writer.write(event);
    }
}

fn fold_into_hud(mut reader: MessageReader<UiEvent>, mut hud: ResMut<Hud>) {
    for &event in reader.read() {
        match event {
            UiEvent::RoomChanged(label) => info!(room = label, "entered"),
            UiEvent::GameEnded { victory } => {
                info!(victory, coins = hud.coins, "{}", if victory { "VICTORY!" } else { "GAME OVER" });
            }
            _ => {}
        }
        hud.apply(event);
    }
}
