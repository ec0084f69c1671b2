//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime, `StatesPlugin` the state machinery.
//! - `TimeUpdateStrategy::ManualDuration` makes every frame exactly 1/60 s.
//! - we then call `dragon_lair::game::configure_headless` to install gameplay plugins.
//!
//! There is no keyboard in a headless app, so tests drive the `Intent` resource directly.

#![allow(dead_code)]

use std::time::Duration;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use dragon_lair::plugins::player::Intent;
use dragon_lair::plugins::sim::SimulationContext;
use dragon_lair::plugins::ui::UiEvent;

/// Every `GameEnded` delivered through the message queue, in order.
#[derive(Resource, Default, Debug)]
pub struct Endings(pub Vec<bool>);

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    dragon_lair::game::configure_headless(&mut app);

    app.init_resource::<Endings>().add_systems(Last, record_endings);
    app
}

fn record_endings(mut reader: MessageReader<UiEvent>, mut endings: ResMut<Endings>) {
    for event in reader.read() {
        if let UiEvent::GameEnded { victory } = *event {
            endings.0.push(victory);
        }
    }
}

pub fn set_intent(app: &mut App, intent: Intent) {
    *app.world_mut().resource_mut::<Intent>() = intent;
}

pub fn ctx(app: &App) -> &SimulationContext {
    app.world().resource::<SimulationContext>()
}

pub fn ctx_mut(app: &mut App) -> Mut<'_, SimulationContext> {
    app.world_mut().resource_mut::<SimulationContext>()
}

/// Update until `done` holds or `max_frames` have run. Returns frames used.
pub fn run_until(app: &mut App, max_frames: usize, done: impl Fn(&SimulationContext) -> bool) -> usize {
    for frame in 1..=max_frames {
        app.update();
        if done(ctx(app)) {
            return frame;
        }
    }
    max_frames
}
