//! Core plugin: shared resources and the restart path.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::player::{Intent, gather_input};
use crate::plugins::sim::{SimSet, SimulationContext};

pub fn plugin(app: &mut App) {
    let tunables = app
        .world()
        .get_resource::<Tunables>()
        .cloned()
        .unwrap_or_default();

    app.insert_resource(SimulationContext::new(&tunables));
    app.insert_resource(tunables);
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
    app.add_systems(Update, restart_on_request.after(gather_input).before(SimSet::Clock));
}

/// Only honoured once the outcome is decided.
fn restart_on_request(
    intent: Res<Intent>,
    tunables: Res<Tunables>,
    mut ctx: ResMut<SimulationContext>,
) {
    if intent.restart && ctx.is_over() {
        ctx.restart(&tunables);
    }
}
