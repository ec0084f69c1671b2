//! Feature plugins.

use bevy::prelude::*;

pub mod boss;
pub mod combat;
pub mod core;
pub mod player;
pub mod rooms;
pub mod sim;
pub mod ui;

// Render-only
pub mod camera;
pub mod lighting;
pub mod render;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    sim::plugin(app);
    player::plugin(app);
    rooms::plugin(app);
    combat::plugin(app);
    camera::plugin(app);
    ui::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::render_plugin(app);
    render::plugin(app);
    lighting::plugin(app);
}
