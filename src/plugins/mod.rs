//! Feature plugins.

use bevy::prelude::*;

pub mod content;
pub mod core;
pub mod flow;
pub mod input;
pub mod scheduler;

// Render-only
pub mod camera;
pub mod hud;
pub mod scene;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    scheduler::plugin(app);
    input::plugin(app);
    content::plugin(app);
    flow::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    scene::plugin(app);
    hud::plugin(app);
}
