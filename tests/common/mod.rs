//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime and the task pools.
//! - `StatesPlugin` drives `GameState` transitions.
//! - we then call `shooting_range::game::configure_headless` to install gameplay plugins.
//!
//! Time advances a fixed 1/60 s per update so runs are reproducible.

#![allow(dead_code)]

use std::thread;
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use shooting_range::common::{state::GameState, tunables::Tunables};
use shooting_range::plugins::content::provider::{ContentProvider, OfflineProvider};
use shooting_range::plugins::content::{Content, LoadedMission};

pub fn app_headless() -> App {
    app_with(OfflineProvider, Tunables::default())
}

pub fn app_with(provider: impl ContentProvider, tunables: Tunables) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    // Picked up by the core and content plugins instead of their defaults.
    app.insert_resource(tunables);
    app.insert_resource(Content::new(provider));

    shooting_range::game::configure_headless(&mut app);
    app
}

/// Tick until the briefing has a mission (the fetch runs on the IO pool).
pub fn wait_for_mission(app: &mut App) {
    for _ in 0..500 {
        app.update();
        if app.world().resource::<LoadedMission>().is_ready() {
            return;
        }
        thread::sleep(Duration::from_millis(2));
    }
    panic!("mission never loaded");
}

pub fn go_to(app: &mut App, state: GameState) {
    app.world_mut().resource_mut::<NextState<GameState>>().set(state);
    app.update();
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}
