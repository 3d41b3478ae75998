//! Test helpers.
//!
//! `World::run_system_once` executes a single system without building a schedule.
//! Systems that use `Commands` only enqueue structural changes, so we flush
//! afterwards to make spawned entities visible to assertions.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::mission::Mission;
use crate::sim::entity::RangeEntity;
use crate::sim::{FrameInput, Simulation};

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A simulation already playing the fallback mission, started at t = 0.
pub fn playing_fallback(tunables: &Tunables) -> Simulation {
    let mut sim = Simulation::new(7);
    sim.start(Mission::fallback(), tunables, 0.0);
    sim
}

/// Tunables with sway, wind and recoil switched off so clicks land exactly on the pointer.
pub fn still_tunables() -> Tunables {
    Tunables {
        sway_amplitude: 0.0,
        wind_sway: 0.0,
        recoil_kick: 0.0,
        ..Tunables::default()
    }
}

/// A playing simulation with a hand-placed roster instead of the mission layout.
pub fn playing_with(mission: Mission, roster: Vec<RangeEntity>, tunables: &Tunables) -> Simulation {
    let mut sim = Simulation::new(11);
    sim.start(mission, tunables, 0.0);
    sim.entities = roster;
    sim
}

/// Frame input without clicks.
pub fn idle_frame(now: f32) -> FrameInput<'static> {
    FrameInput { now, pointer: Vec2::ZERO, clicks: &[] }
}
