//! Run flow: briefing, play, outcome, restart.
//!
//! The simulation decides when a run ends; this plugin only opens and closes
//! runs around the state machine in [`crate::common::state`].

use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::mission::Mission;
use crate::plugins::content::LoadedMission;
use crate::sim::Simulation;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Briefing), stand_down)
        .add_systems(OnEnter(GameState::Playing), begin_run)
        .add_systems(OnEnter(GameState::Success), report_outcome)
        .add_systems(OnEnter(GameState::Failure), report_outcome)
        .add_systems(
            Update,
            (
                accept_briefing.run_if(in_state(GameState::Briefing)),
                restart.run_if(in_state(GameState::Success).or(in_state(GameState::Failure))),
            ),
        );
}

fn stand_down(mut sim: ResMut<Simulation>) {
    sim.stand_down();
}

fn begin_run(time: Res<Time>, tunables: Res<Tunables>, loaded: Res<LoadedMission>, mut sim: ResMut<Simulation>) {
    let mission = loaded.mission.clone().unwrap_or_else(|| {
        warn!("run started without a loaded mission, using fallback");
        Mission::fallback()
    });
    sim.start(mission, &tunables, time.elapsed_secs());
}

fn accept_briefing(
    loaded: Res<LoadedMission>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if !loaded.is_ready() {
        return;
    }

    let key = keys.is_some_and(|k| k.any_just_pressed([KeyCode::Enter, KeyCode::Space]));
    let click = buttons.is_some_and(|b| b.just_pressed(MouseButton::Left));
    if key || click {
        next.set(GameState::Playing);
    }
}

fn restart(keys: Option<Res<ButtonInput<KeyCode>>>, mut next: ResMut<NextState<GameState>>) {
    if keys.is_some_and(|k| k.just_pressed(KeyCode::KeyR)) {
        info!("restarting");
        next.set(GameState::Briefing);
    }
}

fn report_outcome(state: Res<State<GameState>>, sim: Res<Simulation>) {
    let p = &sim.player;
    info!(
        "{:?}: objectives {}/{}, health {}%, accuracy {:.0}% ({} of {})",
        state.get(),
        sim.objectives.index(),
        sim.objectives.len(),
        p.health_percent(),
        p.accuracy() * 100.0,
        p.hits,
        p.shots,
    );
}
