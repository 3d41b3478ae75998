//! Frame scheduler.
//!
//! Drives [`Simulation::step`] once per `Update` while playing and maps its
//! outcome onto the global [`GameState`].
//!
//! ```text
//!   FrameSet::Input     pointer sample, clicks  ──▶ PointerState, ClickRequest
//!   FrameSet::Simulate  run_frame               ──▶ FrameNotice, NextState<GameState>
//!   FrameSet::Present   narration, HUD, gizmos
//! ```
//!
//! Clicks arrive as messages so the input side never borrows the simulation.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::{config, state::GameState, tunables::Tunables};
use crate::sim::{FrameInput, Notice, Simulation, Terminal};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Simulate,
    Present,
}

/// Pointer offset from the viewport center, +y up. Zero when the cursor is outside.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
}

/// A click at a pointer-space position.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ClickRequest {
    pub at: Vec2,
}

/// Something the simulation reported this frame.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct FrameNotice(pub Notice);

pub fn plugin(app: &mut App) {
    app.insert_resource(Simulation::new(config::sim_seed()))
        .init_resource::<PointerState>()
        .add_message::<ClickRequest>()
        .add_message::<FrameNotice>()
        .configure_sets(
            Update,
            (FrameSet::Input, FrameSet::Simulate, FrameSet::Present).chain(),
        )
        .add_systems(
            Update,
            run_frame
                .in_set(FrameSet::Simulate)
                .run_if(in_state(GameState::Playing)),
        );
}

pub(crate) fn run_frame(
    time: Res<Time>,
    tunables: Res<Tunables>,
    pointer: Res<PointerState>,
    mut sim: ResMut<Simulation>,
    mut clicks: MessageReader<ClickRequest>,
    mut notices: MessageWriter<FrameNotice>,
    mut next: ResMut<NextState<GameState>>,
) {
    let clicks: Vec<Vec2> = clicks.read().map(|c| c.at).collect();

    let report = sim.step(
        &tunables,
        FrameInput {
            now: time.elapsed_secs(),
            pointer: pointer.position,
            clicks: &clicks,
        },
    );

    notices.write_batch(report.notices.into_iter().map(FrameNotice));

    if let Some(terminal) = report.terminal {
        next.set(match terminal {
            Terminal::Success => GameState::Success,
            Terminal::Failure => GameState::Failure,
        });
    }
}
