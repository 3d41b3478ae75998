//! Global state machine.
//!
//! ```text
//! Briefing ──accept──▶ Playing ──objectives done──▶ Success
//!    ▲                    │
//!    │                    └──health 0──▶ Failure
//!    └────────restart (R)──────────────────┘
//! ```
//!
//! Success and Failure are terminal until an explicit restart.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Briefing,
    Playing,
    Success,
    Failure,
}

impl GameState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}
