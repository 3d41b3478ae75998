//! Pointer sampling and click capture.
//!
//! Window cursor coordinates are top-left origin, +y down. The simulation works
//! in viewport-centered coordinates, +y up, so everything is converted here once.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::common::state::GameState;
use crate::plugins::scheduler::{ClickRequest, FrameSet, PointerState};

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (sample_pointer, capture_clicks)
            .chain()
            .in_set(FrameSet::Input)
            .run_if(in_state(GameState::Playing)),
    );
}

/// Window cursor position to viewport-centered, +y up.
pub fn window_to_viewport(cursor: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(cursor.x - size.x * 0.5, size.y * 0.5 - cursor.y)
}

fn sample_pointer(windows: Query<&Window, With<PrimaryWindow>>, mut pointer: ResMut<PointerState>) {
    let Ok(window) = windows.single() else {
        return;
    };

    // Keep the last position while the cursor is outside the window.
    if let Some(cursor) = window.cursor_position() {
        pointer.position = window_to_viewport(cursor, window.size());
    }
}

fn capture_clicks(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    pointer: Res<PointerState>,
    mut writer: MessageWriter<ClickRequest>,
) {
    let Some(buttons) = buttons else {
        return;
    };
    if buttons.just_pressed(MouseButton::Left) {
        writer.write(ClickRequest { at: pointer.position });
    }
}
