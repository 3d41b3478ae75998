//! Camera plugin.
//!
//! One fixed 2D camera looking at the viewport origin. Screen shake moves the
//! camera rather than every drawn shape, so gizmos and UI stay in sync.
//!
//! ```text
//! Startup:                spawn MainCamera
//! Update (FrameSet::Present): translation = shake offset
//! ```

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::scheduler::FrameSet;
use crate::sim::{Phase, Simulation};

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera)
        .add_systems(Update, apply_shake.in_set(FrameSet::Present));
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}

fn apply_shake(
    tunables: Res<Tunables>,
    sim: Res<Simulation>,
    mut q_cam: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut tf) = q_cam.single_mut() else {
        return;
    };

    let offset = match sim.phase() {
        Phase::Playing => sim.shake_offset(&tunables),
        _ => Vec2::ZERO,
    };
    tf.translation.x = offset.x;
    tf.translation.y = offset.y;
}
