//! Per-variant movement scripts.
//!
//! Each script is a pure function from (entity, time) to the next world
//! position. [`step`] is the single dispatch point; it also enforces the depth
//! invariant so no script can push an entity through the camera plane.

use bevy::prelude::*;
use rand::Rng;

use crate::common::tunables::Tunables;
use crate::sim::entity::{Behavior, RangeEntity};

/// Advance one entity. `t` is mission-relative seconds, `dt` the frame delta.
pub fn step(entity: &mut RangeEntity, tunables: &Tunables, t: f32, dt: f32, rng: &mut impl Rng) {
    let next = match entity.behavior {
        Behavior::Stationary => entity.pos,
        Behavior::Pacing => pacing(entity, tunables, t),
        Behavior::Flanking => flanking(entity, tunables, t, dt),
        Behavior::Erratic => erratic(entity, tunables, rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)),
    };

    entity.pos = Vec3::new(next.x, next.y, next.z.max(tunables.near_plane));
}

/// Advance every living, moving entity.
pub fn advance_all(entities: &mut [RangeEntity], tunables: &Tunables, t: f32, dt: f32, rng: &mut impl Rng) {
    for e in entities.iter_mut().filter(|e| e.is_moving()) {
        step(e, tunables, t, dt, rng);
    }
}

/// Sinusoidal walk around the spawn x.
pub fn pacing(e: &RangeEntity, tunables: &Tunables, t: f32) -> Vec3 {
    let x = e.spawn.x + (t * e.speed + e.phase).sin() * tunables.pacing_amplitude;
    Vec3::new(x, e.pos.y, e.pos.z)
}

/// Approach the camera with a slow sideways drift; loop back out before the near threshold.
pub fn flanking(e: &RangeEntity, tunables: &Tunables, t: f32, dt: f32) -> Vec3 {
    let mut z = e.pos.z - e.speed * tunables.flank_rate * dt;
    if z < tunables.flank_near {
        z = tunables.flank_far;
    }
    let x = e.spawn.x + (t * e.speed * 0.5 + e.phase).sin() * tunables.pacing_amplitude * 0.5;
    Vec3::new(x, e.pos.y, z)
}

/// Random walk kept within the pacing envelope around spawn.
///
/// `jx`/`jy` are jitter samples in [-1, 1].
pub fn erratic(e: &RangeEntity, tunables: &Tunables, jx: f32, jy: f32) -> Vec3 {
    let step = tunables.erratic_jitter * e.speed;
    let reach = tunables.pacing_amplitude;
    let x = (e.pos.x + jx * step).clamp(e.spawn.x - reach, e.spawn.x + reach);
    let y = (e.pos.y + jy * step * 0.25).clamp(e.spawn.y - reach * 0.1, e.spawn.y + reach * 0.1);
    Vec3::new(x, y, e.pos.z)
}
