//! Pinhole projection with pointer parallax.
//!
//! Screen space is centered on the viewport with +y up, the same convention as
//! the 2D camera, so a projected point can be drawn without further transforms.
//!
//! ```text
//! scale    = focal / z
//! parallax = 1 - parallax_depth / z
//! screen   = (world.xy - pointer * parallax) * scale
//! ```
//!
//! The renderer and the hit tester must both go through [`project`] and
//! [`Projection::hit_box`]. If they ever disagree, targets become visible but
//! unhittable (or the other way around).

use bevy::prelude::*;

use crate::common::tunables::Tunables;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub screen: Vec2,
    pub scale: f32,
}

/// Axis-aligned box in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBox {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl ScreenBox {
    /// Edges are inclusive.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let d = (p - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }
}

impl Projection {
    /// The entity's box at this depth. `half_extents` are given at scale 1.
    #[inline]
    pub fn hit_box(&self, half_extents: Vec2) -> ScreenBox {
        ScreenBox {
            center: self.screen,
            half_extents: half_extents * self.scale,
        }
    }
}

/// Project a world position for the current pointer offset.
///
/// Callers keep `z` above `near_plane`; the clamp only guards the division.
#[inline]
pub fn project(world: Vec3, pointer: Vec2, tunables: &Tunables) -> Projection {
    debug_assert!(world.z > 0.0, "projected an entity at or behind the camera");

    let z = world.z.max(tunables.near_plane);
    let scale = tunables.focal / z;
    let parallax = 1.0 - tunables.parallax_depth / z;

    Projection {
        screen: (world.truncate() - pointer * parallax) * scale,
        scale,
    }
}

/// Convenience: the hit box of a world position under the configured half extents.
#[inline]
pub fn project_box(world: Vec3, pointer: Vec2, tunables: &Tunables) -> ScreenBox {
    project(world, pointer, tunables).hit_box(tunables.hit_half_extents())
}
