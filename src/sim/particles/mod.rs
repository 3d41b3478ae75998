//! Short-lived visual feedback.
//!
//! Particles live in screen space. Life starts at 1.0 and drops by a fixed
//! step every tick; a particle is culled on the tick its life reaches zero.
//! The live set is capped so burst-heavy frames cannot grow the per-frame cost.

use std::collections::VecDeque;

use bevy::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

pub const RICOCHET: Color = Color::srgb(1.0, 1.0, 1.0);
pub const IMPACT: Color = Color::srgb(0.95, 0.3, 0.2);
pub const SPLINTER: Color = Color::srgb(0.75, 0.6, 0.4);
pub const GLASS: Color = Color::srgb(0.7, 0.9, 1.0);
pub const INTEL: Color = Color::srgb(0.3, 1.0, 0.5);
pub const EXPLOSION: Color = Color::srgb(1.0, 0.65, 0.1);
pub const DAMAGE: Color = Color::srgb(0.9, 0.05, 0.05);
pub const MUZZLE: Color = Color::srgb(1.0, 0.9, 0.4);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Normalized remaining life in (0, 1].
    pub life: f32,
    pub color: Color,
    pub size: f32,
}

impl Particle {
    /// Draw alpha is proportional to remaining life.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    live: VecDeque<Particle>,
    capacity: usize,
    decay: f32,
    spread: f32,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(capacity: usize, decay: f32, spread: f32, seed: u64) -> Self {
        Self {
            live: VecDeque::with_capacity(capacity),
            capacity,
            decay,
            spread,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Append `count` particles at `origin`, each with a random velocity inside
    /// the spread radius. Oldest particles are dropped beyond capacity.
    pub fn spawn_burst(&mut self, origin: Vec2, color: Color, count: usize, size: f32) {
        for _ in 0..count {
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.gen_range(0.0..=self.spread);
            self.live.push_back(Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                color,
                size,
            });
        }

        let excess = self.live.len().saturating_sub(self.capacity);
        self.live.drain(..excess);
    }

    /// Move, age and cull.
    pub fn advance(&mut self) {
        let decay = self.decay;
        for p in &mut self.live {
            p.pos += p.vel;
            p.life -= decay;
        }
        self.live.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.live.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests;
