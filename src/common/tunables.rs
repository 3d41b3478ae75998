//! Tunable gameplay constants.
//!
//! Every hand-tuned number of the range lives here so the projection, the hit
//! tester and the renderer all read the same values. A TOML file can override
//! any subset of fields (see [`crate::common::config::tunables_path`]).

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tunables {
    // Projection.
    /// Pinhole "zoom" baseline: `scale = focal / z`.
    pub focal: f32,
    /// Parallax reference depth: `parallax = 1 - parallax_depth / z`.
    pub parallax_depth: f32,
    /// Smallest depth any entity may occupy.
    pub near_plane: f32,

    // Hit test. Half extents at scale 1.
    pub hit_half_width: f32,
    pub hit_half_height: f32,

    // Behaviors.
    pub pacing_amplitude: f32,
    pub flank_rate: f32,
    pub flank_near: f32,
    pub flank_far: f32,
    pub erratic_jitter: f32,

    // Hostile fire.
    pub hostile_cooldown: f32,
    pub hostile_damage: u32,
    pub max_health: u32,

    // Explosions.
    pub blast_radius: f32,
    pub blast_delay: f32,

    // Particles.
    pub particle_capacity: usize,
    pub particle_decay: f32,
    pub particle_spread: f32,

    // Screen feel.
    pub sway_amplitude: f32,
    pub wind_sway: f32,
    pub recoil_kick: f32,
    pub recoil_decay: f32,
    pub shake_decay: f32,
    pub shake_hit: f32,
    pub shake_explosion: f32,
    pub shake_shot: f32,

    // Objectives.
    pub recon_dwell: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            focal: 600.0,
            parallax_depth: 400.0,
            near_plane: 50.0,
            hit_half_width: 28.0,
            hit_half_height: 55.0,
            pacing_amplitude: 120.0,
            flank_rate: 40.0,
            flank_near: 250.0,
            flank_far: 1400.0,
            erratic_jitter: 6.0,
            hostile_cooldown: 2.5,
            hostile_damage: 10,
            max_health: 100,
            blast_radius: 220.0,
            blast_delay: 0.15,
            particle_capacity: 150,
            particle_decay: 0.025,
            particle_spread: 6.0,
            sway_amplitude: 6.0,
            wind_sway: 1.5,
            recoil_kick: 30.0,
            recoil_decay: 8.0,
            shake_decay: 4.0,
            shake_hit: 14.0,
            shake_explosion: 28.0,
            shake_shot: 3.0,
            recon_dwell: 1.5,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tunables file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tunables: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid tunables: {0}")]
    Invalid(&'static str),
}

impl Tunables {
    /// Parse a (possibly partial) TOML override. Missing fields keep defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let tunables: Self = toml::from_str(text)?;
        tunables.validate()?;
        Ok(tunables)
    }

    /// Reject values that would put an entity at or behind the eye or stall the
    /// particle buffer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.near_plane > 0.0) {
            return Err(ConfigError::Invalid("near_plane must be positive"));
        }
        if !(self.focal > 0.0) {
            return Err(ConfigError::Invalid("focal must be positive"));
        }
        if !(self.flank_near >= self.near_plane) {
            return Err(ConfigError::Invalid("flank_near must not be closer than near_plane"));
        }
        if !(self.flank_far > self.flank_near) {
            return Err(ConfigError::Invalid("flank_far must lie beyond flank_near"));
        }
        if !(self.particle_decay > 0.0) {
            return Err(ConfigError::Invalid("particle_decay must be positive"));
        }
        if self.particle_capacity == 0 {
            return Err(ConfigError::Invalid("particle_capacity must be at least 1"));
        }
        if !(self.particle_spread >= 0.0) {
            return Err(ConfigError::Invalid("particle_spread must not be negative"));
        }
        if !(self.pacing_amplitude >= 0.0) {
            return Err(ConfigError::Invalid("pacing_amplitude must not be negative"));
        }
        if !(self.erratic_jitter >= 0.0) {
            return Err(ConfigError::Invalid("erratic_jitter must not be negative"));
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load overrides if a path is configured, otherwise defaults.
    ///
    /// A broken override file is reported and ignored; the range must stay playable.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(t) => {
                info!("loaded tunables from {}", path.display());
                t
            }
            Err(e) => {
                warn!("ignoring tunables override {}: {e}", path.display());
                Self::default()
            }
        }
    }

    #[inline]
    pub fn hit_half_extents(&self) -> Vec2 {
        Vec2::new(self.hit_half_width, self.hit_half_height)
    }
}
