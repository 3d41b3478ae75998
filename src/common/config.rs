//! Runtime settings read from the environment (not gameplay tuning).

use std::{env, path::PathBuf};

/// Optional TOML file overriding [`crate::common::tunables::Tunables`].
pub fn tunables_path() -> Option<PathBuf> {
    env::var_os("RANGE_TUNABLES").map(PathBuf::from)
}

/// Optional mission JSON served by the file-backed content provider.
pub fn mission_file() -> Option<PathBuf> {
    env::var_os("RANGE_MISSION_FILE").map(PathBuf::from)
}

/// Seed for the simulation RNG (particles, erratic jitter).
pub fn sim_seed() -> u64 {
    env::var("RANGE_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0x5EED_0F_2A6E)
}

pub const WINDOW_TITLE: &str = "Shooting Range";
pub const WINDOW_SIZE: (u32, u32) = (1280, 720);
