//! Mission and narration sources.
//!
//! Providers are blocking; the content plugin runs them on the IO task pool so
//! a slow source never stalls a frame.

use std::fs;
use std::path::PathBuf;

use crate::mission::error::ContentError;

/// Synthesized narration for a line of text. Playback is left to an audio backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechClip {
    pub text: String,
    pub audio: Vec<u8>,
}

/// Port for mission generation and speech synthesis.
pub trait ContentProvider: Send + Sync + 'static {
    /// Raw mission JSON.
    fn fetch_mission(&self) -> Result<String, ContentError>;
    fn narrate(&self, text: &str) -> Result<SpeechClip, ContentError>;
}

/// No content source at all: every run uses the built-in mission.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProvider;

impl ContentProvider for OfflineProvider {
    fn fetch_mission(&self) -> Result<String, ContentError> {
        Err(ContentError::Unavailable("offline".into()))
    }

    fn narrate(&self, _text: &str) -> Result<SpeechClip, ContentError> {
        Err(ContentError::Unavailable("offline".into()))
    }
}

/// Mission JSON from disk. No speech backend.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContentProvider for FileProvider {
    fn fetch_mission(&self) -> Result<String, ContentError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    fn narrate(&self, _text: &str) -> Result<SpeechClip, ContentError> {
        Err(ContentError::Unavailable("no speech backend".into()))
    }
}
