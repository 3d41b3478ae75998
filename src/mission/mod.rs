//! Mission content: what the provider sends and what the range falls back to.
//!
//! A mission is immutable once loaded. The simulation only reads it to build
//! the roster, seed the objective tracker and set the wind.

pub mod error;
pub mod roster;

use serde::Deserialize;

use crate::sim::objectives::{Objective, ObjectiveKind};

pub use error::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Urban,
    Desert,
    Arctic,
    Jungle,
    Night,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub title: String,
    pub briefing: String,
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub environment: Environment,
    /// Arbitrary units; scales aim drift.
    #[serde(default)]
    pub wind_speed: f32,
    /// Degrees, 0 = toward +x.
    #[serde(default)]
    pub wind_direction: f32,
}

/// Upper bound on provider wind so a bad payload cannot make aiming impossible.
const MAX_WIND: f32 = 30.0;

impl Mission {
    /// Parse and validate a provider payload.
    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let mut mission: Self = serde_json::from_str(text)?;
        mission.validate()?;
        Ok(mission)
    }

    fn validate(&mut self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::Invalid("empty title"));
        }
        if self.objectives.is_empty() {
            return Err(ContentError::Invalid("no objectives"));
        }
        if self.objectives.iter().any(|o| o.description.trim().is_empty()) {
            return Err(ContentError::Invalid("objective without description"));
        }
        if !self.wind_speed.is_finite() || !self.wind_direction.is_finite() {
            return Err(ContentError::Invalid("non-finite wind"));
        }
        self.wind_speed = self.wind_speed.clamp(0.0, MAX_WIND);
        Ok(())
    }

    /// Built-in mission used whenever the provider fails. Always the same.
    pub fn fallback() -> Self {
        let objective = |id: &str, kind: ObjectiveKind, description: &str| Objective {
            id: id.into(),
            kind,
            description: description.into(),
        };

        Self {
            title: "Operation Quiet Harbor".into(),
            briefing: "Command link is down; running the standing orders. A courier \
                       is meeting the target at the harbor depot. Cut their fuel, \
                       take the intel, then remove the target. Watch the guards."
                .into(),
            objectives: vec![
                objective("fuel", ObjectiveKind::Destroy, "Destroy the fuel drum by the depot"),
                objective("intel", ObjectiveKind::Retrieve, "Secure the intel case"),
                objective("target", ObjectiveKind::Eliminate, "Eliminate the primary target"),
            ],
            environment: Environment::Urban,
            wind_speed: 4.0,
            wind_direction: 90.0,
        }
    }
}
