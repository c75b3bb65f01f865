//! Session settings
//!
//! Loaded from JSON by the host (or left at defaults). Jump durations here are
//! only the fallback; the animation source normally supplies them.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::JumpStep;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of cells in each generated road
    pub road_length: u32,
    /// Width of one cell in world units
    pub cell_size: f32,

    // === Jump timing ===
    /// Duration of a one-cell jump (seconds)
    pub one_step_duration: f32,
    /// Duration of a two-cell jump (seconds)
    pub two_step_duration: f32,
    /// Delay after start before jump input is accepted (seconds)
    pub input_grace_delay: f32,

    /// Seed for the road generator
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            road_length: DEFAULT_ROAD_LENGTH,
            cell_size: CELL_SIZE,

            one_step_duration: ONE_STEP_DURATION,
            two_step_duration: TWO_STEP_DURATION,
            input_grace_delay: INPUT_GRACE_DELAY,

            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Configured duration for a jump of the given length
    pub fn step_duration(&self, step: JumpStep) -> f32 {
        match step {
            JumpStep::One => self.one_step_duration,
            JumpStep::Two => self.two_step_duration,
        }
    }

    /// Reject values the motion model can't work with, and roads too long to
    /// allocate.
    ///
    /// A zero road length is not rejected here: the controller degrades it to
    /// an empty road.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.road_length > MAX_ROAD_LENGTH {
            return Err(ConfigError::RoadTooLong {
                length: self.road_length,
                max: MAX_ROAD_LENGTH,
            });
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::NonPositiveCellSize(self.cell_size));
        }
        for step in [JumpStep::One, JumpStep::Two] {
            let duration = self.step_duration(step);
            if !duration.is_finite() || duration <= 0.0 {
                return Err(ConfigError::NonPositiveDuration {
                    step: step.cells(),
                    duration,
                });
            }
        }
        if self.input_grace_delay < 0.0 || self.input_grace_delay.is_nan() {
            return Err(ConfigError::NegativeGraceDelay(self.input_grace_delay));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: road_length={}, cell_size={}, seed={}",
            settings.road_length,
            settings.cell_size,
            settings.seed
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
