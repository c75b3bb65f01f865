//! Configuration and road validation errors

/// Everything that can be rejected while configuring a session or building a road.
///
/// Ignored input (a jump while one is in flight, a start outside INIT) is not an
/// error and never shows up here.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Road length must be at least one cell
    #[error("road length must be at least 1 cell, got {length}")]
    RoadTooShort { length: u32 },

    #[error("road length {length} exceeds the maximum of {max} cells")]
    RoadTooLong { length: u32, max: u32 },

    #[error("cell size must be positive and finite, got {0}")]
    NonPositiveCellSize(f32),

    /// Jump durations drive speed, so they must be finite and non-zero
    #[error("duration for a {step}-cell jump must be positive and finite, got {duration}")]
    NonPositiveDuration { step: u8, duration: f32 },

    #[error("input grace delay must not be negative, got {0}")]
    NegativeGraceDelay(f32),

    #[error("jump step must be 1 or 2, got {0}")]
    InvalidStep(u8),

    #[error("road must start on a solid cell")]
    StartsOnGap,

    /// Two gaps in a row cannot be cleared by a two-cell jump
    #[error("gap at cell {index} follows another gap")]
    ConsecutiveGaps { index: usize },

    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
}
