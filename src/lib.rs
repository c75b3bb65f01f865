//! Road Hop - An endless jump-the-gaps arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (road generation, jump motion, game state)
//! - `presenter`: Host-side rendering/animation collaborator interface
//! - `settings`: Session configuration with JSON load/save
//! - `error`: Configuration and road validation errors

pub mod error;
pub mod presenter;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use presenter::{LogPresenter, NullPresenter, Presenter};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default number of cells in a generated road
    pub const DEFAULT_ROAD_LENGTH: u32 = 50;
    /// Longest road a session may ask for
    pub const MAX_ROAD_LENGTH: u32 = 100_000;
    /// Width of one cell in world units
    pub const CELL_SIZE: f32 = 40.0;

    /// Fallback jump durations (seconds) when the animation source has none
    pub const ONE_STEP_DURATION: f32 = 0.1;
    pub const TWO_STEP_DURATION: f32 = 0.2;

    /// Delay between pressing start and accepting jump input, so the press
    /// itself is never read as a jump
    pub const INPUT_GRACE_DELAY: f32 = 0.1;

    /// Seed used when the settings don't provide one
    pub const DEFAULT_SEED: u64 = 0x5EED_0F_20AD;

    /// Oldest events are dropped past this many undrained ones
    pub const MAX_QUEUED_EVENTS: usize = 256;
}
