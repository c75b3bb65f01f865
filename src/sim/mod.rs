//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `advance(dt)`
//! - Seeded RNG only
//! - No rendering or platform dependencies (those go through `Presenter`)

pub mod game;
pub mod motion;
pub mod player;
pub mod road;

pub use game::{GameController, GameEvent, GamePhase, RunStats};
pub use motion::{ColorFlash, JumpMotion, JumpStep, MotionSample};
pub use player::{JumpEnded, PlayerState, BASE_TINT};
pub use road::{CellKind, Landing, Road, generate_road};
