//! Timed jump motion
//!
//! A jump moves the player a whole number of cells along +X at constant speed.
//! The speed is derived from the jump's duration so the simulated landing lines
//! up with the animation clip.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Length of a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpStep {
    One,
    Two,
}

impl JumpStep {
    /// Number of cells covered
    pub fn cells(self) -> u8 {
        match self {
            JumpStep::One => 1,
            JumpStep::Two => 2,
        }
    }
}

impl TryFrom<u8> for JumpStep {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(JumpStep::One),
            2 => Ok(JumpStep::Two),
            other => Err(ConfigError::InvalidStep(other)),
        }
    }
}

/// Result of advancing a motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub in_progress: bool,
    pub position: Vec3,
}

/// Linear motion from one cell to another
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JumpMotion {
    is_jumping: bool,
    step: Option<JumpStep>,
    elapsed: f32,
    duration: f32,
    /// World units per second along +X
    speed: f32,
    start_pos: Vec3,
    target_pos: Vec3,
    /// Last reported position
    position: Vec3,
}

impl JumpMotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a jump of `step` cells from `origin`.
    ///
    /// Returns `Ok(false)` without touching anything if a jump is already in flight.
    pub fn start(
        &mut self,
        step: JumpStep,
        duration: f32,
        origin: Vec3,
        cell_size: f32,
    ) -> Result<bool, ConfigError> {
        if self.is_jumping {
            return Ok(false);
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ConfigError::NonPositiveDuration {
                step: step.cells(),
                duration,
            });
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(ConfigError::NonPositiveCellSize(cell_size));
        }

        let distance = step.cells() as f32 * cell_size;
        self.is_jumping = true;
        self.step = Some(step);
        self.elapsed = 0.0;
        self.duration = duration;
        self.speed = distance / duration;
        self.start_pos = origin;
        self.target_pos = origin + Vec3::X * distance;
        self.position = origin;
        Ok(true)
    }

    /// Advance by `dt` seconds.
    ///
    /// The motion completes on the first call where total elapsed time exceeds
    /// the duration; the position is then exactly the target. Once complete,
    /// further calls keep returning the target.
    pub fn advance(&mut self, dt: f32) -> MotionSample {
        if !self.is_jumping {
            return MotionSample {
                in_progress: false,
                position: self.position,
            };
        }

        self.elapsed += dt.max(0.0);
        if self.elapsed > self.duration {
            // Snap to avoid float overshoot
            self.position = self.target_pos;
            self.is_jumping = false;
        } else {
            self.position = self.start_pos + Vec3::X * (self.speed * self.elapsed);
        }

        MotionSample {
            in_progress: self.is_jumping,
            position: self.position,
        }
    }

    /// Drop any in-flight motion and park at `position`
    pub fn cancel(&mut self, position: Vec3) {
        *self = Self {
            position,
            target_pos: position,
            start_pos: position,
            ..Self::default()
        };
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    /// Step of the current or most recent jump
    pub fn step(&self) -> Option<JumpStep> {
        self.step
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target_pos
    }
}

/// Decorative tint pulse played during a jump: base → flash → base.
///
/// Each leg runs at double speed, so the whole pulse fits in one jump duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorFlash {
    base: Vec4,
    flash: Vec4,
    duration: f32,
    elapsed: f32,
}

impl ColorFlash {
    pub fn new(base: Vec4, flash: Vec4, duration: f32) -> Self {
        Self {
            base,
            flash,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance and return the current tint
    pub fn advance(&mut self, dt: f32) -> Vec4 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.color()
    }

    pub fn color(&self) -> Vec4 {
        if self.duration <= 0.0 {
            return self.base;
        }
        let half = self.duration / 2.0;
        if self.elapsed <= half {
            self.base.lerp(self.flash, self.elapsed / half)
        } else {
            self.flash.lerp(self.base, (self.elapsed - half) / half)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
