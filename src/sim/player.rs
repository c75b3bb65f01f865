//! Player state: discrete cell index plus the in-flight jump

use glam::{Vec3, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::motion::{ColorFlash, JumpMotion, JumpStep};
use crate::error::ConfigError;
use crate::presenter::Presenter;
use crate::settings::Settings;

/// Resting body tint (opaque red)
pub const BASE_TINT: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// Stream offset so tint draws never share a sequence with road generation
const TINT_STREAM: u64 = 0x7147;

/// Notification raised when a jump lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpEnded {
    pub landing_index: u32,
}

/// The jumping character
#[derive(Debug, Clone)]
pub struct PlayerState {
    motion: JumpMotion,
    flash: Option<ColorFlash>,
    tint: Vec4,
    position: Vec3,
    /// Cell the player stands on, or will land on while jumping
    current_index: u32,
    /// Cell size and fallback jump durations
    settings: Settings,
    /// Cosmetic only
    tint_rng: Pcg32,
}

impl PlayerState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            motion: JumpMotion::new(),
            flash: None,
            tint: BASE_TINT,
            position: Vec3::ZERO,
            current_index: 0,
            settings: settings.clone(),
            tint_rng: Pcg32::seed_from_u64(settings.seed ^ TINT_STREAM),
        }
    }

    /// Jump duration for `step`: the presenter's clip length when it has a
    /// usable one, else the configured fallback
    pub fn duration_for_step<P: Presenter + ?Sized>(&self, step: JumpStep, presenter: &P) -> f32 {
        let fallback = self.settings.step_duration(step);
        match presenter.clip_duration(step) {
            Some(duration) if duration.is_finite() && duration > 0.0 => duration,
            Some(duration) => {
                log::warn!(
                    "Ignoring clip duration {} for {:?}, using {}",
                    duration,
                    step,
                    fallback
                );
                fallback
            }
            None => fallback,
        }
    }

    /// Start a jump. The landing index is reserved immediately.
    ///
    /// Returns the reserved landing index, or `None` if a jump is already in flight.
    pub fn request_jump<P: Presenter + ?Sized>(
        &mut self,
        step: JumpStep,
        presenter: &mut P,
    ) -> Result<Option<u32>, ConfigError> {
        if self.motion.is_jumping() {
            return Ok(None);
        }

        let duration = self.duration_for_step(step, &*presenter);
        if !self
            .motion
            .start(step, duration, self.position, self.settings.cell_size)?
        {
            return Ok(None);
        }

        presenter.play_animation(step, duration);
        let flash_color = Vec4::new(
            self.tint_rng.random::<f32>(),
            self.tint_rng.random::<f32>(),
            self.tint_rng.random::<f32>(),
            self.tint_rng.random::<f32>(),
        );
        self.flash = Some(ColorFlash::new(BASE_TINT, flash_color, duration));

        self.current_index += step.cells() as u32;
        Ok(Some(self.current_index))
    }

    /// Advance the jump. Returns the landing notification on the tick the jump ends.
    pub fn advance<P: Presenter + ?Sized>(&mut self, dt: f32, presenter: &mut P) -> Option<JumpEnded> {
        if !self.motion.is_jumping() {
            return None;
        }

        if let Some(flash) = &mut self.flash {
            self.tint = flash.advance(dt);
            presenter.set_player_tint(self.tint);
        }

        let sample = self.motion.advance(dt);
        self.position = sample.position;
        if sample.in_progress {
            return None;
        }

        self.position = self.motion.target();
        self.flash = None;
        if self.tint != BASE_TINT {
            self.tint = BASE_TINT;
            presenter.set_player_tint(BASE_TINT);
        }
        Some(JumpEnded {
            landing_index: self.current_index,
        })
    }

    /// Back to cell 0 with no jump in flight
    pub fn reset<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.motion.cancel(Vec3::ZERO);
        self.flash = None;
        self.tint = BASE_TINT;
        presenter.set_player_tint(BASE_TINT);
        self.current_index = 0;
        self.position = Vec3::ZERO;
    }

    pub fn is_jumping(&self) -> bool {
        self.motion.is_jumping()
    }

    pub fn current_index(&self) -> u32 {
        self.current_index
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn tint(&self) -> Vec4 {
        self.tint
    }

    pub fn motion(&self) -> &JumpMotion {
        &self.motion
    }
}
