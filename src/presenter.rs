//! Host-side collaborator interface
//!
//! The simulation never draws anything. Whatever renders the game implements
//! [`Presenter`] and receives requests from the controller and player. Every
//! method has a no-op default, so a host only implements what it can show.

use glam::Vec4;

use crate::sim::{CellKind, JumpStep};

/// Visual/animation backend driven by the simulation
pub trait Presenter {
    /// A cell visual should exist at `cell_index` (called once per cell per road)
    fn spawn_visual(&mut self, _cell_index: usize, _kind: CellKind) {}

    /// Remove every cell visual from the previous road
    fn clear_visuals(&mut self) {}

    /// Play the jump animation clip for `step`, lasting `duration` seconds
    fn play_animation(&mut self, _step: JumpStep, _duration: f32) {}

    /// Update the step counter shown to the player
    fn set_step_display(&mut self, _value: u32) {}

    /// Show or hide the start menu/button
    fn set_start_affordance_visible(&mut self, _visible: bool) {}

    /// Start or stop listening for jump input
    fn set_input_enabled(&mut self, _enabled: bool) {}

    /// Cosmetic tint of the player body (RGBA, 0-1)
    fn set_player_tint(&mut self, _rgba: Vec4) {}

    /// Length of the animation clip for `step`, if the backend has one.
    /// Jump motion is timed to match it.
    fn clip_duration(&self, _step: JumpStep) -> Option<f32> {
        None
    }
}

/// Presenter that ignores every request
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// Presenter that logs requests, for headless runs
#[derive(Debug, Clone, Default)]
pub struct LogPresenter {
    /// Cells spawned for the current road (rendered as a strip in the log)
    strip: String,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current road as text: `#` solid, `_` gap
    pub fn strip(&self) -> &str {
        &self.strip
    }
}

impl Presenter for LogPresenter {
    fn spawn_visual(&mut self, _cell_index: usize, kind: CellKind) {
        self.strip.push(match kind {
            CellKind::Solid => '#',
            CellKind::Gap => '_',
        });
    }

    fn clear_visuals(&mut self) {
        self.strip.clear();
    }

    fn play_animation(&mut self, step: JumpStep, duration: f32) {
        log::debug!("animation: {:?} over {:.3}s", step, duration);
    }

    fn set_step_display(&mut self, value: u32) {
        log::info!("steps: {}", value);
    }

    fn set_start_affordance_visible(&mut self, visible: bool) {
        if visible {
            log::info!("road: {}", self.strip);
        }
        log::debug!("start menu visible: {}", visible);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        log::debug!("input enabled: {}", enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_presenter_tracks_strip() {
        let mut presenter = LogPresenter::new();
        presenter.spawn_visual(0, CellKind::Solid);
        presenter.spawn_visual(1, CellKind::Gap);
        presenter.spawn_visual(2, CellKind::Solid);
        assert_eq!(presenter.strip(), "#_#");

        presenter.clear_visuals();
        assert_eq!(presenter.strip(), "");
    }

    #[test]
    fn test_null_presenter_has_no_clips() {
        assert_eq!(NullPresenter.clip_duration(JumpStep::One), None);
        assert_eq!(NullPresenter.clip_duration(JumpStep::Two), None);
    }
}
