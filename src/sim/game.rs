//! Game controller and state machine
//!
//! ```text
//! INIT --start--> PLAYING --gap/overshoot--> END --(immediately)--> INIT
//! ```
//!
//! END never lingers: it records the result and re-enters INIT in the same call.

use std::collections::VecDeque;

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::motion::JumpStep;
use super::player::PlayerState;
use super::road::{Landing, Road, generate_road};
use crate::consts::MAX_QUEUED_EVENTS;
use crate::error::ConfigError;
use crate::presenter::Presenter;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Road generated, waiting for start
    Init,
    /// Active gameplay
    Playing,
    /// Run ended (momentary)
    End,
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoadGenerated { length: usize },
    RunStarted,
    InputEnabled,
    JumpStarted { step: JumpStep, landing_index: u32 },
    JumpEnded { landing_index: u32 },
    GameOver { landing_index: u32, cause: Landing },
    GameReset,
}

/// Session totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub runs_finished: u32,
    /// Highest step count shown at the end of a run
    pub best_steps: u32,
}

/// Owns the road, the player and the phase
pub struct GameController<P: Presenter> {
    settings: Settings,
    presenter: P,
    phase: GamePhase,
    road: Road,
    player: PlayerState,
    /// Seeds a fresh generator for every road
    seed_rng: Pcg32,
    input_enabled: bool,
    /// Seconds until input is enabled, if scheduled
    input_grace: Option<f32>,
    step_display: u32,
    stats: RunStats,
    /// Bounded; the oldest events go first when nobody drains
    events: VecDeque<GameEvent>,
}

impl<P: Presenter> GameController<P> {
    /// Create a controller and enter INIT
    pub fn new(settings: Settings, presenter: P) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut game = Self {
            seed_rng: Pcg32::seed_from_u64(settings.seed),
            player: PlayerState::new(&settings),
            settings,
            presenter,
            phase: GamePhase::Init,
            road: Road::empty(),
            input_enabled: false,
            input_grace: None,
            step_display: 0,
            stats: RunStats::default(),
            events: VecDeque::new(),
        };
        game.enter_init();
        Ok(game)
    }

    fn set_phase(&mut self, phase: GamePhase) {
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        match phase {
            GamePhase::Init => {
                self.enter_init();
                self.emit(GameEvent::GameReset);
            }
            GamePhase::Playing => {
                self.presenter.set_start_affordance_visible(false);
                self.step_display = 0;
                self.presenter.set_step_display(0);
                // Deferred so the start press isn't read as a jump
                self.input_grace = Some(self.settings.input_grace_delay);
                self.emit(GameEvent::RunStarted);
            }
            GamePhase::End => {
                self.stats.runs_finished += 1;
                self.stats.best_steps = self.stats.best_steps.max(self.step_display);
                self.set_phase(GamePhase::Init);
            }
        }
    }

    fn enter_init(&mut self) {
        self.input_grace = None;

        let mut road_rng = Pcg32::seed_from_u64(self.seed_rng.next_u64());
        let road = match generate_road(self.settings.road_length, &mut road_rng) {
            Ok(road) => road,
            Err(err) => {
                log::warn!("Road generation failed ({}), using an empty road", err);
                Road::empty()
            }
        };
        self.install_road(road);

        self.presenter.set_start_affordance_visible(true);
        self.set_input_enabled(false);
        self.player.reset(&mut self.presenter);
    }

    fn install_road(&mut self, road: Road) {
        self.presenter.clear_visuals();
        for (index, &kind) in road.cells().iter().enumerate() {
            self.presenter.spawn_visual(index, kind);
        }
        log::info!("Road generated: {} cells", road.len());
        self.emit(GameEvent::RoadGenerated { length: road.len() });
        self.road = road;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.presenter.set_input_enabled(enabled);
    }

    /// Replace the generated road with a specific one (replays, authored levels).
    ///
    /// Only allowed in INIT; returns false otherwise.
    pub fn replace_road(&mut self, road: Road) -> bool {
        if self.phase != GamePhase::Init {
            log::debug!("Ignoring road replacement during {:?}", self.phase);
            return false;
        }
        self.install_road(road);
        true
    }

    /// Start intent. Ignored outside INIT.
    pub fn on_start(&mut self) {
        if self.phase != GamePhase::Init {
            log::debug!("Ignoring start during {:?}", self.phase);
            return;
        }
        self.set_phase(GamePhase::Playing);
    }

    /// Abandon the current run and go back to INIT with a new road.
    /// Does not count as a finished run.
    pub fn restart(&mut self) {
        self.set_phase(GamePhase::Init);
    }

    /// Jump intent. Ignored unless playing with input enabled.
    pub fn on_jump_intent(&mut self, step: JumpStep) {
        if self.phase != GamePhase::Playing || !self.input_enabled {
            log::debug!("Ignoring {:?} jump: input disabled", step);
            return;
        }
        match self.player.request_jump(step, &mut self.presenter) {
            Ok(Some(landing_index)) => {
                self.emit(GameEvent::JumpStarted {
                    step,
                    landing_index,
                });
            }
            Ok(None) => log::debug!("Ignoring {:?} jump: already jumping", step),
            Err(err) => log::warn!("Jump rejected: {}", err),
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if let Some(remaining) = self.input_grace.take() {
            let remaining = remaining - dt.max(0.0);
            if remaining <= 0.0 {
                self.set_input_enabled(true);
                self.emit(GameEvent::InputEnabled);
            } else {
                self.input_grace = Some(remaining);
            }
        }

        if let Some(ended) = self.player.advance(dt, &mut self.presenter) {
            self.on_jump_ended(ended.landing_index);
        }
    }

    fn on_jump_ended(&mut self, landing_index: u32) {
        self.emit(GameEvent::JumpEnded { landing_index });

        let road_length = self.road.len() as u32;
        self.step_display = landing_index.min(road_length);
        self.presenter.set_step_display(self.step_display);

        self.check_result(landing_index);
    }

    fn check_result(&mut self, landing_index: u32) {
        let cause = self.road.judge(landing_index as usize);
        if cause == Landing::Safe {
            return;
        }
        log::info!("Run over at cell {}: {:?}", landing_index, cause);
        self.emit(GameEvent::GameOver {
            landing_index,
            cause,
        });
        self.set_phase(GamePhase::End);
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.len() == MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take all events queued since the last drain, oldest first.
    ///
    /// Hosts that only use `Presenter` callbacks may never call this; the queue
    /// then keeps just the newest `MAX_QUEUED_EVENTS` events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn road(&self) -> &Road {
        &self.road
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn step_display(&self) -> u32 {
        self.step_display
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
