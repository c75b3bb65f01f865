//! Road Hop headless runner
//!
//! Plays a few runs with an autopilot at a fixed timestep and logs what a
//! renderer would have been asked to show. Usage:
//!
//! ```text
//! RUST_LOG=info road-hop [settings.json] [runs]
//! ```

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use road_hop::consts::SIM_DT;
use road_hop::sim::{GameController, GameEvent, JumpStep, Landing};
use road_hop::{ConfigError, LogPresenter, Settings};

/// Chance the autopilot picks the wrong jump
const MISTAKE_CHANCE: f64 = 0.05;
/// Hard stop per run (ten simulated minutes)
const MAX_TICKS_PER_RUN: u32 = 60 * 60 * 10;

fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => Settings::from_json(&json),
            Err(err) => {
                log::warn!("Can't read {}: {}, using defaults", path, err);
                Ok(Settings::default())
            }
        },
        None => Ok(Settings::default()),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match load_settings(args.first().map(String::as_str)) {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Invalid settings: {}", err);
            std::process::exit(1);
        }
    };
    let runs: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    log::info!("Road Hop (headless) starting, seed {}", settings.seed);
    let mut pilot_rng = Pcg32::seed_from_u64(settings.seed.wrapping_add(1));
    let mut game = match GameController::new(settings, LogPresenter::new()) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Can't create game: {}", err);
            std::process::exit(1);
        }
    };

    for run in 1..=runs {
        play_run(&mut game, &mut pilot_rng, run);
    }

    let stats = game.stats();
    println!(
        "{} runs finished, best {} steps",
        stats.runs_finished, stats.best_steps
    );
}

/// Single step onto solid ground when possible, otherwise clear the gap.
/// Past the last cell any jump ends the run.
fn next_step(game: &GameController<LogPresenter>) -> JumpStep {
    let next = game.player().current_index() as usize + 1;
    match game.road().judge(next) {
        Landing::Gap => JumpStep::Two,
        Landing::Safe | Landing::Overshoot => JumpStep::One,
    }
}

fn play_run(game: &mut GameController<LogPresenter>, pilot_rng: &mut Pcg32, run: u32) {
    game.on_start();

    for _ in 0..MAX_TICKS_PER_RUN {
        game.advance(SIM_DT);

        if game.input_enabled() && !game.player().is_jumping() {
            let mut step = next_step(game);
            if pilot_rng.random_bool(MISTAKE_CHANCE) {
                step = match step {
                    JumpStep::One => JumpStep::Two,
                    JumpStep::Two => JumpStep::One,
                };
            }
            game.on_jump_intent(step);
        }

        for event in game.drain_events() {
            if let GameEvent::GameOver {
                landing_index,
                cause,
            } = event
            {
                println!("run {}: {:?} at cell {}", run, cause, landing_index);
                return;
            }
        }
    }
    log::warn!("Run {} hit the tick limit", run);
    game.restart();
}
