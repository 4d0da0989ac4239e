//! Headless Episode Runner
//!
//! Run with: `cargo run --bin chop-sim [config.json]`
//!
//! Drives one episode with a scripted policy that aims at the target block
//! using the observation's angle channels, walks toward it, and holds the
//! attack input. Progress is logged through `env_logger` (`RUST_LOG=info`)
//! and a JSON summary is printed when the episode ends.
//!
//! The optional argument is an `EpisodeConfig` JSON file, e.g.:
//!
//! ```json
//! { "max_episode_steps": 200, "seed": 7, "fixed_tree_height": 3 }
//! ```

use std::process::ExitCode;

use serde::Serialize;

use treechop_engine::game::{Action, ChopEnv, EpisodeConfig, OBSERVATION_SIZE};

/// End-of-episode report printed to stdout.
#[derive(Serialize)]
struct EpisodeSummary {
    steps: u32,
    total_reward: f32,
    wood_remaining: u32,
    out_of_bounds: bool,
}

fn load_config(path: &str) -> Result<EpisodeConfig, String> {
    let text =
        std::fs::read_to_string(path).map_err(|err| format!("cannot read {path}: {err}"))?;
    serde_json::from_str(&text).map_err(|err| format!("invalid config {path}: {err}"))
}

/// Turns the latest observation into the next action.
///
/// The yaw/pitch observation channels are exactly the normalized angles
/// toward the target block, so feeding them back as rotation controls
/// centers the view on it (the `- 1.0` undoes the action channel's yaw
/// offset; the simulation wraps the angle). Walk while the target is more
/// than a block away, attack the whole time.
fn scripted_action(observation: &[f32; OBSERVATION_SIZE]) -> Action {
    Action {
        attack: true,
        forward: observation[1] > 0.25,
        jump: false,
        left: false,
        right: false,
        pitch_control: observation[3],
        yaw_control: observation[2] - 1.0,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(message) => {
                eprintln!("{message}");
                return ExitCode::FAILURE;
            }
        },
        None => EpisodeConfig::default(),
    };

    let mut env = ChopEnv::new(config);
    let mut observation = env.observation();
    let mut total_reward = 0.0;

    loop {
        let action = scripted_action(&observation);
        let step = env.step(&action);
        total_reward += step.reward;
        observation = step.observation;

        log::info!(
            "step {:>3}  reward {:+.3}  wood left {}",
            env.steps_taken(),
            step.reward,
            env.simulation().wood_remaining()
        );

        if step.done {
            break;
        }
    }

    let summary = EpisodeSummary {
        steps: env.steps_taken(),
        total_reward,
        wood_remaining: env.simulation().wood_remaining(),
        out_of_bounds: env.simulation().is_out_of_bounds(),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("cannot serialize summary: {err}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
