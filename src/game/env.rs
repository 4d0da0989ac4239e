//! Gym-style episode driver.
//!
//! Wraps a [`Simulation`] in an episodic loop for reinforcement-learning
//! rollouts: each step decodes a 7-float action vector, runs one nominal
//! tick of physics (ten 0.1-tick sub-steps), applies the attack input, and
//! returns a bounded observation vector plus a shaped reward.
//!
//! The driver talks to the engine exclusively through the `Simulation`
//! interface; it holds no physics knowledge of its own beyond the tick
//! subdivision constants.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::physics::TERMINAL_VELOCITY;
use crate::physics::tick::{SUBSTEP_DELTA, SUBSTEPS_PER_TICK};
use crate::physics::types::distance_to_cell;
use crate::player::{BREAKING_RANGE, MoveDirection};
use crate::simulation::Simulation;
use crate::world::{BlockType, MAX_TREE_HEIGHT};

/// One-time bonus for centering the view on the current target block; ends
/// the episode as a success.
pub const REWARD_LOOK_AT_TARGET: f32 = 100.0;

/// Shaping reward per block of horizontal progress toward the tree.
pub const REWARD_APPROACH_TREE: f32 = 1.0;

/// Small encouragement for walking at all.
pub const REWARD_MOVE: f32 = 0.01;

/// Cost of letting a tick pass.
pub const PENALTY_TICK: f32 = -0.04;

/// Destroying a ground block is wasted effort.
pub const PENALTY_WRONG_BLOCK: f32 = -5.0;

/// Analog action channels count as pressed above this value.
const TRIGGER_THRESHOLD: f32 = 0.5;

/// Distances to the target block are reported relative to this range.
const DISTANCE_SCALE: f32 = 5.0;

/// Reach of the feet-level "kicking" probe.
const KICK_RANGE: f32 = 0.5;

/// Elements in an observation vector.
pub const OBSERVATION_SIZE: usize = 7;

/// Elements in an action vector.
pub const ACTION_SIZE: usize = 7;

/// Decoded agent intent for one episode step.
///
/// The raw policy output is a vector of seven floats in `[-1, 1]`: five
/// trigger channels (attack, forward, jump, strafe left, strafe right) and
/// two rotation channels mapped onto the full pitch and yaw ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Action {
    pub attack: bool,
    pub forward: bool,
    pub jump: bool,
    pub left: bool,
    pub right: bool,
    /// Pitch control in `[-1, 1]`, mapped to `[0, π]` (down to up).
    pub pitch_control: f32,
    /// Yaw control in `[-1, 1]`, mapped to `[0, 2π]`.
    pub yaw_control: f32,
}

impl Action {
    /// Decodes a raw policy output vector.
    pub fn from_vector(raw: &[f32; ACTION_SIZE]) -> Self {
        Self {
            attack: raw[0] > TRIGGER_THRESHOLD,
            forward: raw[1] > TRIGGER_THRESHOLD,
            jump: raw[2] > TRIGGER_THRESHOLD,
            left: raw[3] > TRIGGER_THRESHOLD,
            right: raw[4] > TRIGGER_THRESHOLD,
            pitch_control: raw[5],
            yaw_control: raw[6],
        }
    }
}

/// Episode setup, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    /// Step budget before the episode is cut off.
    pub max_episode_steps: u32,
    /// End the episode as soon as one wood block is chopped.
    pub end_after_one_block: bool,
    /// Fixed tree height; `None` draws a fresh height each reset.
    pub fixed_tree_height: Option<u32>,
    /// RNG seed for reproducible worlds; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_episode_steps: 50,
            end_after_one_block: true,
            fixed_tree_height: None,
            seed: None,
        }
    }
}

/// Result of one episode step.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub observation: [f32; OBSERVATION_SIZE],
    pub reward: f32,
    pub done: bool,
}

/// Episodic wrapper around one exclusively-owned simulation.
#[derive(Debug)]
pub struct ChopEnv {
    config: EpisodeConfig,
    rng: fastrand::Rng,
    sim: Simulation,
    /// Previous horizontal distance to the tree, for approach shaping.
    distance_to_center: f32,
    steps_taken: u32,
    /// Success flag set by look-at-target or a chopped block.
    finished: bool,
}

impl ChopEnv {
    /// Creates an environment and its first world.
    pub fn new(config: EpisodeConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let sim = Simulation::from_rng(&mut rng, config.fixed_tree_height);
        let distance_to_center = sim.distance_to_center();
        Self {
            config,
            rng,
            sim,
            distance_to_center,
            steps_taken: 0,
            finished: false,
        }
    }

    /// Starts a fresh episode and returns its first observation.
    ///
    /// Without a fixed tree height the new tree has 1 to
    /// [`MAX_TREE_HEIGHT`] blocks, so episodes see partially chopped trees
    /// too.
    pub fn reset(&mut self) -> [f32; OBSERVATION_SIZE] {
        let height = self
            .config
            .fixed_tree_height
            .unwrap_or_else(|| self.rng.u32(1..=MAX_TREE_HEIGHT));
        self.sim = Simulation::from_rng(&mut self.rng, Some(height));
        self.distance_to_center = self.sim.distance_to_center();
        self.steps_taken = 0;
        self.finished = false;
        self.observation()
    }

    /// Runs one episode step: movement and look inputs, one tick of
    /// physics, the attack input, then rewards and termination checks.
    pub fn step(&mut self, action: &Action) -> Step {
        let target = self.sim.next_wood_cell();
        let mut reward = 0.0;

        if !self.is_done() {
            if action.jump {
                self.sim.jump();
            }
            if action.forward {
                self.sim.apply_move_intent(MoveDirection::Forward);
                reward += REWARD_MOVE;
            }
            if action.left {
                self.sim.apply_move_intent(MoveDirection::Left);
            }
            if action.right {
                self.sim.apply_move_intent(MoveDirection::Right);
            }

            self.sim.set_look_rotation(
                (action.yaw_control + 1.0) * PI,
                (action.pitch_control + 1.0) / 2.0 * PI,
            );

            for _ in 0..SUBSTEPS_PER_TICK {
                self.sim.step(SUBSTEP_DELTA);
            }

            if action.attack {
                if let Some(block) = self.sim.attack(SUBSTEP_DELTA) {
                    match block {
                        BlockType::Wood => {
                            log::info!("chopped a full wood block");
                            if self.config.end_after_one_block {
                                self.finished = true;
                            }
                        }
                        BlockType::Leaf => {}
                        _ => reward += PENALTY_WRONG_BLOCK,
                    }
                }
            } else {
                self.sim.stop_attack();
            }

            // Centering the view on the target block is the episode's
            // success signal.
            let look = self.sim.query_look_target(1.0, BREAKING_RANGE, None);
            if target.is_some() && look.map(|hit| hit.cell) == target {
                log::info!("target block found");
                reward += REWARD_LOOK_AT_TARGET;
                self.finished = true;
            }

            let new_distance = self.sim.distance_to_center();
            reward += (self.distance_to_center - new_distance) * REWARD_APPROACH_TREE;
            self.distance_to_center = new_distance;

            reward += PENALTY_TICK;
        }

        self.steps_taken += 1;
        Step {
            observation: self.observation(),
            reward,
            done: self.is_done(),
        }
    }

    /// Whether the current episode is over (success, death, cleared world,
    /// or exhausted step budget).
    pub fn is_done(&self) -> bool {
        self.finished
            || self.sim.is_out_of_bounds()
            || self.sim.wood_remaining() == 0
            || self.steps_taken >= self.config.max_episode_steps
    }

    /// Steps taken in the current episode.
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    /// Builds the 7-element observation vector, every element clipped to
    /// `[-1, 1]`:
    ///
    /// 0. vertical velocity relative to terminal speed
    /// 1. distance to the target block, saturated at [`DISTANCE_SCALE`]
    /// 2. yaw the player would need to face the target, over π
    /// 3. pitch offset to the target, over π/2
    /// 4. looking at ground (breaking it is penalized)
    /// 5. looking at wood or leaf (breaking is free or rewarded)
    /// 6. a block is within kicking range at foot level
    pub fn observation(&self) -> [f32; OBSERVATION_SIZE] {
        let player = self.sim.player();
        let head = player.head_position();
        let mut obs = [0.0f32; OBSERVATION_SIZE];

        obs[0] = player.velocity.z / TERMINAL_VELOCITY;

        if let Some(target) = self.sim.next_wood_cell() {
            let distance = distance_to_cell(head, target);
            obs[1] = (distance / DISTANCE_SCALE).clamp(0.0, 1.0);

            // Angle to the target's column, measured like the look yaw.
            let dx = target.x as f32 + 0.5 - head.x;
            let dy = target.y as f32 + 0.5 - head.y;
            if dx != 0.0 || dy != 0.0 {
                let mut yaw_to_target = (dx / dy).atan() - FRAC_PI_2;
                if dy < 0.0 {
                    yaw_to_target += PI;
                }
                yaw_to_target = -yaw_to_target;
                obs[2] = yaw_to_target / PI;
            }

            if distance > 0.0 {
                let rise = (target.z as f32 + 0.5 - head.z).clamp(-distance, distance);
                let pitch_to_target = (rise / distance).asin();
                obs[3] = pitch_to_target / FRAC_PI_2;
            }
        }

        let looking_at = self
            .sim
            .query_look_target(1.0, BREAKING_RANGE, None)
            .map(|hit| hit.block);
        obs[4] = f32::from(looking_at == Some(BlockType::Ground));
        obs[5] = f32::from(matches!(
            looking_at,
            Some(BlockType::Wood) | Some(BlockType::Leaf)
        ));

        let kick_direction = player.horizontal_look_direction();
        let kicking = self
            .sim
            .query_look_target(0.0, KICK_RANGE, Some(kick_direction))
            .is_some();
        obs[6] = f32::from(kicking);

        for value in &mut obs {
            *value = value.clamp(-1.0, 1.0);
        }
        obs
    }
}
