//! Game Module
//!
//! Episode-level systems that build on top of the engine: the Gym-style
//! driver mapping action vectors onto engine calls and engine state onto
//! bounded observation vectors with shaped rewards.

pub mod env;

pub use env::{
    ACTION_SIZE, Action, ChopEnv, EpisodeConfig, OBSERVATION_SIZE, Step,
};
