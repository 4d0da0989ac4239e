//! Tree-Chop Engine Library
//!
//! A tiny fixed-step voxel world - a 9×9×9 grid, one agent, one tree -
//! built for reinforcement-learning rollouts and headless simulation. The
//! engine covers gravity and collision against the grid, voxel ray
//! traversal for look queries and distance sensors, and hardness-timed
//! block breaking. Rendering, control glue, and training loops live
//! outside and talk to the engine through [`Simulation`].
//!
//! # Modules
//!
//! - [`world`] - block types, the voxel grid, and one-shot world seeding
//! - [`physics`] - ray traversal, collision resolution, and the tick driver
//! - [`player`] - player state, movement intents, and block breaking
//! - [`simulation`] - the owning facade collaborators call into
//!
//! # Example
//!
//! ```ignore
//! use treechop_engine::{MoveDirection, Simulation};
//!
//! let mut sim = Simulation::with_seed(42);
//! sim.set_look_rotation(0.0, std::f32::consts::FRAC_PI_2);
//!
//! // One nominal tick = ten 0.1-tick physics sub-steps.
//! sim.apply_move_intent(MoveDirection::Forward);
//! for _ in 0..10 {
//!     sim.step(0.1);
//! }
//!
//! // Chop whatever the agent is looking at.
//! if let Some(block) = sim.attack(0.1) {
//!     println!("chopped {}", block.name());
//! }
//! ```

pub mod physics;
pub mod player;
pub mod simulation;
pub mod world;

// Episode-driver modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export the simulation facade and the types its signatures use
pub use simulation::Simulation;
pub use world::{BlockType, VoxelGrid, WORLD_SIZE};
pub use player::{MoveDirection, Player};
pub use physics::RayHit;
