//! Physics module.
//!
//! Custom fixed-step physics for the voxel sandbox, built from scratch
//! without an external physics dependency.
//!
//! # Unit System
//!
//! **1 unit = 1 block edge**, **1 time unit = 1 tick** (20 ticks per
//! second):
//!
//! - Distances in blocks
//! - Velocities in blocks/tick
//! - Accelerations in blocks/tick²
//!
//! # Submodules
//!
//! - [`types`] - core mathematical types re-exported from glam, plus small
//!   pure geometry helpers
//! - [`raycast`] - DDA voxel ray traversal and distance sensing
//! - [`collision`] - footprint sampling and per-axis collision resolution
//!   for the player volume
//! - [`tick`] - the fixed-step driver composing gravity, movement, and
//!   friction

pub mod collision;
pub mod raycast;
pub mod tick;
pub mod types;

// Re-export commonly used items at the physics module level
pub use collision::{GRAVITY, TERMINAL_VELOCITY, footprint_cells, is_standing};
pub use raycast::{RayHit, distance_to_first_block, first_block_along_ray};
pub use tick::{SUBSTEP_DELTA, SUBSTEPS_PER_TICK, step};
pub use types::{IVec3, Vec2, Vec3};
