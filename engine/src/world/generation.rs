//! One-shot world seeding.
//!
//! Populates an empty grid with a two-level ground layer (a full floor at
//! z = 0 plus random one-block bumps at z = 1) and a single tree at the
//! world center: a wood trunk with a two-tier leaf canopy around its top.
//!
//! Generation runs once per world; afterwards the grid only changes through
//! block breaking. All randomness flows through the caller's
//! [`fastrand::Rng`] so worlds are reproducible from a seed.

use glam::IVec3;

use crate::world::block::BlockType;
use crate::world::grid::{VoxelGrid, WORLD_SIZE};

/// Shortest tree the generator will grow.
pub const MIN_TREE_HEIGHT: u32 = 6;

/// Tallest tree the generator will grow. Taller trees can leave the top
/// blocks out of breaking range without scaffolding, so this stays at 6.
pub const MAX_TREE_HEIGHT: u32 = 6;

/// Center column of the world, where the tree trunk grows.
pub const CENTER: i32 = WORLD_SIZE as i32 / 2;

/// Seeds a fresh world and returns it with the generated tree height.
///
/// `tree_height` overrides the random trunk height; episode resets use it
/// to control task difficulty (a partially chopped tree is just a shorter
/// one).
pub fn generate_world(rng: &mut fastrand::Rng, tree_height: Option<u32>) -> (VoxelGrid, u32) {
    let mut grid = VoxelGrid::new();
    generate_ground(&mut grid, rng);
    let height = generate_tree(&mut grid, rng, tree_height);
    (grid, height)
}

/// Fills z = 0 entirely with ground and raises a random half of the columns
/// by one extra block.
fn generate_ground(grid: &mut VoxelGrid, rng: &mut fastrand::Rng) {
    for x in 0..WORLD_SIZE as i32 {
        for y in 0..WORLD_SIZE as i32 {
            let bump = rng.u32(0..=1) as i32;
            grid.set(IVec3::new(x, y, 0), BlockType::Ground);
            grid.set(IVec3::new(x, y, bump), BlockType::Ground);
        }
    }
}

/// Grows the trunk from z = 1 upward and hangs the canopy off its top.
///
/// Canopy shape: a radius-1 ring at the trunk top and radius-2 rings on the
/// two levels below it. Rings that would reach below the trunk base are
/// silently clipped by the grid's bounds policy.
fn generate_tree(grid: &mut VoxelGrid, rng: &mut fastrand::Rng, height: Option<u32>) -> u32 {
    let height = height.unwrap_or_else(|| rng.u32(MIN_TREE_HEIGHT..=MAX_TREE_HEIGHT));

    for i in 0..height as i32 {
        grid.set(IVec3::new(CENTER, CENTER, 1 + i), BlockType::Wood);
    }

    let top = height as i32;
    generate_leaves(grid, 1, top);
    for z in [top - 1, top - 2] {
        generate_leaves(grid, 2, z);
    }

    height
}

/// Writes a square leaf ring of the given radius at level `z`, leaving the
/// center cell (the trunk) untouched.
fn generate_leaves(grid: &mut VoxelGrid, radius: i32, z: i32) {
    for y in 0..=radius {
        for x in 0..=radius {
            if x == 0 && y == 0 {
                continue;
            }
            grid.set(IVec3::new(CENTER + x, CENTER + y, z), BlockType::Leaf);
            grid.set(IVec3::new(CENTER - x, CENTER + y, z), BlockType::Leaf);
            grid.set(IVec3::new(CENTER + x, CENTER - y, z), BlockType::Leaf);
            grid.set(IVec3::new(CENTER - x, CENTER - y, z), BlockType::Leaf);
        }
    }
}
