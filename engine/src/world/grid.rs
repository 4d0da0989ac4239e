//! Fixed-size voxel grid.
//!
//! The world is a 9×9×9 array of [`BlockType`] indexed `[z][y][x]` with z as
//! elevation. It is populated once at world creation and afterwards mutated
//! only by block breaking; it is never resized.
//!
//! ## Boundary policy
//!
//! Every coordinate is floored before indexing. Reads outside the grid
//! return [`BlockType::Air`] and writes outside it are rejected with
//! `false`; neither ever panics. This keeps the physics and ray code free
//! of bounds bookkeeping - a ray that leaves the world simply stops seeing
//! blocks.

use glam::{IVec3, Vec3};
use static_assertions::const_assert;

use crate::world::block::BlockType;

/// World edge length in cells, identical on all three axes.
pub const WORLD_SIZE: usize = 9;

/// World edge length as a float, for position-space comparisons.
pub const WORLD_EXTENT: f32 = WORLD_SIZE as f32;

// The footprint sampling rule assumes at least a few cells per axis, and
// the flat array would get silly far beyond this.
const_assert!(WORLD_SIZE >= 4);
const_assert!(WORLD_SIZE <= 64);

/// Floor a world-space position to the integer cell containing it.
#[inline]
pub fn cell_of(pos: Vec3) -> IVec3 {
    pos.floor().as_ivec3()
}

/// Dense block storage for one world instance.
///
/// Tracks a wood-block counter alongside the array so
/// [`wood_remaining`](VoxelGrid::wood_remaining) is O(1); the counter is
/// updated on every write that actually changes a cell.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    /// Block data, `blocks[z][y][x]`.
    blocks: [[[BlockType; WORLD_SIZE]; WORLD_SIZE]; WORLD_SIZE],
    /// Number of cells currently holding [`BlockType::Wood`].
    wood_count: u32,
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelGrid {
    /// Creates an empty (all-`Air`) grid.
    pub fn new() -> Self {
        Self {
            blocks: [[[BlockType::Air; WORLD_SIZE]; WORLD_SIZE]; WORLD_SIZE],
            wood_count: 0,
        }
    }

    /// Strict per-axis bounds check: `0 <= coord < WORLD_SIZE` on x, y, z.
    #[inline]
    pub fn is_in_bounds(&self, cell: IVec3) -> bool {
        let max = WORLD_SIZE as i32;
        (0..max).contains(&cell.x) && (0..max).contains(&cell.y) && (0..max).contains(&cell.z)
    }

    /// Returns the block at `cell`, or `Air` when `cell` is out of bounds.
    #[inline]
    pub fn get(&self, cell: IVec3) -> BlockType {
        if self.is_in_bounds(cell) {
            self.blocks[cell.z as usize][cell.y as usize][cell.x as usize]
        } else {
            BlockType::Air
        }
    }

    /// Returns the block containing the world-space position `pos`.
    #[inline]
    pub fn block_at(&self, pos: Vec3) -> BlockType {
        self.get(cell_of(pos))
    }

    /// Writes `block` at `cell`.
    ///
    /// Returns `true` when the cell is in bounds (even if the stored value
    /// was already `block`), `false` for an out-of-bounds no-op. The wood
    /// counter is only touched when the stored value actually changes.
    pub fn set(&mut self, cell: IVec3, block: BlockType) -> bool {
        if !self.is_in_bounds(cell) {
            return false;
        }
        let slot = &mut self.blocks[cell.z as usize][cell.y as usize][cell.x as usize];
        if *slot != block {
            if *slot == BlockType::Wood {
                self.wood_count -= 1;
            }
            if block == BlockType::Wood {
                self.wood_count += 1;
            }
            *slot = block;
        }
        true
    }

    /// Number of wood blocks left in the world.
    #[inline]
    pub fn wood_remaining(&self) -> u32 {
        self.wood_count
    }

    /// The next wood block to go for, scanning bottom-up (z, then y, then x).
    ///
    /// Trees are chopped from the trunk base upward, so the lowest wood
    /// cell is the natural target for sensors and rewards.
    pub fn next_wood_cell(&self) -> Option<IVec3> {
        for z in 0..WORLD_SIZE {
            for y in 0..WORLD_SIZE {
                for x in 0..WORLD_SIZE {
                    if self.blocks[z][y][x] == BlockType::Wood {
                        return Some(IVec3::new(x as i32, y as i32, z as i32));
                    }
                }
            }
        }
        None
    }
}
