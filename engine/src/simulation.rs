//! The simulation facade.
//!
//! One [`Simulation`] owns a world grid, a player, and the attack state,
//! and is the only way collaborators (episode drivers, sensors, renderers)
//! touch them. There is no process-wide current game; parallel rollouts
//! each own an independent instance.
//!
//! All failure modes surface as sentinel values - `Air`, `None`, saturated
//! distances, `false` - never as panics. Degenerate inputs (zero-length
//! ray directions) are caught here at the boundary before they reach the
//! traversal code.

use glam::{IVec3, Vec2, Vec3};

use crate::physics::collision::is_standing;
use crate::physics::raycast::{RayHit, distance_to_first_block, first_block_along_ray};
use crate::physics::tick;
use crate::physics::types::horizontal;
use crate::player::attack::{AttackState, BREAKING_RANGE};
use crate::player::{JUMP_VELOCITY, MoveDirection, Player};
use crate::world::{BlockType, CENTER, MIN_TREE_HEIGHT, VoxelGrid, WORLD_EXTENT, generate_world};

/// Directions shorter than this are treated as "not looking anywhere"
/// instead of being fed to the ray traversal.
const MIN_DIRECTION_LENGTH_SQUARED: f32 = 1e-12;

/// A complete, exclusively-owned game world.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: VoxelGrid,
    player: Player,
    attack: AttackState,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Creates a randomly seeded world with a full-height tree.
    pub fn new() -> Self {
        Self::from_rng(&mut fastrand::Rng::new(), None)
    }

    /// Creates a reproducible world from a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(&mut fastrand::Rng::with_seed(seed), None)
    }

    /// Creates a world drawing all randomness from `rng`, optionally
    /// forcing the tree height (episode resets shorten the tree to vary
    /// task difficulty).
    pub fn from_rng(rng: &mut fastrand::Rng, tree_height: Option<u32>) -> Self {
        let (grid, height) = generate_world(rng, tree_height);
        let mut player = Player::spawn(rng);
        if height == MIN_TREE_HEIGHT {
            // A full tree's canopy spans radius 2 around the center; push
            // the spawn out to the far edge band so the player never
            // starts inside it.
            player.position.x = WORLD_EXTENT - 2.0 + rng.f32();
            player.position.y = WORLD_EXTENT - 2.0 + rng.f32();
        }
        log::debug!(
            "world seeded: tree height {height}, player at {}",
            player.position
        );
        Self {
            grid,
            player,
            attack: AttackState::Idle,
        }
    }

    /// Assembles a simulation from pre-built parts, for scripted scenarios
    /// and tests.
    pub fn from_parts(grid: VoxelGrid, player: Player) -> Self {
        Self {
            grid,
            player,
            attack: AttackState::Idle,
        }
    }

    // ------------------------------------------------------------------
    // Physics
    // ------------------------------------------------------------------

    /// Advances physics by one bounded sub-step of `dt` ticks.
    pub fn step(&mut self, dt: f32) {
        tick::step(&self.grid, &mut self.player, dt);
    }

    /// Whether the player currently rests on top of a solid block.
    pub fn is_standing(&self) -> bool {
        is_standing(&self.grid, self.player.position)
    }

    // ------------------------------------------------------------------
    // Player actions
    // ------------------------------------------------------------------

    /// Sets horizontal velocity to a full-speed walk relative to yaw.
    pub fn apply_move_intent(&mut self, direction: MoveDirection) {
        self.player.apply_move_intent(direction);
    }

    /// Points the player's view; yaw wraps, pitch clamps.
    pub fn set_look_rotation(&mut self, yaw: f32, pitch: f32) {
        self.player.set_look_rotation(yaw, pitch);
    }

    /// Jumps if standing. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.is_standing() {
            self.player.velocity.z = JUMP_VELOCITY;
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Block breaking
    // ------------------------------------------------------------------

    /// Attacks whatever block the player is looking at, for `dt` ticks.
    ///
    /// Re-resolves the look target every call: a changed target discards
    /// the previous progress before any new damage lands. Returns the
    /// destroyed block once its tick budget is exhausted, at which point
    /// the cell is already air in the grid.
    pub fn attack(&mut self, dt: f32) -> Option<BlockType> {
        let hit = self.query_look_target(1.0, BREAKING_RANGE, None);
        self.attack.retarget(hit.map(|h| h.cell));

        let hit = hit?;
        self.attack.begin(hit.cell, hit.block);

        let standing = self.is_standing();
        if self.attack.advance(dt, standing) {
            self.grid.set(hit.cell, BlockType::Air);
            self.attack.reset();
            log::debug!("destroyed {} block at {}", hit.block.name(), hit.cell);
            return Some(hit.block);
        }
        None
    }

    /// Stops attacking, discarding any mining progress.
    pub fn stop_attack(&mut self) {
        self.attack.reset();
    }

    /// Current mining progress, for observers.
    pub fn attack_state(&self) -> &AttackState {
        &self.attack
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// First solid block along the player's view ray.
    ///
    /// The ray starts `offset_height` above the feet and follows the look
    /// direction unless `direction_override` replaces it (sensors probe
    /// with a flattened direction at foot level). A degenerate override
    /// direction yields `None`.
    pub fn query_look_target(
        &self,
        offset_height: f32,
        range: f32,
        direction_override: Option<Vec3>,
    ) -> Option<RayHit> {
        let direction = direction_override.unwrap_or_else(|| self.player.look_direction());
        if direction.length_squared() < MIN_DIRECTION_LENGTH_SQUARED {
            return None;
        }
        let origin = self.player.position + Vec3::new(0.0, 0.0, offset_height);
        first_block_along_ray(&self.grid, origin, direction, range)
    }

    /// Saturating distance sensor: straight-line distance to the first
    /// solid block along `direction`, or `max_distance` when nothing is
    /// hit (including for a degenerate direction).
    pub fn distance_along_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> f32 {
        if direction.length_squared() < MIN_DIRECTION_LENGTH_SQUARED {
            return max_distance;
        }
        distance_to_first_block(&self.grid, origin, direction, max_distance)
    }

    /// Wood blocks left in the world.
    pub fn wood_remaining(&self) -> u32 {
        self.grid.wood_remaining()
    }

    /// The lowest remaining wood block, the natural next chopping target.
    pub fn next_wood_cell(&self) -> Option<IVec3> {
        self.grid.next_wood_cell()
    }

    /// True once the player has left the world volume - the terminal
    /// "game over" condition, reported rather than raised.
    pub fn is_out_of_bounds(&self) -> bool {
        let p = self.player.position;
        p.x < 0.0
            || p.x > WORLD_EXTENT
            || p.y < 0.0
            || p.y > WORLD_EXTENT
            || p.z < 0.0
            || p.z > WORLD_EXTENT
    }

    /// Horizontal distance from the player to the world's center column.
    pub fn distance_to_center(&self) -> f32 {
        horizontal(self.player.position).distance(Vec2::splat(CENTER as f32))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}
