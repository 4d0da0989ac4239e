//! Fixed-step tick driver.
//!
//! One call to [`step`] advances the world by a single bounded increment:
//! gravity and vertical collision, then horizontal movement with per-axis
//! collision, then friction. Nothing suspends mid-step and the order never
//! changes, so a step is atomic from the caller's perspective.
//!
//! A nominal tick is split into [`SUBSTEPS_PER_TICK`] sub-steps of
//! [`SUBSTEP_DELTA`] ticks each; the collision code's boundary snapping and
//! epsilon margins assume deltas of roughly that size, so `step` clamps
//! whatever it is handed into a safe range instead of trusting the caller.

use crate::physics::collision::{is_standing, resolve_gravity, resolve_movement};
use crate::player::Player;
use crate::world::VoxelGrid;

/// Nominal sub-step size, in ticks.
pub const SUBSTEP_DELTA: f32 = 0.1;

/// Sub-steps making up one nominal tick.
pub const SUBSTEPS_PER_TICK: u32 = 10;

/// Fraction of horizontal velocity kept over one full tick while airborne.
pub const AIR_SLIPPERINESS: f32 = 0.91;

/// Additional per-tick retention while standing on a block; ground contact
/// brakes much harder than air drag alone.
pub const GROUND_SLIPPERINESS: f32 = 0.6;

/// Smallest and largest deltas `step` will actually integrate.
const MIN_STEP_DELTA: f32 = 0.0001;
const MAX_STEP_DELTA: f32 = 0.1;

/// Advances physics by one sub-step of `dt` ticks.
///
/// `dt` is clamped to `[0.0001, 0.1]`; larger deltas would let a body
/// tunnel past the footprint checks.
pub fn step(grid: &VoxelGrid, player: &mut Player, dt: f32) {
    let dt = dt.clamp(MIN_STEP_DELTA, MAX_STEP_DELTA);
    resolve_gravity(grid, player, dt);
    resolve_movement(grid, player, dt);
    slow_down_horizontal_velocity(grid, player, dt);
}

/// Applies air drag to horizontal velocity, plus ground friction when the
/// player is standing. Both factors are per-tick retentions raised to `dt`
/// so the decay rate is independent of sub-step size.
fn slow_down_horizontal_velocity(grid: &VoxelGrid, player: &mut Player, dt: f32) {
    let air = AIR_SLIPPERINESS.powf(dt);
    player.velocity.x *= air;
    player.velocity.y *= air;

    if is_standing(grid, player.position) {
        let ground = GROUND_SLIPPERINESS.powf(dt);
        player.velocity.x *= ground;
        player.velocity.y *= ground;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec3, Vec3};

    use crate::world::BlockType;

    fn ground_block_world() -> VoxelGrid {
        let mut grid = VoxelGrid::new();
        grid.set(IVec3::new(4, 4, 0), BlockType::Ground);
        grid
    }

    #[test]
    fn test_falling_player_converges_to_block_top() {
        // All-air world except one ground block; the player above it must
        // come to rest exactly on its top surface and stay there.
        let grid = ground_block_world();
        let mut player = Player::at(Vec3::new(4.5, 4.5, 2.0));

        for _ in 0..400 {
            step(&grid, &mut player, 0.1);
        }

        assert_eq!(player.position.z, 1.0);
        assert_eq!(player.velocity.z, 0.0);
        assert!(is_standing(&grid, player.position));

        // Convergence is stable, not momentary.
        for _ in 0..50 {
            step(&grid, &mut player, 0.1);
        }
        assert_eq!(player.position.z, 1.0);
    }

    #[test]
    fn test_ground_friction_brakes_harder_than_air() {
        let grid = ground_block_world();

        let mut standing = Player::at(Vec3::new(4.5, 4.5, 1.0));
        standing.velocity.x = 1.0;
        let mut airborne = Player::at(Vec3::new(4.5, 4.5, 5.0));
        airborne.velocity.x = 1.0;
        // Cancel this sub-step's gravity pull on the airborne comparison by
        // reading only horizontal velocity.
        slow_down_horizontal_velocity(&grid, &mut standing, 0.1);
        slow_down_horizontal_velocity(&grid, &mut airborne, 0.1);

        assert!(standing.velocity.x < airborne.velocity.x);
        let expected_air = AIR_SLIPPERINESS.powf(0.1);
        assert!((airborne.velocity.x - expected_air).abs() < 1e-5);
        let expected_ground = expected_air * GROUND_SLIPPERINESS.powf(0.1);
        assert!((standing.velocity.x - expected_ground).abs() < 1e-5);
    }

    #[test]
    fn test_oversized_delta_is_clamped() {
        let grid = ground_block_world();
        let mut player = Player::at(Vec3::new(4.5, 4.5, 2.0));
        player.velocity.x = 1.0;

        // A huge delta must integrate like a 0.1-tick sub-step, not fling
        // the player across the world.
        step(&grid, &mut player, 1000.0);
        assert!((player.position.x - 4.6).abs() < 1e-4);
    }

    #[test]
    fn test_full_tick_of_substeps_stays_bounded() {
        let grid = ground_block_world();
        let mut player = Player::at(Vec3::new(4.5, 4.5, 1.0));
        player.velocity.x = 0.2;

        for _ in 0..SUBSTEPS_PER_TICK {
            step(&grid, &mut player, SUBSTEP_DELTA);
        }

        // Standing on the block the whole tick: never sinks, and friction
        // has eaten most of the horizontal speed.
        assert_eq!(player.position.z, 1.0);
        assert!(player.velocity.x < 0.2 * AIR_SLIPPERINESS * GROUND_SLIPPERINESS + 1e-3);
    }
}
