//! Collision resolution for the player volume.
//!
//! The player is a vertical cylinder of radius [`PLAYER_RADIUS`] and height
//! [`PLAYER_HEIGHT`], approximated for collision by an axis-aligned square
//! footprint. Each physics sub-step resolves the gravity axis first, then
//! the two horizontal axes independently - x before y, a fixed convention
//! that keeps inside-corner behavior deterministic.
//!
//! Sampling points sit `PLAYER_RADIUS` from the player center but are
//! pulled in by a small epsilon on the perpendicular axes, so a body
//! exactly flush against a cell boundary does not register the neighboring
//! cell as a collision.

use glam::{IVec2, IVec3, Vec2, Vec3};

use crate::physics::types::horizontal;
use crate::player::{PLAYER_HEIGHT, PLAYER_RADIUS, Player};
use crate::world::{VoxelGrid, WORLD_EXTENT, WORLD_SIZE};

/// Gravity acceleration, blocks per tick².
pub const GRAVITY: f32 = 0.08;

/// Maximum vertical speed, blocks per tick.
pub const TERMINAL_VELOCITY: f32 = 3.92;

/// Fraction of vertical velocity kept over one full tick (continuous air
/// drag; a sub-step of `dt` ticks applies `0.98^dt`).
pub const VERTICAL_RETENTION: f32 = 0.98;

/// Nudge applied to probe points so exact-boundary contact does not read
/// the next cell. Tunable; only its role (not its magnitude) matters.
const PROBE_EPSILON: f32 = 1e-6;

/// Gap left below a ceiling block when a head collision snaps the player
/// down, compensating for float rounding in the snap itself.
const HEAD_EPSILON: f32 = 1e-5;

/// Grid cells covered by one axis of the player footprint.
///
/// The primary cell is the one under `coord + PLAYER_RADIUS`; when the
/// footprint straddles a cell boundary (fractional part within
/// `PLAYER_RADIUS` of it) the neighboring cell is covered too. Coordinates
/// entirely outside the world contribute no cells at all, which makes every
/// downstream collision check a miss - falling out of the world is the
/// caller-visible failure, not an error here.
fn axis_cells(coord: f32) -> Vec<i32> {
    let mut cells = Vec::with_capacity(2);
    if coord > -PLAYER_RADIUS && coord < WORLD_EXTENT - PLAYER_RADIUS {
        cells.push((coord + PLAYER_RADIUS).floor() as i32);
    }
    let rel = coord.rem_euclid(1.0);
    if (rel < PLAYER_RADIUS || rel > 1.0 - PLAYER_RADIUS)
        && (1.0 - PLAYER_RADIUS..WORLD_EXTENT + 1.0 - PLAYER_RADIUS).contains(&coord)
    {
        cells.push((coord + PLAYER_RADIUS).floor() as i32 - 1);
    }
    cells
}

/// Horizontal cells covered by the player footprint centered at `pos`.
///
/// One, two, or four cells depending on how many cell boundaries the
/// footprint straddles; empty when the player is outside the world.
pub fn footprint_cells(pos: Vec2) -> Vec<IVec2> {
    let xs = axis_cells(pos.x);
    let ys = axis_cells(pos.y);
    let mut cells = Vec::with_capacity(xs.len() * ys.len());
    for &x in &xs {
        for &y in &ys {
            cells.push(IVec2::new(x, y));
        }
    }
    cells
}

/// Whether the player rests exactly on top of a solid cell.
///
/// True only when the elevation has no fractional part (a body mid-fall or
/// mid-resolution is never standing) and at least one footprint cell one
/// level below the feet is solid.
pub fn is_standing(grid: &VoxelGrid, position: Vec3) -> bool {
    if position.z.fract() != 0.0 {
        return false;
    }
    let below = ((position.z as i32) - 1).clamp(0, WORLD_SIZE as i32 - 1);
    footprint_cells(horizontal(position))
        .into_iter()
        .any(|corner| grid.get(IVec3::new(corner.x, corner.y, below)).is_solid())
}

/// Integrates gravity-affected vertical velocity and resolves collisions
/// with the floor and ceiling.
///
/// Velocity first: gravity, then continuous drag, then the terminal-speed
/// clamp. The tentative new elevation is then checked at every footprint
/// cell - a solid block at the new feet level snaps the player onto its
/// top surface (only when the feet actually crossed down into a new cell;
/// either way vertical velocity is zeroed), and a solid block at head
/// height snaps the player just below the ceiling.
pub fn resolve_gravity(grid: &VoxelGrid, player: &mut Player, dt: f32) {
    player.velocity.z -= GRAVITY * dt;
    player.velocity.z *= VERTICAL_RETENTION.powf(dt);
    if player.velocity.z.abs() > TERMINAL_VELOCITY {
        player.velocity.z = TERMINAL_VELOCITY.copysign(player.velocity.z);
    }

    let old_z = player.position.z;
    let mut new_z = old_z + player.velocity.z * dt;

    let feet_cell = (new_z as i32).max(0);
    let head_cell = ((new_z + PLAYER_HEIGHT) as i32).min(WORLD_SIZE as i32 - 1);

    for corner in footprint_cells(horizontal(player.position)) {
        if grid.get(IVec3::new(corner.x, corner.y, feet_cell)).is_solid() {
            if (old_z as i32) > (new_z as i32) {
                new_z = (feet_cell + 1) as f32;
            }
            player.velocity.z = 0.0;
        }
        if grid.get(IVec3::new(corner.x, corner.y, head_cell)).is_solid() {
            new_z = head_cell as f32 - PLAYER_HEIGHT - HEAD_EPSILON;
            player.velocity.z = 0.0;
        }
    }

    player.position.z = new_z;
}

/// Integrates horizontal velocity with per-axis collision, x before y.
pub fn resolve_movement(grid: &VoxelGrid, player: &mut Player, dt: f32) {
    resolve_horizontal_axis(grid, player, dt, 0);
    resolve_horizontal_axis(grid, player, dt, 1);
}

/// One horizontal axis: integrate, then probe the leading face.
///
/// Two probe points sit on the face the player moves toward, at mid-body
/// height, offset `PLAYER_RADIUS - ε` to either side on the perpendicular
/// axis. Any solid probe clamps the position to the block's near face and
/// zeroes the axis velocity.
fn resolve_horizontal_axis(grid: &VoxelGrid, player: &mut Player, dt: f32, axis: usize) {
    player.position[axis] += player.velocity[axis] * dt;

    let vel = player.velocity[axis];
    if vel == 0.0 {
        return;
    }
    let sign = vel.signum();
    let lead = player.position[axis] + sign * PLAYER_RADIUS;
    let other = 1 - axis;

    for side in [-1.0f32, 1.0] {
        let mut probe = Vec3::ZERO;
        probe[axis] = lead;
        probe[other] = player.position[other] + side * (PLAYER_RADIUS - PROBE_EPSILON);
        probe.z = player.position.z + PLAYER_HEIGHT / 2.0 + PROBE_EPSILON;

        if grid.block_at(probe).is_solid() {
            player.position[axis] = if sign < 0.0 {
                probe[axis].floor() + 1.0 + PLAYER_RADIUS
            } else {
                probe[axis].floor() - PLAYER_RADIUS
            };
            player.velocity[axis] = 0.0;
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::BlockType;

    fn grid_with(cells: &[(i32, i32, i32)]) -> VoxelGrid {
        let mut grid = VoxelGrid::new();
        for &(x, y, z) in cells {
            assert!(grid.set(IVec3::new(x, y, z), BlockType::Ground));
        }
        grid
    }

    #[test]
    fn test_footprint_single_cell_at_center() {
        let cells = footprint_cells(Vec2::new(4.5, 4.5));
        assert_eq!(cells, vec![IVec2::new(4, 4)]);
    }

    #[test]
    fn test_footprint_straddles_boundary() {
        // x = 4.2 reaches into cell 3 (4.2 - 0.3 < 4.0); y stays in one cell.
        let cells = footprint_cells(Vec2::new(4.2, 4.5));
        assert_eq!(cells, vec![IVec2::new(4, 4), IVec2::new(3, 4)]);

        // Straddling on both axes gives all four corners.
        let cells = footprint_cells(Vec2::new(4.2, 6.8));
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn test_footprint_outside_world_is_empty() {
        assert!(footprint_cells(Vec2::new(-2.0, 4.5)).is_empty());
        assert!(footprint_cells(Vec2::new(4.5, 20.0)).is_empty());
    }

    #[test]
    fn test_standing_requires_integral_elevation() {
        let grid = grid_with(&[(4, 4, 0)]);
        assert!(is_standing(&grid, Vec3::new(4.5, 4.5, 1.0)));
        assert!(!is_standing(&grid, Vec3::new(4.5, 4.5, 1.0001)));
        assert!(!is_standing(&grid, Vec3::new(4.5, 4.5, 0.9999)));
    }

    #[test]
    fn test_standing_requires_solid_below() {
        let grid = grid_with(&[(4, 4, 0)]);
        // Above the block: standing. One column over: thin air.
        assert!(is_standing(&grid, Vec3::new(4.5, 4.5, 1.0)));
        assert!(!is_standing(&grid, Vec3::new(6.5, 6.5, 1.0)));
        // At z = 2.0 the cell below is (4, 4, 1), which is empty.
        assert!(!is_standing(&grid, Vec3::new(4.5, 4.5, 2.0)));
    }

    #[test]
    fn test_falling_snaps_onto_block_top() {
        let grid = grid_with(&[(4, 4, 0)]);
        let mut player = Player::at(Vec3::new(4.5, 4.5, 1.05));
        player.velocity.z = -1.0;

        resolve_gravity(&grid, &mut player, 0.1);

        assert_eq!(player.position.z, 1.0);
        assert_eq!(player.velocity.z, 0.0);
    }

    #[test]
    fn test_descent_within_cell_does_not_snap() {
        let grid = grid_with(&[(4, 4, 0)]);
        let mut player = Player::at(Vec3::new(4.5, 4.5, 1.8));
        player.velocity.z = -1.0;

        resolve_gravity(&grid, &mut player, 0.1);

        // Feet stay inside cell 1; the ground at z = 0 is not involved.
        assert!(player.position.z > 1.0 && player.position.z < 1.8);
        assert!(player.velocity.z < 0.0);
    }

    #[test]
    fn test_head_hits_ceiling() {
        // Ceiling at z = 3 above a player whose head would enter it.
        let grid = grid_with(&[(4, 4, 3)]);
        let mut player = Player::at(Vec3::new(4.5, 4.5, 1.15));
        player.velocity.z = 1.0;

        resolve_gravity(&grid, &mut player, 0.1);

        assert!(player.position.z < 3.0 - PLAYER_HEIGHT);
        assert!((player.position.z - (3.0 - PLAYER_HEIGHT)).abs() < 1e-3);
        assert_eq!(player.velocity.z, 0.0);
    }

    #[test]
    fn test_walking_into_wall_clamps_position() {
        // Wall at x = 6 across the player's mid-body height.
        let grid = grid_with(&[(6, 4, 1), (6, 4, 2)]);
        let mut player = Player::at(Vec3::new(5.5, 4.5, 1.0));
        player.velocity.x = 5.0;

        resolve_movement(&grid, &mut player, 0.1);

        assert_eq!(player.position.x, 6.0 - PLAYER_RADIUS);
        assert_eq!(player.velocity.x, 0.0);
        assert_eq!(player.position.y, 4.5);
    }

    #[test]
    fn test_walking_into_wall_negative_direction() {
        let grid = grid_with(&[(3, 4, 1), (3, 4, 2)]);
        let mut player = Player::at(Vec3::new(4.5, 4.5, 1.0));
        player.velocity.x = -5.0;

        resolve_movement(&grid, &mut player, 0.1);

        assert_eq!(player.position.x, 4.0 + PLAYER_RADIUS);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn test_corner_approach_resolves_x_first() {
        // Inside corner: walls on both the +x and +y sides. The x axis is
        // resolved first by convention, so x clamps against its wall and y
        // clamps against its own afterwards.
        let grid = grid_with(&[(6, 5, 1), (6, 5, 2), (5, 6, 1), (5, 6, 2), (6, 6, 1), (6, 6, 2)]);
        let mut player = Player::at(Vec3::new(5.6, 5.6, 1.0));
        player.velocity.x = 5.0;
        player.velocity.y = 5.0;

        resolve_movement(&grid, &mut player, 0.1);

        assert_eq!(player.position.x, 6.0 - PLAYER_RADIUS);
        assert_eq!(player.position.y, 6.0 - PLAYER_RADIUS);
        assert_eq!(player.velocity.x, 0.0);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn test_free_movement_integrates_velocity() {
        let grid = VoxelGrid::new();
        let mut player = Player::at(Vec3::new(4.5, 4.5, 1.0));
        player.velocity.x = 1.0;
        player.velocity.y = -0.5;

        resolve_movement(&grid, &mut player, 0.1);

        assert!((player.position.x - 4.6).abs() < 1e-6);
        assert!((player.position.y - 4.45).abs() < 1e-6);
    }

    #[test]
    fn test_terminal_velocity_clamp() {
        let grid = VoxelGrid::new();
        let mut player = Player::at(Vec3::new(4.5, 4.5, 8.0));
        for _ in 0..10_000 {
            resolve_gravity(&grid, &mut player, 0.1);
        }
        assert!(player.velocity.z.abs() <= TERMINAL_VELOCITY);
        assert!((player.velocity.z.abs() - TERMINAL_VELOCITY).abs() < 1e-3);
    }
}
