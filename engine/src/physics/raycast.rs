//! Voxel ray traversal (DDA).
//!
//! Walks a ray through the grid by jumping from one cell-boundary crossing
//! to the next, so every cell the ray passes through is visited in order
//! and none are skipped. Used for "which block am I looking at" queries and
//! for distance sensors.
//!
//! # Algorithm
//!
//! Per axis, the fractional distance to the next integer boundary in the
//! direction of travel is converted to a parametric step `t = dist / |d|`;
//! the smallest `t` across the three axes is the next crossing. The
//! minimizing axis (axes, on ties) is snapped to its exact boundary by
//! rounding, which cancels accumulated float drift. A zero direction
//! component contributes a large finite `t` instead of dividing, so no
//! NaN/inf ever reaches the `min` comparison. A point already on a
//! boundary counts the *next* boundary as a full unit away, which keeps
//! rays starting on a cell edge moving forward.

use glam::{IVec3, Vec3};

use crate::world::{BlockType, VoxelGrid, cell_of};

/// Parametric stand-in for "this axis never crosses a boundary".
/// Large but finite, so it loses every `min` against a real crossing.
const NO_CROSSING: f32 = 1.0e30;

/// A solid cell found along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The block that stopped the ray.
    pub block: BlockType,
    /// Floored coordinates of the hit cell.
    pub cell: IVec3,
    /// Straight-line distance from the ray origin to the crossing where
    /// the hit was detected.
    pub distance: f32,
}

/// Parametric time until `coord` reaches the next integer boundary when
/// moving with velocity `dir` on that axis.
fn time_to_boundary(coord: f32, dir: f32) -> f32 {
    if dir == 0.0 {
        return NO_CROSSING;
    }
    let frac = coord.rem_euclid(1.0);
    let dist = if frac == 0.0 {
        // Already on a boundary: the next one is a full cell away.
        1.0
    } else if dir > 0.0 {
        1.0 - frac
    } else {
        frac
    };
    dist / dir.abs()
}

/// Advances `point` along `direction` to the next cell-boundary crossing.
///
/// `direction` must not be the zero vector; callers validate at the public
/// interface. It does not need to be normalized - the crossing position is
/// independent of the direction's magnitude.
pub fn next_boundary_crossing(point: Vec3, direction: Vec3) -> Vec3 {
    debug_assert!(direction != Vec3::ZERO, "ray direction must be non-zero");

    let tx = time_to_boundary(point.x, direction.x);
    let ty = time_to_boundary(point.y, direction.y);
    let tz = time_to_boundary(point.z, direction.z);
    let t = tx.min(ty).min(tz);

    let mut crossed = point + direction * t;
    // Snap the crossing axis (or axes, on diagonal ties) to the exact
    // boundary so drift cannot accumulate over long rays.
    if tx == t {
        crossed.x = crossed.x.round();
    }
    if ty == t {
        crossed.y = crossed.y.round();
    }
    if tz == t {
        crossed.z = crossed.z.round();
    }
    crossed
}

/// Finds the first solid cell along a ray.
///
/// Visits each boundary crossing in order; at every crossing the ray stops
/// with `None` if it has left the world or its straight-line distance from
/// `origin` exceeds `max_distance`, and stops with a hit if the cell at
/// the crossing is solid. Distance is measured origin-to-crossing, not
/// path length, so `max_distance` bounds the reported hit distance too.
pub fn first_block_along_ray(
    grid: &VoxelGrid,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<RayHit> {
    let mut point = next_boundary_crossing(origin, direction);
    loop {
        let cell = cell_of(point);
        if !grid.is_in_bounds(cell) {
            return None;
        }
        let distance = origin.distance(point);
        if distance > max_distance {
            return None;
        }
        let block = grid.get(cell);
        if block.is_solid() {
            return Some(RayHit {
                block,
                cell,
                distance,
            });
        }
        point = next_boundary_crossing(point, direction);
    }
}

/// Straight-line distance to the first solid cell along a ray, saturating
/// to `max_distance` when nothing is hit in range or in bounds.
///
/// The saturation keeps sensor vectors bounded: a miss reads as "the far
/// plane" rather than as a separate no-hit signal.
pub fn distance_to_first_block(
    grid: &VoxelGrid,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> f32 {
    first_block_along_ray(grid, origin, direction, max_distance)
        .map(|hit| hit.distance)
        .unwrap_or(max_distance)
}
