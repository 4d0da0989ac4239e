//! Physics type re-exports and small geometry helpers.
//!
//! The core mathematical types come straight from glam; positions and
//! velocities are `Vec3` (x, y horizontal, z up), cell addresses are
//! `IVec3`. Everything here is pure and copied by value.

pub use glam::{IVec3, Vec2, Vec3};

/// Projects a position onto the horizontal plane, dropping elevation.
#[inline]
pub fn horizontal(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Straight-line distance between a world position and a cell's corner.
///
/// Cells are addressed by their low corner, matching how ray hits and
/// attack targets are reported.
#[inline]
pub fn distance_to_cell(pos: Vec3, cell: IVec3) -> f32 {
    pos.distance(cell.as_vec3())
}
