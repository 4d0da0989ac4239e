//! Block types and their physical properties.
//!
//! The world stores exactly four block kinds. `Air` doubles as the
//! "nothing here" sentinel for every out-of-bounds or missed query, so its
//! raw value must stay 0 and it must never be conflated with a real hit
//! (queries that can miss return `Option`, not a bare block id).

/// Seconds required to break a block while standing, before the hardness
/// multiplier and tick rate are applied.
///
/// `Air` carries a near-zero placeholder so the table is total; an `Air`
/// cell is never a valid attack target in the first place.
pub const AIR_HARDNESS: f32 = 0.000_000_1;
pub const GROUND_HARDNESS: f32 = 0.5;
pub const WOOD_HARDNESS: f32 = 2.0;
pub const LEAF_HARDNESS: f32 = 0.2;

/// One voxel's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BlockType {
    /// Empty cell, also returned for every out-of-bounds read.
    #[default]
    Air = 0,
    /// Terrain layer blocks.
    Ground = 1,
    /// Tree trunk, the only block the episode rewards chopping.
    Wood = 2,
    /// Tree canopy.
    Leaf = 3,
}

impl BlockType {
    /// All block kinds, in raw-value order.
    pub const ALL: [BlockType; 4] = [
        BlockType::Air,
        BlockType::Ground,
        BlockType::Wood,
        BlockType::Leaf,
    ];

    /// Whether the block participates in collision and ray hits.
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockType::Air)
    }

    /// Default seconds required to break this block while standing.
    ///
    /// Always strictly positive, so breaking durations never degenerate
    /// to zero or negative tick counts.
    pub fn hardness(self) -> f32 {
        match self {
            BlockType::Air => AIR_HARDNESS,
            BlockType::Ground => GROUND_HARDNESS,
            BlockType::Wood => WOOD_HARDNESS,
            BlockType::Leaf => LEAF_HARDNESS,
        }
    }

    /// Human-readable name for logs and summaries.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Air => "air",
            BlockType::Ground => "ground",
            BlockType::Wood => "wood",
            BlockType::Leaf => "leaf",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_not_solid() {
        assert!(!BlockType::Air.is_solid());
        assert!(BlockType::Ground.is_solid());
        assert!(BlockType::Wood.is_solid());
        assert!(BlockType::Leaf.is_solid());
    }

    #[test]
    fn test_hardness_strictly_positive() {
        for block in BlockType::ALL {
            assert!(
                block.hardness() > 0.0,
                "{} hardness must be positive",
                block.name()
            );
        }
    }

    #[test]
    fn test_wood_is_hardest() {
        for block in [BlockType::Air, BlockType::Ground, BlockType::Leaf] {
            assert!(BlockType::Wood.hardness() > block.hardness());
        }
    }

    #[test]
    fn test_default_is_air() {
        assert_eq!(BlockType::default(), BlockType::Air);
    }
}
