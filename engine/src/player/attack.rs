//! Block-breaking state machine.
//!
//! Tracks which cell is being mined and how much mining time it has left.
//! At most one cell is ever in progress; looking away from it discards all
//! progress, so damage is never remembered per cell.
//!
//! Timing: a block of hardness `h` takes `h * HARDNESS_MULTIPLIER` seconds
//! of standing attack, tracked in ticks at [`TICKS_PER_SECOND`]. Each
//! attack call removes `TICKS_PER_SECOND * dt` ticks, divided by
//! [`NOT_STANDING_BREAK_SLOWDOWN`] while airborne.

use glam::IVec3;

use crate::world::BlockType;

/// How far (in blocks) the player can reach when breaking.
pub const BREAKING_RANGE: f32 = 4.5;

/// Global scale on block hardness.
pub const HARDNESS_MULTIPLIER: f32 = 1.5;

/// Simulation tick rate used to convert hardness seconds into ticks.
pub const TICKS_PER_SECOND: f32 = 20.0;

/// Breaking takes this many times longer while not standing on a block.
pub const NOT_STANDING_BREAK_SLOWDOWN: f32 = 5.0;

/// Shaved off the initial tick budget so the final decrement lands at or
/// below zero instead of hovering there; magnitude is tunable, the shave
/// itself is what guarantees termination.
const COMPLETION_EPSILON: f32 = 1e-4;

/// Mining progress on the currently targeted cell, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AttackState {
    /// Nothing being mined.
    #[default]
    Idle,
    /// `cell` is being mined and breaks when `remaining_ticks` runs out.
    Targeting { cell: IVec3, remaining_ticks: f32 },
}

impl AttackState {
    /// The cell currently being mined, if any.
    pub fn target(&self) -> Option<IVec3> {
        match self {
            AttackState::Idle => None,
            AttackState::Targeting { cell, .. } => Some(*cell),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, AttackState::Idle)
    }

    /// Ticks left until the current target breaks; zero when idle.
    pub fn remaining_ticks(&self) -> f32 {
        match self {
            AttackState::Idle => 0.0,
            AttackState::Targeting { remaining_ticks, .. } => *remaining_ticks,
        }
    }

    /// Drops any in-progress target, discarding its progress.
    pub fn reset(&mut self) {
        *self = AttackState::Idle;
    }

    /// Resets to idle when the looked-at cell differs from the current
    /// target (including looking at nothing). Progress on the abandoned
    /// cell is gone for good.
    pub fn retarget(&mut self, looked_at: Option<IVec3>) {
        if self.target() != looked_at {
            self.reset();
        }
    }

    /// Starts mining `cell` if nothing is in progress yet.
    pub fn begin(&mut self, cell: IVec3, block: BlockType) {
        if self.is_idle() {
            *self = AttackState::Targeting {
                cell,
                remaining_ticks: block.hardness() * HARDNESS_MULTIPLIER * TICKS_PER_SECOND
                    - COMPLETION_EPSILON,
            };
        }
    }

    /// Applies one attack increment of `dt` ticks.
    ///
    /// Returns `true` when the target's budget is exhausted; the caller
    /// breaks the block and resets the state. Returns `false` while mining
    /// continues or when idle.
    pub fn advance(&mut self, dt: f32, standing: bool) -> bool {
        let AttackState::Targeting { remaining_ticks, .. } = self else {
            return false;
        };
        let mut strength = TICKS_PER_SECOND * dt;
        if !standing {
            strength /= NOT_STANDING_BREAK_SLOWDOWN;
        }
        *remaining_ticks -= strength;
        *remaining_ticks <= 0.0
    }
}
