//! Player Module
//!
//! Player state and the actions that mutate it.
//!
//! # Components
//!
//! - [`Player`] - position, look rotation, and velocity, with the derived
//!   look-direction vectors used by ray queries
//! - [`MoveDirection`] - the four walk intents, applied relative to yaw
//! - [`attack`] - the block-breaking state machine

pub mod attack;

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use static_assertions::const_assert;

use crate::world::WORLD_SIZE;

pub use attack::{
    AttackState, BREAKING_RANGE, HARDNESS_MULTIPLIER, NOT_STANDING_BREAK_SLOWDOWN,
    TICKS_PER_SECOND,
};

/// Half-width of the player's collision footprint, in blocks.
pub const PLAYER_RADIUS: f32 = 0.3;

/// Player body height, in blocks.
pub const PLAYER_HEIGHT: f32 = 1.8;

/// Horizontal walking speed, blocks per tick.
pub const WALK_VELOCITY: f32 = 0.21585;

/// Upward velocity granted by a jump, blocks per tick.
pub const JUMP_VELOCITY: f32 = 0.45;

// The two-cell footprint rule only works while the footprint is narrower
// than one cell.
const_assert!(PLAYER_RADIUS < 0.5);
const_assert!(PLAYER_HEIGHT < WORLD_SIZE as f32);

/// A walk intent, interpreted relative to the player's current yaw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// The simulated agent's body.
///
/// Owned exclusively by one simulation instance; only the tick driver and
/// the explicit action methods mutate it. Rotation is split into `yaw`
/// (around the vertical axis, `[0, 2π)`) and `pitch` (`0` looking straight
/// down, `π` straight up).
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Feet position in world units.
    pub position: Vec3,
    /// Horizontal look angle in radians, `[0, 2π)`.
    pub yaw: f32,
    /// Vertical look angle in radians, `[0, π]`, down-to-up.
    pub pitch: f32,
    /// Velocity in blocks per tick.
    pub velocity: Vec3,
}

impl Player {
    /// Spawns a player at a random position away from the world center,
    /// two blocks up, with a random look direction.
    pub fn spawn(rng: &mut fastrand::Rng) -> Self {
        Self {
            position: Vec3::new(rand_not_in_center(rng), rand_not_in_center(rng), 2.0),
            yaw: rng.f32() * TAU,
            pitch: rng.f32() * PI,
            velocity: Vec3::ZERO,
        }
    }

    /// Places a player at `position`, at rest, looking level along +x.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: FRAC_PI_2,
            velocity: Vec3::ZERO,
        }
    }

    /// Eye position used as the origin for look queries.
    #[inline]
    pub fn head_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, 0.0, 1.0)
    }

    /// Unit-length direction the player is looking in.
    ///
    /// Pitch `π/2` looks level; the horizontal component shrinks with
    /// `cos(pitch - π/2)` until it vanishes looking straight up or down, so
    /// the vector is never zero.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (vertical, flatten) = (self.pitch - FRAC_PI_2).sin_cos();
        Vec3::new(cos_yaw * flatten, sin_yaw * flatten, vertical)
    }

    /// Look direction with pitch ignored, for feet-level probes.
    pub fn horizontal_look_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, sin_yaw, 0.0)
    }

    /// Sets the look rotation, wrapping yaw into `[0, 2π)` and clamping
    /// pitch into `[0, π]`.
    pub fn set_look_rotation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw.rem_euclid(TAU);
        self.pitch = pitch.clamp(0.0, PI);
    }

    /// Replaces horizontal velocity with a full-speed walk in the given
    /// direction relative to yaw. Vertical velocity is untouched.
    pub fn apply_move_intent(&mut self, direction: MoveDirection) {
        let angle = match direction {
            MoveDirection::Forward | MoveDirection::Backward => self.yaw,
            MoveDirection::Left | MoveDirection::Right => self.yaw - FRAC_PI_2,
        };
        let speed = match direction {
            MoveDirection::Forward | MoveDirection::Left => WALK_VELOCITY,
            MoveDirection::Backward | MoveDirection::Right => -WALK_VELOCITY,
        };
        let (sin, cos) = angle.sin_cos();
        self.velocity.x = speed * cos;
        self.velocity.y = speed * sin;
    }
}

/// Random coordinate in `[0, WORLD_SIZE)` kept at least one block away
/// from the center column, so the player never spawns inside the tree.
fn rand_not_in_center(rng: &mut fastrand::Rng) -> f32 {
    let center = (WORLD_SIZE / 2) as f32;
    let clearance = 1.0;
    let mut offset = clearance + rng.f32() * (center - clearance - 1.0);
    if rng.f32() > 0.5 {
        offset = -offset;
    }
    center + offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "expected {b:?}, got {a:?}");
    }

    #[test]
    fn test_level_look_direction_follows_yaw() {
        let mut player = Player::at(Vec3::ZERO);
        assert_close(player.look_direction(), Vec3::new(1.0, 0.0, 0.0));

        player.set_look_rotation(FRAC_PI_2, FRAC_PI_2);
        assert_close(player.look_direction(), Vec3::new(0.0, 1.0, 0.0));

        player.set_look_rotation(PI, FRAC_PI_2);
        assert_close(player.look_direction(), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_pitch_extremes_point_vertically() {
        let mut player = Player::at(Vec3::ZERO);
        player.set_look_rotation(0.0, 0.0);
        assert_close(player.look_direction(), Vec3::new(0.0, 0.0, -1.0));

        player.set_look_rotation(0.0, PI);
        assert_close(player.look_direction(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_look_direction_is_unit_length() {
        let mut player = Player::at(Vec3::ZERO);
        for (yaw, pitch) in [(0.3, 0.2), (2.0, 1.5), (5.5, 3.0), (1.0, FRAC_PI_2)] {
            player.set_look_rotation(yaw, pitch);
            let len = player.look_direction().length();
            assert!((len - 1.0).abs() < 1e-5, "length {len} at ({yaw}, {pitch})");
        }
    }

    #[test]
    fn test_rotation_is_wrapped_and_clamped() {
        let mut player = Player::at(Vec3::ZERO);
        player.set_look_rotation(TAU + 1.0, -0.5);
        assert!((player.yaw - 1.0).abs() < 1e-5);
        assert_eq!(player.pitch, 0.0);

        player.set_look_rotation(-FRAC_PI_2, PI + 1.0);
        assert!((player.yaw - (TAU - FRAC_PI_2)).abs() < 1e-5);
        assert_eq!(player.pitch, PI);
    }

    #[test]
    fn test_move_intents_are_yaw_relative() {
        let mut player = Player::at(Vec3::ZERO);

        player.apply_move_intent(MoveDirection::Forward);
        assert_close(player.velocity, Vec3::new(WALK_VELOCITY, 0.0, 0.0));

        player.apply_move_intent(MoveDirection::Backward);
        assert_close(player.velocity, Vec3::new(-WALK_VELOCITY, 0.0, 0.0));

        // Facing +x, "left" walks toward -y (yaw - π/2).
        player.apply_move_intent(MoveDirection::Left);
        assert_close(player.velocity, Vec3::new(0.0, -WALK_VELOCITY, 0.0));

        player.apply_move_intent(MoveDirection::Right);
        assert_close(player.velocity, Vec3::new(0.0, WALK_VELOCITY, 0.0));
    }

    #[test]
    fn test_move_intent_preserves_vertical_velocity() {
        let mut player = Player::at(Vec3::ZERO);
        player.velocity.z = 0.45;
        player.apply_move_intent(MoveDirection::Forward);
        assert_eq!(player.velocity.z, 0.45);
    }

    #[test]
    fn test_spawn_avoids_world_center() {
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..100 {
            let player = Player::spawn(&mut rng);
            let center = (WORLD_SIZE / 2) as f32;
            assert!((player.position.x - center).abs() >= 1.0);
            assert!((player.position.y - center).abs() >= 1.0);
            assert_eq!(player.position.z, 2.0);
            assert!(player.position.x > 0.0 && player.position.x < WORLD_SIZE as f32);
            assert!((0.0..TAU).contains(&player.yaw));
            assert!((0.0..=PI).contains(&player.pitch));
        }
    }
}
