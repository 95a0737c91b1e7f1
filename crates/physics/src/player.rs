//! Walking player kinematics on top of [`CollisionSystem`].

use glam::{DVec2, DVec3};
use voxkernel_world::TerrainGenerator;

use crate::collision::{CollisionAxes, CollisionSystem, MoveResult};
use crate::PLAYER_EYE_HEIGHT;

/// Horizontal walking speed in blocks per second.
pub const MOVEMENT_SPEED: f64 = 5.0;
/// Upward velocity applied by a jump.
pub const JUMP_VELOCITY: f64 = 8.0;
/// Vertical acceleration in blocks per second squared.
pub const GRAVITY: f64 = -20.0;
/// Horizontal velocity retained per step without input.
pub const FRICTION: f64 = 0.8;
/// Fastest allowed fall speed.
pub const TERMINAL_VELOCITY: f64 = -50.0;

/// Per-step player intent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Desired horizontal direction in world space (x, z); need not be unit length.
    pub movement: DVec2,
    /// Jump if currently grounded.
    pub jump: bool,
}

impl PlayerInput {
    /// Walk toward `(x, z)`.
    pub fn walk(x: f64, z: f64) -> Self {
        Self {
            movement: DVec2::new(x, z),
            jump: false,
        }
    }

    /// Same input with the jump flag set.
    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }
}

/// Player body state (feet position and velocity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    /// Feet position.
    pub position: DVec3,
    /// Velocity in blocks per second.
    pub velocity: DVec3,
    /// Ground contact as of the last step.
    pub grounded: bool,
}

impl PlayerBody {
    /// Body at rest with its feet at `position`.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            grounded: false,
        }
    }

    /// Body standing on the ground of the column at `(x, z)`.
    pub fn spawn(
        terrain: &mut TerrainGenerator,
        collision: &mut CollisionSystem,
        x: f64,
        z: f64,
    ) -> Self {
        let ground = collision.ground_height(terrain, x, z);
        Self::new(DVec3::new(x, ground as f64, z))
    }

    /// Camera position.
    pub fn eye_position(&self) -> DVec3 {
        self.position + DVec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0)
    }

    /// Advance by `dt` seconds.
    ///
    /// Walking sets horizontal velocity outright; without input it decays by
    /// [`FRICTION`]. Velocity on every blocked axis is zeroed afterwards.
    pub fn step(
        &mut self,
        terrain: &mut TerrainGenerator,
        collision: &CollisionSystem,
        input: PlayerInput,
        dt: f64,
    ) -> MoveResult {
        match input.movement.try_normalize() {
            Some(dir) => {
                self.velocity.x = dir.x * MOVEMENT_SPEED;
                self.velocity.z = dir.y * MOVEMENT_SPEED;
            }
            None => {
                self.velocity.x *= FRICTION;
                self.velocity.z *= FRICTION;
            }
        }

        self.grounded = collision.is_on_ground(terrain, self.position);
        if input.jump && self.grounded {
            self.velocity.y = JUMP_VELOCITY;
        }

        self.velocity.y = (self.velocity.y + GRAVITY * dt).max(TERMINAL_VELOCITY);

        let result = collision.move_with_collision(terrain, self.position, self.velocity * dt);
        if result.collided.contains(CollisionAxes::X) {
            self.velocity.x = 0.0;
        }
        if result.collided.contains(CollisionAxes::Y) {
            self.velocity.y = 0.0;
        }
        if result.collided.contains(CollisionAxes::Z) {
            self.velocity.z = 0.0;
        }
        self.position = result.position;
        result
    }
}
