//! Kinematic state shared by every sprite

use crate::foundation::math::{normalize_degrees, Vec2};

/// Position, velocity, orientation and liveness of a game object.
///
/// Positions and velocities are plain values: reading one hands out a
/// copy, and every change goes through a setter.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    position: Vec2,
    velocity: Vec2,
    face_angle: f64,
    move_angle: f64,
    alive: bool,
}

impl Entity {
    /// A dead entity at the origin, at rest, facing 0°
    pub fn new() -> Self {
        Self {
            position: Vec2::zeros(),
            velocity: Vec2::zeros(),
            face_angle: 0.0,
            move_angle: 0.0,
            alive: false,
        }
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move to `position`
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Current velocity in pixels per tick
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Direction the image faces, in `[0, 360)`
    pub fn face_angle(&self) -> f64 {
        self.face_angle
    }

    /// Set the facing angle (normalized)
    pub fn set_face_angle(&mut self, degrees: f64) {
        self.face_angle = normalize_degrees(degrees);
    }

    /// Direction of travel, in `[0, 360)`
    pub fn move_angle(&self) -> f64 {
        self.move_angle
    }

    /// Set the travel angle (normalized)
    pub fn set_move_angle(&mut self, degrees: f64) {
        self.move_angle = normalize_degrees(degrees);
    }

    /// Whether the entity takes part in update, draw and collision passes
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark alive or dead
    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    /// Advance position by one tick of velocity
    pub fn update_position(&mut self) {
        self.position += self.velocity;
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}
