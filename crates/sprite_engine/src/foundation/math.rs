//! Math utilities and types
//!
//! Provides the 2D vector type used for sprite kinematics, degree-based
//! angle helpers and an integer rectangle with AWT-style overlap rules.

pub use nalgebra::Vector2;

/// 2D vector type (positions and velocities, in pixels and pixels/tick)
pub type Vec2 = Vector2<f64>;

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// X component of a unit vector pointing at `degrees`
pub fn angle_move_x(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Y component of a unit vector pointing at `degrees`
pub fn angle_move_y(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// Unit vector pointing at `degrees` (0° = +x, 90° = +y, screen coordinates)
pub fn heading(degrees: f64) -> Vec2 {
    Vec2::new(angle_move_x(degrees), angle_move_y(degrees))
}

/// Axis-aligned integer rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge
    pub x: i32,

    /// Top edge
    pub y: i32,

    /// Width in pixels
    pub width: i32,

    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// A rectangle with no positive area never intersects anything
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Strict overlap test: touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (tx, ty) = (i64::from(self.x), i64::from(self.y));
        let (rx, ry) = (i64::from(other.x), i64::from(other.y));
        rx < tx + i64::from(self.width)
            && ry < ty + i64::from(self.height)
            && tx < rx + i64::from(other.width)
            && ty < ry + i64::from(other.height)
    }

    /// Whether the point lies inside (left/top edges inclusive)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        let (left, top) = (f64::from(self.x), f64::from(self.y));
        x >= left && y >= top && x < left + f64::from(self.width) && y < top + f64::from(self.height)
    }
}
