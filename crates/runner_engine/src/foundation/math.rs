//! Math utilities and types
//!
//! Provides the 2D math types used by side-scrolling game logic.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Leftward unit direction (the scroll direction of the world)
pub fn left() -> Vec2 {
    Vec2::new(-1.0, 0.0)
}

/// Upward unit direction
pub fn up() -> Vec2 {
    Vec2::new(0.0, 1.0)
}

/// Transform of a 2D entity: position plus rotation about the Z axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Position in world units
    pub position: Vec2,

    /// Rotation around Z in degrees
    pub rotation_degrees: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation_degrees: 0.0,
        }
    }
}

impl Transform2D {
    /// Create a transform at the given position with no rotation
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            rotation_degrees: 0.0,
        }
    }

    /// Move by an offset
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Rotate by an angle in degrees, keeping the result in [0, 360)
    pub fn rotate(&mut self, degrees: f32) {
        self.rotation_degrees = (self.rotation_degrees + degrees).rem_euclid(360.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_translate_left() {
        let mut transform = Transform2D::from_position(Vec2::new(11.0, 0.5));
        transform.translate(left() * 7.0 * 0.5);
        assert_relative_eq!(transform.position.x, 7.5);
        assert_relative_eq!(transform.position.y, 0.5);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut transform = Transform2D::default();
        transform.rotate(-90.0);
        assert_relative_eq!(transform.rotation_degrees, 270.0);
        transform.rotate(180.0);
        assert_relative_eq!(transform.rotation_degrees, 90.0);
    }
}
