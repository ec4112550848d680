//! Minimal 2D rigid body integration
//!
//! Dynamic bodies fall under gravity and rest on a flat floor. This is just
//! enough simulation for bouncing props in a side-scroller; the host engine
//! may replace it with a real solver.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Whether a body is moved by game code or by the physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Moved directly by game code; ignored by the integrator
    Kinematic,
    /// Integrated every physics step
    Dynamic,
}

/// Velocity state of a 2D body (unit mass)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody2D {
    /// How the body is driven
    pub kind: BodyKind,
    /// Linear velocity in units per second
    pub velocity: Vec2,
    /// Angular velocity in degrees per second
    pub angular_velocity: f32,
}

impl RigidBody2D {
    /// A body moved by game code
    pub fn kinematic() -> Self {
        Self {
            kind: BodyKind::Kinematic,
            velocity: Vec2::zeros(),
            angular_velocity: 0.0,
        }
    }

    /// A body moved by the physics step
    pub fn dynamic() -> Self {
        Self {
            kind: BodyKind::Dynamic,
            ..Self::kinematic()
        }
    }

    /// Whether the physics step integrates this body
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    /// Apply an instantaneous velocity change
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }
}

/// World settings for the integrator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhysicsSettings {
    /// Gravity acceleration along Y (negative is down)
    pub gravity: f32,
    /// Height of the floor dynamic bodies rest on
    pub floor_y: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            floor_y: -1.5,
        }
    }
}

/// Integrate one dynamic body with semi-implicit Euler.
///
/// Kinematic bodies are left untouched. Returns true if the body hit the floor.
pub fn integrate(body: &mut RigidBody2D, position: &mut Vec2, settings: &PhysicsSettings, delta_time: f32) -> bool {
    if !body.is_dynamic() {
        return false;
    }
    body.velocity.y += settings.gravity * delta_time;
    *position += body.velocity * delta_time;

    if position.y < settings.floor_y {
        position.y = settings.floor_y;
        if body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kinematic_body_not_integrated() {
        let mut body = RigidBody2D::kinematic();
        body.velocity = Vec2::new(-7.0, 0.0);
        let mut position = Vec2::new(0.0, 0.0);
        integrate(&mut body, &mut position, &PhysicsSettings::default(), 1.0);
        assert_eq!(position, Vec2::zeros());
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut body = RigidBody2D::dynamic();
        let mut position = Vec2::new(0.0, 1.0);
        let settings = PhysicsSettings { gravity: -10.0, floor_y: -5.0 };
        integrate(&mut body, &mut position, &settings, 0.1);
        assert_relative_eq!(body.velocity.y, -1.0);
        assert_relative_eq!(position.y, 0.9);
    }

    #[test]
    fn test_floor_stops_fall() {
        let mut body = RigidBody2D::dynamic();
        body.velocity = Vec2::new(-7.0, -20.0);
        let mut position = Vec2::new(0.0, -1.4);
        let landed = integrate(&mut body, &mut position, &PhysicsSettings::default(), 0.1);
        assert!(landed);
        assert_relative_eq!(position.y, -1.5);
        assert_relative_eq!(body.velocity.y, 0.0);
        // Horizontal motion is preserved
        assert_relative_eq!(body.velocity.x, -7.0);
    }

    #[test]
    fn test_impulse_adds_velocity() {
        let mut body = RigidBody2D::dynamic();
        body.apply_impulse(Vec2::new(0.0, 8.0));
        assert_relative_eq!(body.velocity.y, 8.0);
    }
}
