//! Player bus controller
//!
//! Moves the bus from joystick axes inside a fixed screen rectangle and
//! carries the flags other systems check: whether it is still driving and
//! whether it is currently invulnerable.

use runner_engine::foundation::math::{Transform2D, Vec2};
use runner_engine::physics::{Aabb2, CollisionLayers, TriggerVolume};

use crate::config::PlayerConfig;
use crate::fuel::FuelGauge;
use crate::health::{DamageReport, HealthManager};

/// Joystick input for one frame, each axis in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputAxes {
    /// Left/right
    pub horizontal: f32,
    /// Down/up
    pub vertical: f32,
}

impl InputAxes {
    /// No input
    pub const NEUTRAL: Self = Self {
        horizontal: 0.0,
        vertical: 0.0,
    };

    /// Create input from raw axes
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self { horizontal, vertical }
    }

    fn clamped(self) -> Vec2 {
        Vec2::new(self.horizontal.clamp(-1.0, 1.0), self.vertical.clamp(-1.0, 1.0))
    }
}

/// The player vehicle
#[derive(Debug, Clone)]
pub struct BusController {
    /// World transform
    pub transform: Transform2D,
    velocity: Vec2,
    move_speed: f32,
    speed_boost: f32,
    max_move_speed: f32,
    min_bounds: Vec2,
    max_bounds: Vec2,
    half_extents: Vec2,
    active: bool,
    invulnerable: bool,
}

impl BusController {
    /// Create the bus at its start position
    pub fn new(config: &PlayerConfig) -> Self {
        let mut bus = Self {
            transform: Transform2D::from_position(config.start_position),
            velocity: Vec2::zeros(),
            move_speed: config.move_speed,
            speed_boost: config.speed_boost,
            max_move_speed: config.max_move_speed,
            min_bounds: config.min_bounds,
            max_bounds: config.max_bounds,
            half_extents: config.half_extents,
            active: true,
            invulnerable: false,
        };
        bus.clamp_to_bounds();
        bus
    }

    /// Drive for one frame. Ignored once the bus is deactivated.
    pub fn apply_input(&mut self, input: InputAxes, delta_time: f32) {
        if !self.active {
            self.velocity = Vec2::zeros();
            return;
        }
        self.velocity = input.clamped() * self.move_speed;
        self.transform.translate(self.velocity * delta_time);
        self.clamp_to_bounds();
    }

    fn clamp_to_bounds(&mut self) {
        let position = &mut self.transform.position;
        position.x = position.x.clamp(self.min_bounds.x, self.max_bounds.x);
        position.y = position.y.clamp(self.min_bounds.y, self.max_bounds.y);
    }

    /// Boost speed by one step, capped. Returns the new speed.
    pub fn increase_speed(&mut self) -> f32 {
        self.move_speed = (self.move_speed + self.speed_boost).min(self.max_move_speed);
        self.move_speed
    }

    /// Take a hit unless invulnerable.
    ///
    /// Deactivates the bus when the hit ends the game. Returns `None` when
    /// the hit was ignored.
    pub fn take_damage(
        &mut self,
        amount: u32,
        health: &mut HealthManager,
        fuel: Option<&mut FuelGauge>,
    ) -> Option<DamageReport> {
        if self.invulnerable {
            log::debug!("Hit ignored while invulnerable");
            return None;
        }
        let report = health.take_damage(amount, fuel);
        if report.game_over {
            self.deactivate();
        }
        Some(report)
    }

    /// Stop driving (game over)
    pub fn deactivate(&mut self) {
        self.active = false;
        self.velocity = Vec2::zeros();
    }

    /// Whether the bus still drives
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set by the health manager while a reward shield is up
    pub fn set_invulnerable(&mut self, invulnerable: bool) {
        self.invulnerable = invulnerable;
    }

    /// Whether hits are currently ignored
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    /// Current speed per unit of input
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Velocity from the last input
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Trigger volume reacting to obstacles and pickups
    pub fn trigger_volume(&self) -> TriggerVolume {
        TriggerVolume {
            bounds: Aabb2::new(self.transform.position, self.half_extents),
            layer: CollisionLayers::PLAYER,
            mask: CollisionLayers::mask(&[CollisionLayers::OBSTACLE, CollisionLayers::PICKUP]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FuelConfig, HealthConfig};
    use approx::assert_relative_eq;

    fn bus() -> BusController {
        BusController::new(&PlayerConfig::default())
    }

    #[test]
    fn test_moves_with_input() {
        let mut bus = bus();
        bus.apply_input(InputAxes::new(1.0, 0.0), 0.2);
        assert_relative_eq!(bus.position().x, -4.0);
        assert_relative_eq!(bus.velocity().x, 5.0);
    }

    #[test]
    fn test_clamped_to_bounds() {
        let mut bus = bus();
        bus.apply_input(InputAxes::new(1.0, 1.0), 10.0);
        assert_relative_eq!(bus.position().x, 7.46);
        assert_relative_eq!(bus.position().y, 1.37);

        bus.apply_input(InputAxes::new(-3.0, -1.0), 10.0);
        assert_relative_eq!(bus.position().x, -7.46);
        assert_relative_eq!(bus.position().y, -0.73);
    }

    #[test]
    fn test_speed_boost_is_capped() {
        let mut bus = bus();
        for _ in 0..10 {
            bus.increase_speed();
        }
        assert_relative_eq!(bus.move_speed(), 10.0);
    }

    #[test]
    fn test_invulnerable_ignores_damage() {
        let mut bus = bus();
        let mut health = HealthManager::new(&HealthConfig::default());
        let mut fuel = FuelGauge::new(&FuelConfig::default());

        bus.set_invulnerable(true);
        assert!(bus.take_damage(1, &mut health, Some(&mut fuel)).is_none());
        assert_eq!(health.current(), 3);
    }

    #[test]
    fn test_fatal_hit_deactivates() {
        let mut bus = bus();
        let mut health = HealthManager::new(&HealthConfig::default());
        let report = bus.take_damage(3, &mut health, None).unwrap();
        assert!(report.game_over);
        assert!(!bus.is_active());

        let before = bus.position();
        bus.apply_input(InputAxes::new(1.0, 0.0), 1.0);
        assert_eq!(bus.position(), before);
    }
}
