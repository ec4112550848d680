//! Physics module for trigger detection and simple body integration
//!
//! Provides 2D overlap tests, collision layer filtering and a tiny
//! gravity integrator for dynamic props.

pub mod body;
pub mod collision;
pub mod collision_layers;

pub use body::{integrate, BodyKind, PhysicsSettings, RigidBody2D};
pub use collision::{Aabb2, TriggerVolume};
pub use collision_layers::CollisionLayers;
