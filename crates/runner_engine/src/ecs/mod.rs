//! Entity bookkeeping shared by pooled game objects
//!
//! Provides generational entity handles plus the lifecycle and lifetime
//! components every pooled object carries.

pub mod entity;
pub mod components;

pub use entity::{EffectId, EffectStore, EntityId, EntityStore};
pub use components::{Lifetime, LifecycleComponent, LifecycleState};
