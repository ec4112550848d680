//! ECS Components module
//!
//! Components shared by every pooled entity regardless of game rules

pub mod lifecycle;
pub mod lifetime;

pub use lifecycle::{LifecycleComponent, LifecycleState};
pub use lifetime::Lifetime;
