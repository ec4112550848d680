//! # Runner Engine
//!
//! Frame-loop building blocks for 2D side-scrolling games.
//!
//! ## Features
//!
//! - **Object Pooling**: category queues that recycle entities instead of
//!   reallocating them
//! - **Frame Time**: host-driven clocks, interval timers and deadlines
//! - **Triggers**: 2D overlap tests with collision layer filtering
//! - **Events**: an outbound queue the host drains after each frame
//! - **Configuration**: RON/TOML settings through serde
//!
//! ## Quick Start
//!
//! ```rust
//! use runner_engine::prelude::*;
//!
//! struct Spark {
//!     active: bool,
//!     position: Vec2,
//! }
//!
//! impl Poolable for Spark {
//!     fn is_active(&self) -> bool { self.active }
//!     fn place(&mut self, position: Vec2) { self.position = position; }
//!     fn reset_state(&mut self) {}
//!     fn set_active(&mut self, active: bool) { self.active = active; }
//! }
//!
//! let mut store: EffectStore<Spark> = EffectStore::with_key();
//! let mut pool = RecyclePool::new("sparks");
//! pool.warm_up(&mut store, 4, || Some(Spark { active: false, position: Vec2::zeros() }));
//!
//! let spark = pool.acquire(&mut store, Vec2::new(1.0, 2.0), || None).unwrap();
//! assert!(store[spark.key].active);
//! pool.release(&mut store, spark.key);
//! assert_eq!(pool.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod physics;
pub mod pooling;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        ecs::{EffectId, EffectStore, EntityId, EntityStore, Lifetime, LifecycleComponent, LifecycleState},
        events::{EventHandler, EventQueue, Stamped},
        foundation::{
            math::{Transform2D, Vec2},
            time::{Deadline, FrameClock, IntervalTimer},
        },
        physics::{Aabb2, CollisionLayers, PhysicsSettings, RigidBody2D, TriggerVolume},
        pooling::{AcquireSource, Acquired, Poolable, RecyclePool, ReleaseOutcome},
    };
}
