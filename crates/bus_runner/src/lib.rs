//! # Bus Runner
//!
//! Game core of a side-scrolling runner: a bus dodges obstacles and collects
//! food and fuel while pooled actors stream in from the right.
//!
//! The host feeds [`GameSession::frame`] a delta time and joystick axes, then
//! drains [`GameEvent`]s to update sprites and the HUD.
//!
//! ```rust
//! use bus_runner::{GameConfig, GameSession, InputAxes};
//!
//! let mut config = GameConfig::default();
//! config.seed = Some(7);
//! let mut session = GameSession::new(&config).unwrap();
//!
//! for _ in 0..120 {
//!     session.frame(1.0 / 60.0, InputAxes::new(0.0, 1.0));
//! }
//! assert!(!session.drain_events().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod actor;
pub mod bus;
pub mod config;
pub mod effect_pool;
pub mod error;
pub mod fuel;
pub mod health;
pub mod object_pool;
pub mod prefab;
pub mod score;
pub mod session;

pub use bus::{BusController, InputAxes};
pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use object_pool::{ObjectPool, PoolRelease, SpawnReport};
pub use prefab::{ObstacleTier, PoolCategory, PrefabCatalog, PrefabId};
pub use score::{ScoreManager, ScoreSink};
pub use session::{GameEvent, GameSession};
