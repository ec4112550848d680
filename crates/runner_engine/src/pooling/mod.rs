//! Object pooling system
//!
//! Reuses short-lived entities instead of allocating and destroying them
//! every time they enter or leave the screen.

pub mod recycle_pool;

pub use recycle_pool::{AcquireSource, Acquired, Poolable, RecyclePool, ReleaseOutcome};
