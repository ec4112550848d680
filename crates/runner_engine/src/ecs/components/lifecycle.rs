//! Lifecycle component for pooled entities
//!
//! A pooled entity cycles through
//! `Pooled -> Active -> (Collided | OffScreen) -> Pooled`.
//! The two exit states both mean "release requested"; whichever transition
//! happens first in a frame wins and the other becomes a no-op.

/// Current state of a pooled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Sitting in a pool queue, invisible and not updated
    Pooled,
    /// In the world, moving every frame
    Active,
    /// Touched the player; release is pending
    Collided,
    /// Crossed the off-screen threshold; release is pending
    OffScreen,
}

/// Component tracking where a pooled entity is in its lifecycle
#[derive(Debug, Clone)]
pub struct LifecycleComponent {
    /// Current state
    pub state: LifecycleState,

    /// Time spent in the current state (seconds)
    pub state_time: f32,

    /// Time spent active since the last activation (seconds)
    pub time_alive: f32,

    /// Number of times this entity has been taken out of a pool
    pub activations: u32,
}

impl LifecycleComponent {
    /// Create a lifecycle that starts inside a pool
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Pooled,
            state_time: 0.0,
            time_alive: 0.0,
            activations: 0,
        }
    }

    /// Advance timers; call once per frame while in the world
    pub fn update(&mut self, delta_time: f32) {
        self.state_time += delta_time;
        if self.state == LifecycleState::Active {
            self.time_alive += delta_time;
        }
    }

    /// Enter the world. Resets per-activation timers.
    pub fn activate(&mut self) {
        self.set_state(LifecycleState::Active);
        self.time_alive = 0.0;
        self.activations += 1;
    }

    /// Record a collision. Returns false if the entity was not active.
    pub fn mark_collided(&mut self) -> bool {
        self.request_exit(LifecycleState::Collided)
    }

    /// Record leaving the screen. Returns false if the entity was not active.
    pub fn mark_off_screen(&mut self) -> bool {
        self.request_exit(LifecycleState::OffScreen)
    }

    /// Go back into the pool
    pub fn return_to_pool(&mut self) {
        self.set_state(LifecycleState::Pooled);
    }

    /// Whether the entity is in the world (active or waiting for release)
    pub fn is_in_world(&self) -> bool {
        self.state != LifecycleState::Pooled
    }

    /// Whether the entity is moving and can still collide
    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    /// Whether a release has been requested but not yet performed
    pub fn release_pending(&self) -> bool {
        matches!(self.state, LifecycleState::Collided | LifecycleState::OffScreen)
    }

    fn request_exit(&mut self, exit: LifecycleState) -> bool {
        if self.state == LifecycleState::Active {
            self.set_state(exit);
            true
        } else {
            false
        }
    }

    fn set_state(&mut self, new_state: LifecycleState) {
        if self.state != new_state {
            self.state = new_state;
            self.state_time = 0.0;
        }
    }
}

impl Default for LifecycleComponent {
    fn default() -> Self {
        Self::new()
    }
}
