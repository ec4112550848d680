//! Pooled world actors
//!
//! An [`Actor`] is one food item, pickup or obstacle. It scrolls left every
//! frame, reports when it leaves the screen, and hands its contact effect to
//! the session when the player touches it. Actors never talk to managers
//! directly; every side effect is returned to the caller.

use runner_engine::ecs::{LifecycleComponent, LifecycleState};
use runner_engine::foundation::math::{left, up, Transform2D, Vec2};
use runner_engine::physics::{Aabb2, CollisionLayers, RigidBody2D, TriggerVolume};
use runner_engine::pooling::Poolable;

use crate::config::{ContactEffect, MotionConfig, ReleaseEffect, RotatorConfig, SineClock};
use crate::prefab::{PoolCategory, Prefab, PrefabId};

/// A pooled entity moving through the world
#[derive(Debug, Clone)]
pub struct Actor {
    prefab: PrefabId,
    name: String,
    category: PoolCategory,
    pool: Option<PoolCategory>,

    move_speed: f32,
    off_screen_x: f32,
    motion: MotionConfig,
    rotator: Option<RotatorConfig>,
    contact: ContactEffect,
    release_effect: ReleaseEffect,
    half_extents: Vec2,

    /// World transform
    pub transform: Transform2D,
    /// Velocity state; dynamic only for physics bouncers
    pub body: RigidBody2D,
    /// Pool lifecycle
    pub lifecycle: LifecycleComponent,

    active: bool,
    collider_enabled: bool,
    physics_pending: bool,
    bounce_timer: f32,
    anchor_y: f32,
}

impl Actor {
    /// Instantiate a prefab. The actor starts hidden until a pool activates it.
    ///
    /// `pool` is the owning pool; `None` marks an actor placed by hand, which
    /// is destroyed instead of recycled.
    pub fn from_prefab(prefab: &Prefab, pool: Option<PoolCategory>) -> Self {
        let body = match prefab.motion {
            MotionConfig::PhysicsBounce { .. } => RigidBody2D::dynamic(),
            MotionConfig::Kinematic | MotionConfig::SineBounce { .. } => RigidBody2D::kinematic(),
        };
        Self {
            prefab: prefab.id,
            name: prefab.name.clone(),
            category: prefab.category,
            pool,
            move_speed: prefab.move_speed,
            off_screen_x: prefab.off_screen_x,
            motion: prefab.motion,
            rotator: prefab.rotator,
            contact: prefab.contact,
            release_effect: prefab.release_effect,
            half_extents: prefab.half_extents,
            transform: Transform2D::default(),
            body,
            lifecycle: LifecycleComponent::new(),
            active: false,
            collider_enabled: false,
            physics_pending: false,
            bounce_timer: 0.0,
            anchor_y: 0.0,
        }
    }

    /// Prefab this actor was built from
    pub fn prefab(&self) -> PrefabId {
        self.prefab
    }

    /// Prefab name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category of the prefab
    pub fn category(&self) -> PoolCategory {
        self.category
    }

    /// Owning pool, if any
    pub fn pool(&self) -> Option<PoolCategory> {
        self.pool
    }

    /// Re-wire the owning pool
    pub fn attach_pool(&mut self, pool: PoolCategory) {
        self.pool = Some(pool);
    }

    /// Leftward speed
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Effect applied on player contact
    pub fn contact(&self) -> ContactEffect {
        self.contact
    }

    /// Whether the trigger reacts to the player
    pub fn collider_enabled(&self) -> bool {
        self.collider_enabled
    }

    /// Whether the dynamic body still waits for its launch velocity
    pub fn physics_pending(&self) -> bool {
        self.physics_pending
    }

    /// Current trigger volume
    pub fn trigger_volume(&self) -> TriggerVolume {
        let layer = match self.category {
            PoolCategory::Collectible => CollisionLayers::PICKUP,
            PoolCategory::Obstacle => CollisionLayers::OBSTACLE,
        };
        TriggerVolume {
            bounds: Aabb2::new(self.transform.position, self.half_extents),
            layer,
            mask: CollisionLayers::PLAYER,
        }
    }

    /// Give a pending dynamic body its leftward launch velocity.
    ///
    /// Runs one physics step after activation. Returns true if the velocity
    /// was applied.
    pub fn commit_physics(&mut self) -> bool {
        if !self.physics_pending {
            return false;
        }
        self.physics_pending = false;
        if !self.body.is_dynamic() {
            return false;
        }
        self.body.velocity = left() * self.move_speed;
        true
    }

    /// Hold the scroll velocity on X before integration
    pub fn hold_scroll_velocity(&mut self) {
        if self.body.is_dynamic() && !self.physics_pending {
            self.body.velocity.x = -self.move_speed;
        }
    }

    /// Per-frame movement. Returns true if this frame pushed the actor
    /// off-screen, which requests its release.
    pub fn update(&mut self, delta_time: f32, game_time: f32) -> bool {
        if !self.lifecycle.is_active() {
            return false;
        }
        self.lifecycle.update(delta_time);

        match self.motion {
            MotionConfig::Kinematic => {
                self.transform.translate(left() * self.move_speed * delta_time);
            }
            MotionConfig::PhysicsBounce { bounce_force, bounce_interval } => {
                self.bounce_timer += delta_time;
                if self.bounce_timer >= bounce_interval {
                    self.body.apply_impulse(up() * bounce_force);
                    self.bounce_timer = 0.0;
                }
            }
            MotionConfig::SineBounce { frequency, height, clock } => {
                let t = match clock {
                    SineClock::TimeAlive => self.lifecycle.time_alive,
                    SineClock::GameTime => game_time,
                };
                self.transform.position.x -= self.move_speed * delta_time;
                self.transform.position.y = self.anchor_y + (t * frequency).sin() * height;
            }
        }

        if let Some(rotator) = self.rotator {
            self.spin(&rotator, delta_time);
        }

        self.transform.position.x <= self.off_screen_x && self.lifecycle.mark_off_screen()
    }

    fn spin(&mut self, rotator: &RotatorConfig, delta_time: f32) {
        let speed = if self.body.is_dynamic() {
            self.body.velocity.norm()
        } else {
            self.move_speed
        };
        if rotator.only_when_moving && speed < rotator.min_speed {
            return;
        }
        let direction = if rotator.clockwise { -1.0 } else { 1.0 };
        self.transform.rotate(direction * rotator.degrees_per_second * delta_time);
    }

    /// The player touched this actor.
    ///
    /// Returns the contact effect the first time only; later touches in the
    /// same activation, or touches after leaving the screen, return `None`.
    pub fn touch(&mut self) -> Option<ContactEffect> {
        if !self.collider_enabled || !self.lifecycle.mark_collided() {
            return None;
        }
        self.collider_enabled = false;
        Some(self.contact)
    }

    /// Whether releasing the actor now should show a pickup effect
    pub fn wants_release_effect(&self) -> bool {
        match self.release_effect {
            ReleaseEffect::Never => false,
            ReleaseEffect::OnCollect => self.lifecycle.state == LifecycleState::Collided,
            ReleaseEffect::OnAnyRelease => self.lifecycle.release_pending(),
        }
    }
}

impl Poolable for Actor {
    fn is_active(&self) -> bool {
        self.active
    }

    fn place(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    fn reset_state(&mut self) {
        self.collider_enabled = true;
        self.bounce_timer = 0.0;
        self.anchor_y = self.transform.position.y;
        self.body.angular_velocity = 0.0;
        // Dynamic bodies keep their velocity until the next physics step
        self.physics_pending = self.body.is_dynamic();
        if !self.physics_pending {
            self.body.velocity = Vec2::zeros();
        }
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            self.lifecycle.activate();
        } else {
            self.collider_enabled = false;
            self.lifecycle.return_to_pool();
        }
    }
}
