//! Pickup effect pool
//!
//! Short-lived visual effects shown where a pickup was collected or
//! recycled. Each one goes back to the pool after a fixed lifetime.

use runner_engine::ecs::{EffectId, EffectStore, Lifetime};
use runner_engine::foundation::math::Vec2;
use runner_engine::pooling::{Poolable, RecyclePool, ReleaseOutcome};

use crate::config::EffectConfig;

/// One pickup effect instance
#[derive(Debug, Clone)]
pub struct Effect {
    /// Where the effect is shown
    pub position: Vec2,
    /// When the effect goes back to the pool
    pub lifetime: Lifetime,
    active: bool,
}

impl Effect {
    fn new(duration: f32) -> Self {
        Self {
            position: Vec2::zeros(),
            lifetime: Lifetime::new(0.0, duration),
            active: false,
        }
    }
}

impl Poolable for Effect {
    fn is_active(&self) -> bool {
        self.active
    }

    fn place(&mut self, position: Vec2) {
        self.position = position;
    }

    fn reset_state(&mut self) {}

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Pool of pickup effects
pub struct EffectPool {
    effects: EffectStore<Effect>,
    pool: RecyclePool<EffectId>,
    duration: f32,
}

impl EffectPool {
    /// Create the pool and warm it with `pool_size` hidden effects
    pub fn new(config: &EffectConfig) -> Self {
        let mut effect_pool = Self {
            effects: EffectStore::with_key(),
            pool: RecyclePool::new("effects"),
            duration: config.lifetime,
        };
        let duration = effect_pool.duration;
        effect_pool
            .pool
            .warm_up(&mut effect_pool.effects, config.pool_size, || Some(Effect::new(duration)));
        effect_pool
    }

    /// Show an effect at `position`, starting its lifetime at `now`
    pub fn spawn(&mut self, position: Vec2, now: f32) -> Option<EffectId> {
        let duration = self.duration;
        let acquired = self
            .pool
            .acquire(&mut self.effects, position, || Some(Effect::new(duration)))?;
        if let Some(effect) = self.effects.get_mut(acquired.key) {
            effect.lifetime.restart(now);
        }
        Some(acquired.key)
    }

    /// Return every effect whose lifetime ended by `now`. Returns their ids.
    pub fn tick(&mut self, now: f32) -> Vec<EffectId> {
        let expired: Vec<EffectId> = self
            .effects
            .iter()
            .filter(|(_, effect)| effect.active && effect.lifetime.is_expired(now))
            .map(|(id, _)| id)
            .collect();
        for &id in &expired {
            self.pool.release(&mut self.effects, id);
        }
        expired
    }

    /// Return an effect early. Releasing an inactive effect is a no-op.
    pub fn release(&mut self, id: EffectId) -> ReleaseOutcome {
        self.pool.release(&mut self.effects, id)
    }

    /// Look up an effect
    pub fn get(&self, id: EffectId) -> Option<&Effect> {
        self.effects.get(id)
    }

    /// Effects currently visible
    pub fn active_count(&self) -> usize {
        self.effects.values().filter(|effect| effect.active).count()
    }

    /// Effects waiting in the pool
    pub fn pooled_count(&self) -> usize {
        self.pool.len()
    }
}
