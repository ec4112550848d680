//! Object Pool
//!
//! Owns every pooled actor plus the spawn schedule that feeds them into the
//! world: a collectible every `spawn_interval`, an obstacle wave every
//! `obstacle_spawn_interval`, the time-gated unlock ladder for obstacle
//! tiers and the obstacles-per-wave multiplier.
//!
//! Collectibles and obstacles share one slot map; each category keeps its own
//! [`RecyclePool`] queue. An actor is either queued in its category pool or
//! active in the world, never both.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use runner_engine::ecs::{EntityId, EntityStore};
use runner_engine::foundation::math::Vec2;
use runner_engine::foundation::time::IntervalTimer;
use runner_engine::pooling::{Acquired, Poolable, RecyclePool, ReleaseOutcome};

use crate::actor::Actor;
use crate::config::SpawnConfig;
use crate::prefab::{ObstacleTier, PoolCategory, PrefabCatalog, PrefabId};

/// Result of [`ObjectPool::release`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolRelease {
    /// Deactivated and queued in the given pool
    Requeued(PoolCategory),
    /// Already inactive; nothing happened
    AlreadyInactive,
    /// Had no owning pool and was destroyed
    Destroyed,
    /// Handle does not refer to a live actor
    Unknown,
}

/// What one scheduler tick did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// Actors activated this tick, in spawn order
    pub spawned: Vec<EntityId>,
    /// Obstacle tiers unlocked this tick
    pub unlocked: Vec<ObstacleTier>,
    /// New obstacles-per-wave value, if it changed
    pub obstacles_per_spawn: Option<u8>,
}

/// Pooled actors and their spawn schedule
pub struct ObjectPool {
    settings: SpawnConfig,
    catalog: PrefabCatalog,
    actors: EntityStore<Actor>,
    collectibles: RecyclePool<EntityId>,
    obstacles: RecyclePool<EntityId>,

    active_obstacles: Vec<PrefabId>,
    last_spawned: Option<PrefabId>,

    food_timer: IntervalTimer,
    obstacle_timer: IntervalTimer,
    game_time: f32,
    mid_unlocked: bool,
    late_unlocked: bool,
    obstacles_per_spawn: u8,

    rng: StdRng,
}

impl ObjectPool {
    /// Create an empty scheduler. Call [`start`](Self::start) to warm the pools.
    pub fn new(settings: SpawnConfig, catalog: PrefabCatalog, rng: StdRng) -> Self {
        let active_obstacles = catalog.tier(ObstacleTier::Early).to_vec();
        Self {
            food_timer: IntervalTimer::new(settings.spawn_interval),
            obstacle_timer: IntervalTimer::new(settings.obstacle_spawn_interval),
            settings,
            catalog,
            actors: EntityStore::with_key(),
            collectibles: RecyclePool::new("collectibles"),
            obstacles: RecyclePool::new("obstacles"),
            active_obstacles,
            last_spawned: None,
            game_time: 0.0,
            mid_unlocked: false,
            late_unlocked: false,
            obstacles_per_spawn: 1,
            rng,
        }
    }

    /// Create a scheduler with a deterministic random stream
    pub fn with_seed(settings: SpawnConfig, catalog: PrefabCatalog, seed: u64) -> Self {
        Self::new(settings, catalog, StdRng::seed_from_u64(seed))
    }

    /// Warm both pools with `pool_size` inactive actors each
    pub fn start(&mut self) {
        let size = self.settings.pool_size;
        let collectibles = self.warm_up(PoolCategory::Collectible, size);
        let obstacles = self.warm_up(PoolCategory::Obstacle, size);
        log::info!(
            "Object pool started: {} collectibles, {} obstacles ({} obstacle types active)",
            collectibles,
            obstacles,
            self.active_obstacles.len()
        );
    }

    /// Pre-instantiate up to `count` inactive actors of a category.
    /// Returns how many were queued.
    pub fn warm_up(&mut self, category: PoolCategory, count: usize) -> usize {
        let catalog = &self.catalog;
        let rng = &mut self.rng;
        match category {
            PoolCategory::Collectible => {
                let weight = self.settings.common_weight;
                self.collectibles.warm_up(&mut self.actors, count, || {
                    pick_collectible(catalog, rng, weight).and_then(|id| instantiate(catalog, id))
                })
            }
            PoolCategory::Obstacle => {
                let active = &self.active_obstacles;
                self.obstacles.warm_up(&mut self.actors, count, || {
                    active.choose(rng).and_then(|&id| instantiate(catalog, id))
                })
            }
        }
    }

    /// Take an actor of `category` out of its pool and place it at `position`.
    ///
    /// Instantiates a new actor when the pool is empty. Returns `None` only
    /// when no prefab of the category exists.
    pub fn acquire(&mut self, category: PoolCategory, position: Vec2) -> Option<EntityId> {
        match category {
            PoolCategory::Collectible => {
                let catalog = &self.catalog;
                let rng = &mut self.rng;
                let weight = self.settings.common_weight;
                let acquired = self.collectibles.acquire(&mut self.actors, position, || {
                    pick_collectible(catalog, rng, weight).and_then(|id| instantiate(catalog, id))
                });
                self.finish_acquire(acquired, PoolCategory::Collectible)
            }
            PoolCategory::Obstacle => self.acquire_obstacle(position, false),
        }
    }

    /// Obstacle acquire with best-effort avoidance of the last spawned prefab.
    pub fn acquire_obstacle(&mut self, position: Vec2, avoid_duplicate: bool) -> Option<EntityId> {
        let last = self.last_spawned;
        let retries = if avoid_duplicate && last.is_some() {
            self.settings.duplicate_retry_attempts
        } else {
            0
        };

        let catalog = &self.catalog;
        let active = &self.active_obstacles;
        let rng = &mut self.rng;
        let acquired = self.obstacles.acquire_avoiding(
            &mut self.actors,
            position,
            |actor: &Actor| Some(actor.prefab()) == last,
            retries,
            || pick_obstacle(active, last, retries, rng).and_then(|id| instantiate(catalog, id)),
        );
        self.finish_acquire(acquired, PoolCategory::Obstacle)
    }

    fn finish_acquire(&mut self, acquired: Option<Acquired<EntityId>>, category: PoolCategory) -> Option<EntityId> {
        let Some(acquired) = acquired else {
            log::warn!("No {} prefab available, spawn skipped", category);
            return None;
        };
        let actor = self.actors.get_mut(acquired.key)?;
        actor.attach_pool(category);
        if category == PoolCategory::Obstacle {
            self.last_spawned = Some(actor.prefab());
        }
        log::debug!(
            "Spawned {} at ({:.2}, {:.2}) [{:?}]",
            actor.name(),
            actor.transform.position.x,
            actor.transform.position.y,
            acquired.source
        );
        Some(acquired.key)
    }

    /// Place an actor that belongs to no pool. It is destroyed on release.
    pub fn place_unpooled(&mut self, prefab: PrefabId, position: Vec2) -> Option<EntityId> {
        let mut actor = self.catalog.get(prefab).map(|prefab| Actor::from_prefab(prefab, None))?;
        actor.place(position);
        actor.reset_state();
        actor.set_active(true);
        Some(self.actors.insert(actor))
    }

    /// Return an actor to its pool.
    ///
    /// Only active actors are accepted, so a second release is a no-op. An
    /// actor without an owning pool is destroyed.
    pub fn release(&mut self, id: EntityId) -> PoolRelease {
        let Some(actor) = self.actors.get(id) else {
            log::warn!("Release of unknown actor ignored");
            return PoolRelease::Unknown;
        };
        if !actor.is_active() {
            return PoolRelease::AlreadyInactive;
        }
        let Some(category) = actor.pool() else {
            log::warn!("{} has no owning pool, destroying it", actor.name());
            self.actors.remove(id);
            return PoolRelease::Destroyed;
        };

        let outcome = match category {
            PoolCategory::Collectible => self.collectibles.release(&mut self.actors, id),
            PoolCategory::Obstacle => self.obstacles.release(&mut self.actors, id),
        };
        match outcome {
            ReleaseOutcome::Requeued => PoolRelease::Requeued(category),
            ReleaseOutcome::AlreadyInactive => PoolRelease::AlreadyInactive,
            ReleaseOutcome::Unknown => PoolRelease::Unknown,
        }
    }

    /// Advance the schedule by one frame
    pub fn tick(&mut self, delta_time: f32) -> SpawnReport {
        self.game_time += delta_time;
        let mut report = SpawnReport::default();

        self.update_unlocks(&mut report);
        self.update_multiplier(&mut report);

        if self.food_timer.tick(delta_time) {
            let position = Vec2::new(self.settings.spawn_x, self.random_y());
            if let Some(id) = self.acquire(PoolCategory::Collectible, position) {
                report.spawned.push(id);
            }
        }

        if !self.active_obstacles.is_empty() && self.obstacle_timer.tick(delta_time) {
            let positions = self.generate_spawn_positions(usize::from(self.obstacles_per_spawn));
            for (slot, position) in positions.into_iter().enumerate() {
                if let Some(id) = self.acquire_obstacle(position, slot > 0) {
                    report.spawned.push(id);
                }
            }
        }

        report
    }

    fn update_unlocks(&mut self, report: &mut SpawnReport) {
        if !self.mid_unlocked
            && self.game_time >= self.settings.mid_game_unlock_time
            && !self.catalog.tier(ObstacleTier::Mid).is_empty()
        {
            self.mid_unlocked = true;
            self.unlock(ObstacleTier::Mid);
            report.unlocked.push(ObstacleTier::Mid);
        }
        if !self.late_unlocked
            && self.game_time >= self.settings.late_game_unlock_time
            && !self.catalog.tier(ObstacleTier::Late).is_empty()
        {
            self.late_unlocked = true;
            self.unlock(ObstacleTier::Late);
            report.unlocked.push(ObstacleTier::Late);
        }
    }

    fn unlock(&mut self, tier: ObstacleTier) {
        let ids = self.catalog.tier(tier).to_vec();
        self.active_obstacles.extend_from_slice(&ids);
        log::info!(
            "{:?} obstacles unlocked at {:.1}s, {} types active",
            tier,
            self.game_time,
            self.active_obstacles.len()
        );

        let extra = self.settings.unlock_warm_up;
        if extra > 0 {
            let catalog = &self.catalog;
            let rng = &mut self.rng;
            let queued = self.obstacles.warm_up(&mut self.actors, extra, || {
                ids.choose(rng).and_then(|&id| instantiate(catalog, id))
            });
            log::debug!("Warmed {} {:?} obstacles", queued, tier);
        }
    }

    fn update_multiplier(&mut self, report: &mut SpawnReport) {
        let target = if self.game_time >= self.settings.triple_spawn_time {
            3
        } else if self.game_time >= self.settings.double_spawn_time {
            2
        } else {
            1
        };
        if target > self.obstacles_per_spawn {
            self.obstacles_per_spawn = target;
            report.obstacles_per_spawn = Some(target);
            log::info!("Obstacle waves now spawn {} at {:.1}s", target, self.game_time);
        }
    }

    /// Positions for one obstacle wave.
    ///
    /// Each Y is redrawn until it keeps `min_y_distance` from every earlier
    /// slot; after `position_attempts` draws the last one is accepted even if
    /// it is too close.
    pub fn generate_spawn_positions(&mut self, count: usize) -> Vec<Vec2> {
        let mut positions: Vec<Vec2> = Vec::with_capacity(count);
        let min_distance = self.settings.min_y_distance;
        let variance = self.settings.spawn_x_variance;

        for _ in 0..count {
            let mut y = self.random_y();
            let mut attempts = 1;
            while attempts < self.settings.position_attempts
                && positions.iter().any(|p| (p.y - y).abs() < min_distance)
            {
                y = self.random_y();
                attempts += 1;
            }
            let x = self.settings.spawn_x + self.rng.gen_range(-variance..=variance);
            positions.push(Vec2::new(x, y));
        }
        positions
    }

    fn random_y(&mut self) -> f32 {
        self.rng.gen_range(self.settings.spawn_min_y..self.settings.spawn_max_y)
    }

    /// Look up an actor
    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(id)
    }

    /// Look up an actor mutably
    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    /// Every actor, pooled or not
    pub fn actors(&self) -> impl Iterator<Item = (EntityId, &Actor)> {
        self.actors.iter()
    }

    /// Every actor, mutably
    pub fn actors_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Actor)> {
        self.actors.iter_mut()
    }

    /// Handles of actors currently in the world
    pub fn active_ids(&self) -> Vec<EntityId> {
        self.actors
            .iter()
            .filter(|(_, actor)| actor.is_active())
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether `id` is waiting in a pool queue
    pub fn is_queued(&self, id: EntityId) -> bool {
        self.collectibles.contains(id) || self.obstacles.contains(id)
    }

    /// Number of queued actors in a pool
    pub fn pooled_count(&self, category: PoolCategory) -> usize {
        match category {
            PoolCategory::Collectible => self.collectibles.len(),
            PoolCategory::Obstacle => self.obstacles.len(),
        }
    }

    /// Number of active actors of a category
    pub fn active_count(&self, category: PoolCategory) -> usize {
        self.actors
            .values()
            .filter(|actor| actor.is_active() && actor.category() == category)
            .count()
    }

    /// Actors a pool has instantiated so far, warm-up included
    pub fn created_count(&self, category: PoolCategory) -> usize {
        match category {
            PoolCategory::Collectible => self.collectibles.created_count(),
            PoolCategory::Obstacle => self.obstacles.created_count(),
        }
    }

    /// Seconds since the schedule started
    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    /// Obstacles per wave (1, 2 or 3)
    pub fn obstacles_per_spawn(&self) -> u8 {
        self.obstacles_per_spawn
    }

    /// Obstacle prefabs eligible for spawning
    pub fn active_obstacle_prefabs(&self) -> &[PrefabId] {
        &self.active_obstacles
    }

    /// Whether mid-game obstacles have been unlocked
    pub fn is_mid_game_unlocked(&self) -> bool {
        self.mid_unlocked
    }

    /// Whether late-game obstacles have been unlocked
    pub fn is_late_game_unlocked(&self) -> bool {
        self.late_unlocked
    }

    /// Most recently spawned obstacle prefab
    pub fn last_spawned_obstacle(&self) -> Option<PrefabId> {
        self.last_spawned
    }

    /// Prefabs known to this scheduler
    pub fn catalog(&self) -> &PrefabCatalog {
        &self.catalog
    }
}

fn instantiate(catalog: &PrefabCatalog, id: PrefabId) -> Option<Actor> {
    catalog.get(id).map(|prefab| Actor::from_prefab(prefab, Some(prefab.category)))
}

/// Weighted collectible pick: common with probability `common_weight`, rare
/// otherwise, falling back to the first common prefab.
fn pick_collectible(catalog: &PrefabCatalog, rng: &mut StdRng, common_weight: f32) -> Option<PrefabId> {
    let roll: f32 = rng.gen();
    let common = catalog.common();
    let rare = catalog.rare();
    if roll <= common_weight && !common.is_empty() {
        common.choose(rng).copied()
    } else if !rare.is_empty() {
        rare.choose(rng).copied()
    } else {
        common.first().copied()
    }
}

/// Uniform obstacle pick, re-rolled up to `retries` times while it repeats
/// `last`. Re-rolls only happen with more than one active type.
fn pick_obstacle(active: &[PrefabId], last: Option<PrefabId>, retries: usize, rng: &mut StdRng) -> Option<PrefabId> {
    let mut pick = *active.choose(rng)?;
    if let Some(last) = last {
        if active.len() > 1 {
            let mut attempts = 0;
            while pick == last && attempts < retries {
                pick = *active.choose(rng)?;
                attempts += 1;
            }
        }
    }
    Some(pick)
}
