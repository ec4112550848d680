//! Game session
//!
//! Owns every game system and runs them in a fixed order once per frame:
//!
//! 1. advance the clock, end expired shields and effects
//! 2. move the bus from input
//! 3. run the spawn schedule
//! 4. physics step for dynamic props
//! 5. move actors, collect off-screen release requests
//! 6. player overlaps and contact effects
//! 7. release everything that asked for it
//!
//! Everything the host needs to mirror (entities shown or hidden, HUD
//! counters) is queued as a [`GameEvent`].

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use runner_engine::config::Config;
use runner_engine::ecs::{EffectId, EntityId};
use runner_engine::events::{EventQueue, Stamped};
use runner_engine::foundation::math::Vec2;
use runner_engine::foundation::time::FrameClock;
use runner_engine::physics::{integrate, PhysicsSettings};

use crate::bus::{BusController, InputAxes};
use crate::config::{ContactEffect, GameConfig};
use crate::effect_pool::EffectPool;
use crate::error::{GameError, GameResult};
use crate::fuel::FuelGauge;
use crate::health::{HealthManager, LifeReward};
use crate::object_pool::{ObjectPool, PoolRelease};
use crate::prefab::{ObstacleTier, PoolCategory, PrefabCatalog};
use crate::score::{ScoreManager, ScoreSink};

/// Something the host should react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An actor entered the world
    EntityActivated {
        /// Actor handle
        id: EntityId,
        /// Owning category
        category: PoolCategory,
        /// Spawn position
        position: Vec2,
    },
    /// An actor went back to its pool
    EntityReleased {
        /// Actor handle
        id: EntityId,
        /// Pool it went back to
        category: PoolCategory,
    },
    /// An actor without a pool was destroyed
    EntityDestroyed {
        /// Actor handle, now stale
        id: EntityId,
    },
    /// A pickup effect became visible
    EffectSpawned {
        /// Effect handle
        id: EffectId,
        /// Where it is shown
        position: Vec2,
    },
    /// A pickup effect went back to its pool
    EffectExpired {
        /// Effect handle
        id: EffectId,
    },
    /// Score changed
    ScoreChanged {
        /// New score
        score: u32,
    },
    /// Health changed
    HealthChanged {
        /// New health
        health: u32,
    },
    /// Fuel changed
    FuelChanged {
        /// New fuel level
        fuel: u32,
    },
    /// Bus speed changed
    SpeedChanged {
        /// New speed per unit of input
        speed: f32,
    },
    /// Shield raised or dropped
    InvulnerabilityChanged {
        /// Whether the shield is now up
        active: bool,
    },
    /// Health ran out
    GameOver {
        /// Final score
        score: u32,
    },
    /// An obstacle tier joined the spawn set
    ObstaclesUnlocked {
        /// Tier that unlocked
        tier: ObstacleTier,
        /// Obstacle types now eligible
        active_types: usize,
    },
    /// Obstacles per wave changed
    SpawnMultiplierChanged {
        /// New obstacles per wave
        per_spawn: u8,
    },
}

/// One run of the game
pub struct GameSession {
    clock: FrameClock,
    physics: PhysicsSettings,
    objects: ObjectPool,
    effects: Option<EffectPool>,
    health: HealthManager,
    score: Box<dyn ScoreSink>,
    fuel: FuelGauge,
    bus: BusController,
    events: EventQueue<GameEvent>,
    reported_overlaps: Vec<EntityId>,
}

impl GameSession {
    /// Validate the configuration and build a session with warmed pools
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        Self::with_score_sink(config, Box::new(ScoreManager::new(&config.score)))
    }

    /// Build a session that reports pickup points to `score`
    pub fn with_score_sink(config: &GameConfig, score: Box<dyn ScoreSink>) -> GameResult<Self> {
        config.validate()?;
        let catalog = PrefabCatalog::from_tiers(&config.prefabs)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut objects = ObjectPool::new(config.spawn.clone(), catalog, rng);
        objects.start();

        let effects = if config.effects.enabled {
            Some(EffectPool::new(&config.effects))
        } else {
            log::info!("Pickup effects disabled");
            None
        };

        log::info!("Game session created (seed: {:?})", config.seed);
        Ok(Self {
            clock: FrameClock::new(),
            physics: config.physics.clone(),
            objects,
            effects,
            health: HealthManager::new(&config.health),
            score,
            fuel: FuelGauge::new(&config.fuel),
            bus: BusController::new(&config.player),
            events: EventQueue::new(),
            reported_overlaps: Vec::new(),
        })
    }

    /// Load a RON or TOML configuration and build a session from it
    pub fn from_config_file(path: impl AsRef<Path>) -> GameResult<Self> {
        let config = GameConfig::load_from_file(path)?;
        Self::new(&config)
    }

    /// Run one frame
    pub fn frame(&mut self, delta_time: f32, input: InputAxes) {
        self.clock.advance(delta_time);
        let dt = self.clock.delta_time();
        let now = self.clock.total_time();

        if self.health.tick(now, Some(&mut self.bus)) {
            self.events.send(now, GameEvent::InvulnerabilityChanged { active: false });
        }
        if let Some(effects) = &mut self.effects {
            for id in effects.tick(now) {
                self.events.send(now, GameEvent::EffectExpired { id });
            }
        }

        self.bus.apply_input(input, dt);

        self.run_schedule(dt, now);
        self.step_physics(dt);

        let mut releases: Vec<EntityId> = self
            .objects
            .actors_mut()
            .filter_map(|(id, actor)| actor.update(dt, now).then_some(id))
            .collect();

        self.resolve_contacts(now, &mut releases);

        for id in releases {
            self.release_actor(id, now);
        }
    }

    fn run_schedule(&mut self, dt: f32, now: f32) {
        let report = self.objects.tick(dt);

        for tier in report.unlocked {
            let active_types = self.objects.active_obstacle_prefabs().len();
            self.events.send(now, GameEvent::ObstaclesUnlocked { tier, active_types });
        }
        if let Some(per_spawn) = report.obstacles_per_spawn {
            self.events.send(now, GameEvent::SpawnMultiplierChanged { per_spawn });
        }
        for id in report.spawned {
            if let Some(actor) = self.objects.actor(id) {
                self.events.send(
                    now,
                    GameEvent::EntityActivated {
                        id,
                        category: actor.category(),
                        position: actor.transform.position,
                    },
                );
            }
        }
    }

    fn step_physics(&mut self, dt: f32) {
        let settings = &self.physics;
        for (_, actor) in self.objects.actors_mut() {
            if !actor.lifecycle.is_active() || !actor.body.is_dynamic() {
                continue;
            }
            actor.commit_physics();
            actor.hold_scroll_velocity();
            integrate(&mut actor.body, &mut actor.transform.position, settings, dt);
        }
    }

    fn resolve_contacts(&mut self, now: f32, releases: &mut Vec<EntityId>) {
        let mut touched = std::mem::take(&mut self.reported_overlaps);
        if !self.bus.is_active() {
            return;
        }

        let player = self.bus.trigger_volume();
        touched.extend(
            self.objects
                .actors()
                .filter(|(_, actor)| actor.collider_enabled() && actor.lifecycle.is_active())
                .filter(|(_, actor)| player.overlaps(&actor.trigger_volume()))
                .map(|(id, _)| id),
        );

        for id in touched {
            let Some(effect) = self.objects.actor_mut(id).and_then(|actor| actor.touch()) else {
                continue;
            };
            self.apply_contact(effect, now);
            releases.push(id);
            if !self.bus.is_active() {
                break;
            }
        }
    }

    fn apply_contact(&mut self, effect: ContactEffect, now: f32) {
        match effect {
            ContactEffect::Damage(amount) => {
                let Some(report) = self.bus.take_damage(amount, &mut self.health, Some(&mut self.fuel)) else {
                    return;
                };
                self.events.send(now, GameEvent::HealthChanged { health: report.health });
                if report.fuel_lost {
                    self.events.send(now, GameEvent::FuelChanged { fuel: self.fuel.current() });
                }
                if report.game_over {
                    self.events.send(now, GameEvent::GameOver { score: self.score.score() });
                }
            }
            ContactEffect::Score(points) => {
                let rewards = self.score.add_points(points);
                self.events.send(now, GameEvent::ScoreChanged { score: self.score.score() });
                for _ in 0..rewards {
                    self.reward_life(now);
                }
            }
            ContactEffect::Refuel => {
                if self.fuel.add_fuel() {
                    self.events.send(now, GameEvent::FuelChanged { fuel: self.fuel.current() });
                }
                let before = self.bus.move_speed();
                let speed = self.bus.increase_speed();
                if speed > before {
                    self.events.send(now, GameEvent::SpeedChanged { speed });
                }
            }
        }
    }

    fn reward_life(&mut self, now: f32) {
        match self.health.reward_life(now, Some(&mut self.bus)) {
            LifeReward::Restored { health } => {
                self.events.send(now, GameEvent::HealthChanged { health });
            }
            LifeReward::Invulnerable { .. } => {
                self.events.send(now, GameEvent::InvulnerabilityChanged { active: true });
            }
            LifeReward::AlreadyInvulnerable => {}
        }
    }

    fn release_actor(&mut self, id: EntityId, now: f32) {
        let effect_at = self
            .objects
            .actor(id)
            .filter(|actor| actor.wants_release_effect())
            .map(|actor| actor.transform.position);

        match self.objects.release(id) {
            PoolRelease::Requeued(category) => {
                self.events.send(now, GameEvent::EntityReleased { id, category });
            }
            PoolRelease::Destroyed => {
                self.events.send(now, GameEvent::EntityDestroyed { id });
            }
            PoolRelease::AlreadyInactive | PoolRelease::Unknown => return,
        }

        if let (Some(position), Some(effects)) = (effect_at, &mut self.effects) {
            if let Some(effect) = effects.spawn(position, now) {
                self.events.send(now, GameEvent::EffectSpawned { id: effect, position });
            }
        }
    }

    /// Report a player overlap detected by the host. Resolved next frame.
    pub fn report_overlap(&mut self, id: EntityId) {
        self.reported_overlaps.push(id);
    }

    /// Place a prefab by name outside any pool, like an actor laid out in a
    /// level by hand. It is destroyed instead of recycled.
    pub fn place_actor(&mut self, name: &str, position: Vec2) -> GameResult<EntityId> {
        let prefab = self
            .objects
            .catalog()
            .find(name)
            .ok_or_else(|| GameError::UnknownPrefab(name.to_string()))?;
        let id = self
            .objects
            .place_unpooled(prefab, position)
            .ok_or_else(|| GameError::UnknownPrefab(name.to_string()))?;
        if let Some(actor) = self.objects.actor(id) {
            let event = GameEvent::EntityActivated {
                id,
                category: actor.category(),
                position,
            };
            self.events.send(self.clock.total_time(), event);
        }
        Ok(id)
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<Stamped<GameEvent>> {
        self.events.drain()
    }

    /// Event queue, for registering handlers
    pub fn events_mut(&mut self) -> &mut EventQueue<GameEvent> {
        &mut self.events
    }

    /// Deliver queued events to registered handlers
    pub fn dispatch_events(&mut self) -> usize {
        self.events.dispatch()
    }

    /// Pooled actors and spawn schedule
    pub fn objects(&self) -> &ObjectPool {
        &self.objects
    }

    /// Pickup effects, when enabled
    pub fn effects(&self) -> Option<&EffectPool> {
        self.effects.as_ref()
    }

    /// Player health
    pub fn health(&self) -> &HealthManager {
        &self.health
    }

    /// Score
    pub fn score(&self) -> &dyn ScoreSink {
        self.score.as_ref()
    }

    /// Fuel gauge
    pub fn fuel(&self) -> &FuelGauge {
        &self.fuel
    }

    /// Player bus
    pub fn bus(&self) -> &BusController {
        &self.bus
    }

    /// Player bus, mutably (for teleporting in tests and tools)
    pub fn bus_mut(&mut self) -> &mut BusController {
        &mut self.bus
    }

    /// Seconds since the session started
    pub fn game_time(&self) -> f32 {
        self.clock.total_time()
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    /// Whether health ran out
    pub fn is_game_over(&self) -> bool {
        self.health.is_game_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrefabTiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.seed = Some(1);
        // Keep the schedule from spawning during unit tests
        config.spawn.spawn_interval = 1000.0;
        config.spawn.obstacle_spawn_interval = 1000.0;
        config
    }

    fn events(session: &mut GameSession) -> Vec<GameEvent> {
        session.drain_events().into_iter().map(|stamped| stamped.event).collect()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = quiet_config();
        config.health.max_health = 0;
        assert!(matches!(GameSession::new(&config), Err(GameError::InvalidSetting { .. })));
    }

    #[test]
    fn test_food_contact_scores_and_releases() {
        let mut session = GameSession::new(&quiet_config()).unwrap();
        let position = session.bus().position();
        let id = session.place_actor("Burger", position).unwrap();
        session.drain_events();

        session.frame(0.0, InputAxes::NEUTRAL);

        assert_eq!(session.score().score(), 4);
        let events = events(&mut session);
        assert!(events.contains(&GameEvent::ScoreChanged { score: 4 }));
        assert!(events.contains(&GameEvent::EntityDestroyed { id }));
        assert!(events.iter().any(|event| matches!(event, GameEvent::EffectSpawned { .. })));
    }

    /// Sink that records every addition and grants a life on each one
    struct LedgerSink {
        additions: Rc<RefCell<Vec<u32>>>,
    }

    impl ScoreSink for LedgerSink {
        fn add_points(&mut self, amount: u32) -> u32 {
            self.additions.borrow_mut().push(amount);
            1
        }

        fn score(&self) -> u32 {
            self.additions.borrow().iter().sum()
        }
    }

    #[test]
    fn test_points_go_to_injected_sink() {
        let additions = Rc::new(RefCell::new(Vec::new()));
        let sink = LedgerSink {
            additions: Rc::clone(&additions),
        };
        let mut session = GameSession::with_score_sink(&quiet_config(), Box::new(sink)).unwrap();
        let position = session.bus().position();
        session.place_actor("Donut", position).unwrap();
        session.drain_events();

        session.frame(0.0, InputAxes::NEUTRAL);

        assert_eq!(*additions.borrow(), vec![4]);
        assert_eq!(session.score().score(), 4);
        // Full health, so the granted life becomes a shield
        assert!(session.bus().is_invulnerable());
        assert!(events(&mut session).contains(&GameEvent::ScoreChanged { score: 4 }));
    }

    #[test]
    fn test_unknown_prefab() {
        let mut session = GameSession::new(&quiet_config()).unwrap();
        assert!(matches!(
            session.place_actor("Rocket", Vec2::zeros()),
            Err(GameError::UnknownPrefab(name)) if name == "Rocket"
        ));
    }

    #[test]
    fn test_reported_overlap_applies_once() {
        let mut session = GameSession::new(&quiet_config()).unwrap();
        let id = session.place_actor("GasTank", Vec2::new(5.0, 0.0)).unwrap();

        session.report_overlap(id);
        session.report_overlap(id);
        session.frame(0.0, InputAxes::NEUTRAL);

        assert_eq!(session.fuel().current(), 4);
        assert_eq!(session.bus().move_speed(), 6.0);
    }

    #[test]
    fn test_disabled_effects() {
        let mut config = quiet_config();
        config.effects.enabled = false;
        config.prefabs = PrefabTiers::default();
        let mut session = GameSession::new(&config).unwrap();
        let position = session.bus().position();
        session.place_actor("Burger", position).unwrap();
        session.frame(0.0, InputAxes::NEUTRAL);

        assert!(session.effects().is_none());
        assert!(!events(&mut session)
            .iter()
            .any(|event| matches!(event, GameEvent::EffectSpawned { .. })));
    }
}
