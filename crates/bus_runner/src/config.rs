//! Game configuration
//!
//! Every author-time constant of the runner lives here. Defaults reproduce the
//! tuning the game shipped with; any subset can be overridden from a RON or
//! TOML file through [`Config`].

use runner_engine::config::Config;
use runner_engine::foundation::math::Vec2;
use runner_engine::physics::PhysicsSettings;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Root game configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Spawn scheduling and pool sizes
    pub spawn: SpawnConfig,

    /// Spawnable prefabs grouped by tier
    pub prefabs: PrefabTiers,

    /// Player health settings
    pub health: HealthConfig,

    /// Score and life reward settings
    pub score: ScoreConfig,

    /// Fuel gauge settings
    pub fuel: FuelConfig,

    /// Player vehicle settings
    pub player: PlayerConfig,

    /// Visual effect pool settings
    pub effects: EffectConfig,

    /// Gravity and floor for dynamic props
    pub physics: PhysicsSettings,
}

impl Config for GameConfig {}

/// Spawn scheduling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Instances pre-built per pool at start
    pub pool_size: usize,

    /// Seconds between collectible spawns
    pub spawn_interval: f32,

    /// Seconds between obstacle waves
    pub obstacle_spawn_interval: f32,

    /// Game time at which mid-game obstacles join the active set
    pub mid_game_unlock_time: f32,

    /// Game time at which late-game obstacles join the active set
    pub late_game_unlock_time: f32,

    /// Game time after which each wave spawns two obstacles
    pub double_spawn_time: f32,

    /// Game time after which each wave spawns three obstacles
    pub triple_spawn_time: f32,

    /// Minimum Y distance between obstacles of one wave
    pub min_y_distance: f32,

    /// X jitter applied to each obstacle of a wave (0 = same X)
    pub spawn_x_variance: f32,

    /// X coordinate where entities enter the screen
    pub spawn_x: f32,

    /// Lowest spawn Y (inclusive)
    pub spawn_min_y: f32,

    /// Highest spawn Y (exclusive)
    pub spawn_max_y: f32,

    /// Probability of picking a common collectible over a rare one
    pub common_weight: f32,

    /// Re-rolls allowed when avoiding a repeat of the last obstacle
    pub duplicate_retry_attempts: usize,

    /// Draws allowed per wave slot when looking for a separated Y
    pub position_attempts: usize,

    /// Extra obstacle instances built from a tier when it unlocks
    pub unlock_warm_up: usize,
}

/// Spawnable prefabs grouped by tier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PrefabTiers {
    /// Collectibles picked most of the time
    pub common: Vec<PrefabConfig>,

    /// Collectibles picked the rest of the time
    pub rare: Vec<PrefabConfig>,

    /// Obstacles available from the start
    pub early: Vec<PrefabConfig>,

    /// Obstacles unlocked mid-game
    pub mid: Vec<PrefabConfig>,

    /// Obstacles unlocked late-game
    pub late: Vec<PrefabConfig>,
}

/// Author-time description of one prefab
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrefabConfig {
    /// Unique prefab name
    pub name: String,

    /// Leftward speed in units per second
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,

    /// X at or below which the entity is recycled
    #[serde(default = "default_off_screen_x")]
    pub off_screen_x: f32,

    /// How the entity moves
    #[serde(default)]
    pub motion: MotionConfig,

    /// Optional cosmetic spin
    #[serde(default)]
    pub rotator: Option<RotatorConfig>,

    /// What touching the player does
    pub contact: ContactEffect,

    /// When a pickup effect is shown on release
    #[serde(default)]
    pub release_effect: ReleaseEffect,

    /// Trigger half extents
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec2,
}

/// Movement model of an entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum MotionConfig {
    /// Translate left at constant speed
    #[default]
    Kinematic,

    /// Physics body held at leftward velocity with a periodic upward impulse
    PhysicsBounce {
        /// Upward impulse strength
        bounce_force: f32,
        /// Seconds between impulses
        bounce_interval: f32,
    },

    /// Translate left while following a sine wave around the spawn height
    SineBounce {
        /// Angular frequency of the wave
        frequency: f32,
        /// Amplitude of the wave
        height: f32,
        /// Which clock drives the wave
        clock: SineClock,
    },
}

/// Clock driving a sine bounce
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SineClock {
    /// Seconds since this entity was activated
    TimeAlive,
    /// Global game time
    GameTime,
}

/// Cosmetic rotation settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RotatorConfig {
    /// Spin rate in degrees per second
    pub degrees_per_second: f32,

    /// Spin direction
    pub clockwise: bool,

    /// Only spin while moving at `min_speed` or faster
    pub only_when_moving: bool,

    /// Speed threshold for `only_when_moving`
    pub min_speed: f32,
}

/// Side effect applied when an entity touches the player
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContactEffect {
    /// Player loses health
    Damage(u32),
    /// Score increases
    Score(u32),
    /// Fuel is topped up and the player speeds up
    Refuel,
}

/// When a pickup effect is spawned as the entity is released
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReleaseEffect {
    /// Never
    #[default]
    Never,
    /// Only when released after touching the player
    OnCollect,
    /// On every release, including leaving the screen
    OnAnyRelease,
}

/// Player health configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthConfig {
    /// Starting and maximum health
    pub max_health: u32,

    /// Seconds of invulnerability granted by a reward at full health
    pub invulnerability_duration: f32,

    /// Hits needed before one unit of fuel is lost
    pub damage_per_fuel_loss: u32,
}

/// Score configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreConfig {
    /// Points needed for each life reward
    pub points_per_life: u32,

    /// Award every threshold crossed by a single addition
    pub reward_catch_up: bool,
}

/// Fuel gauge configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FuelConfig {
    /// Gauge capacity
    pub max_fuel: u32,

    /// Fuel at the start of a run
    pub starting_fuel: u32,
}

/// Player vehicle configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Base speed per unit of joystick input
    pub move_speed: f32,

    /// Speed added by each fuel pickup
    pub speed_boost: f32,

    /// Speed cap for boosts
    pub max_move_speed: f32,

    /// Starting position
    pub start_position: Vec2,

    /// Lower-left corner of the allowed area
    pub min_bounds: Vec2,

    /// Upper-right corner of the allowed area
    pub max_bounds: Vec2,

    /// Trigger half extents
    pub half_extents: Vec2,
}

/// Visual effect pool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectConfig {
    /// Whether pickup effects are shown at all
    pub enabled: bool,

    /// Instances pre-built at start
    pub pool_size: usize,

    /// Seconds an effect stays visible
    pub lifetime: f32,
}

fn default_move_speed() -> f32 {
    7.0
}

fn default_off_screen_x() -> f32 {
    -15.0
}

fn default_half_extents() -> Vec2 {
    Vec2::new(0.4, 0.4)
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spawn: SpawnConfig::default(),
            prefabs: PrefabTiers::default(),
            health: HealthConfig::default(),
            score: ScoreConfig::default(),
            fuel: FuelConfig::default(),
            player: PlayerConfig::default(),
            effects: EffectConfig::default(),
            physics: PhysicsSettings::default(),
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            pool_size: 10,
            spawn_interval: 1.5,
            obstacle_spawn_interval: 3.0,
            mid_game_unlock_time: 25.0,
            late_game_unlock_time: 50.0,
            double_spawn_time: 60.0,
            triple_spawn_time: 120.0,
            min_y_distance: 0.8,
            spawn_x_variance: 0.5,
            spawn_x: 11.0,
            spawn_min_y: -1.0,
            spawn_max_y: 1.4,
            common_weight: 0.7,
            duplicate_retry_attempts: 3,
            position_attempts: 20,
            unlock_warm_up: 0,
        }
    }
}

impl Default for PrefabTiers {
    fn default() -> Self {
        Self {
            common: vec![
                PrefabConfig::food("Burger", 4),
                PrefabConfig::food("Donut", 4),
            ],
            rare: vec![PrefabConfig {
                release_effect: ReleaseEffect::OnCollect,
                ..PrefabConfig::new("GasTank", ContactEffect::Refuel)
            }],
            early: vec![PrefabConfig::new("Barrier", ContactEffect::Damage(1))],
            mid: vec![PrefabConfig {
                motion: MotionConfig::PhysicsBounce {
                    bounce_force: 8.0,
                    bounce_interval: 1.0,
                },
                rotator: Some(RotatorConfig::default()),
                ..PrefabConfig::new("BouncingTire", ContactEffect::Damage(1))
            }],
            late: vec![PrefabConfig {
                motion: MotionConfig::SineBounce {
                    frequency: 8.0,
                    height: 2.0,
                    clock: SineClock::GameTime,
                },
                rotator: Some(RotatorConfig::default()),
                ..PrefabConfig::new("SimpleBouncingTire", ContactEffect::Damage(1))
            }],
        }
    }
}

impl PrefabConfig {
    /// A kinematic prefab with default speed, threshold and size
    pub fn new(name: impl Into<String>, contact: ContactEffect) -> Self {
        Self {
            name: name.into(),
            move_speed: default_move_speed(),
            off_screen_x: default_off_screen_x(),
            motion: MotionConfig::Kinematic,
            rotator: None,
            contact,
            release_effect: ReleaseEffect::Never,
            half_extents: default_half_extents(),
        }
    }

    /// A food item worth `points` that shows an effect whenever it is released
    pub fn food(name: impl Into<String>, points: u32) -> Self {
        Self {
            release_effect: ReleaseEffect::OnAnyRelease,
            ..Self::new(name, ContactEffect::Score(points))
        }
    }
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            degrees_per_second: 180.0,
            clockwise: true,
            only_when_moving: false,
            min_speed: 0.1,
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max_health: 3,
            invulnerability_duration: 5.0,
            damage_per_fuel_loss: 2,
        }
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            points_per_life: 125,
            reward_catch_up: true,
        }
    }
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            max_fuel: 5,
            starting_fuel: 3,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            speed_boost: 1.0,
            max_move_speed: 10.0,
            start_position: Vec2::new(-5.0, 0.3),
            min_bounds: Vec2::new(-7.46, -0.73),
            max_bounds: Vec2::new(7.46, 1.37),
            half_extents: Vec2::new(1.0, 0.4),
        }
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pool_size: 10,
            lifetime: 0.5,
        }
    }
}

impl GameConfig {
    /// Reject settings the scheduler cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let spawn = &self.spawn;
        positive("spawn.spawn_interval", spawn.spawn_interval)?;
        positive("spawn.obstacle_spawn_interval", spawn.obstacle_spawn_interval)?;
        if spawn.spawn_min_y >= spawn.spawn_max_y {
            return Err(invalid("spawn.spawn_min_y", "must be below spawn.spawn_max_y"));
        }
        if spawn.min_y_distance < 0.0 || spawn.spawn_x_variance < 0.0 {
            return Err(invalid("spawn.min_y_distance", "distances and variances cannot be negative"));
        }
        if !(0.0..=1.0).contains(&spawn.common_weight) {
            return Err(invalid("spawn.common_weight", "must be within [0, 1]"));
        }
        if spawn.double_spawn_time > spawn.triple_spawn_time {
            return Err(invalid("spawn.double_spawn_time", "must not exceed spawn.triple_spawn_time"));
        }
        if self.health.max_health == 0 {
            return Err(invalid("health.max_health", "must be at least 1"));
        }
        if self.health.damage_per_fuel_loss == 0 {
            return Err(invalid("health.damage_per_fuel_loss", "must be at least 1"));
        }
        if self.score.points_per_life == 0 {
            return Err(invalid("score.points_per_life", "must be at least 1"));
        }
        if self.fuel.starting_fuel > self.fuel.max_fuel {
            return Err(invalid("fuel.starting_fuel", "must not exceed fuel.max_fuel"));
        }
        if self.player.min_bounds.x > self.player.max_bounds.x || self.player.min_bounds.y > self.player.max_bounds.y {
            return Err(invalid("player.min_bounds", "must not exceed player.max_bounds"));
        }
        positive("effects.lifetime", self.effects.lifetime)?;

        for prefab in self.prefabs.iter() {
            if let MotionConfig::PhysicsBounce { bounce_interval, .. } = prefab.motion {
                positive("prefab bounce_interval", bounce_interval)?;
            }
        }
        Ok(())
    }
}

impl PrefabTiers {
    /// Iterate over every prefab of every tier
    pub fn iter(&self) -> impl Iterator<Item = &PrefabConfig> {
        self.common
            .iter()
            .chain(&self.rare)
            .chain(&self.early)
            .chain(&self.mid)
            .chain(&self.late)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), GameError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be greater than zero"))
    }
}

fn invalid(field: &'static str, reason: &str) -> GameError {
    GameError::InvalidSetting {
        field,
        reason: reason.to_string(),
    }
}
