//! End-to-end session behavior

use bus_runner::config::PrefabConfig;
use bus_runner::{GameConfig, GameEvent, GameSession, InputAxes, ObjectPool, PoolCategory, PrefabCatalog};
use runner_engine::config::Config;
use runner_engine::foundation::math::Vec2;
use runner_engine::pooling::Poolable;

/// Seeded config whose schedule never fires, so tests place actors by hand
fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.seed = Some(21);
    config.spawn.spawn_interval = 1000.0;
    config.spawn.obstacle_spawn_interval = 1000.0;
    config
}

fn events(session: &mut GameSession) -> Vec<GameEvent> {
    session.drain_events().into_iter().map(|stamped| stamped.event).collect()
}

fn hit_with(session: &mut GameSession, prefab: &str) {
    let position = session.bus().position();
    session.place_actor(prefab, position).unwrap();
    session.frame(0.0, InputAxes::NEUTRAL);
}

#[test]
fn test_long_run_keeps_invariants() {
    let mut config = GameConfig::default();
    config.seed = Some(9);
    let mut session = GameSession::new(&config).unwrap();

    let mut mid = false;
    let mut late = false;
    let mut per_spawn = 1;
    let frame_time = 1.0 / 60.0;

    for frame in 0..(130 * 60) {
        let t = frame as f32 * frame_time;
        session.frame(frame_time, InputAxes::new((t * 0.5).sin(), (t * 2.0).cos()));

        let objects = session.objects();
        for (id, actor) in objects.actors() {
            assert!(!(actor.is_active() && objects.is_queued(id)));
        }

        assert!(!mid || objects.is_mid_game_unlocked());
        assert!(!late || objects.is_late_game_unlocked());
        mid = objects.is_mid_game_unlocked();
        late = objects.is_late_game_unlocked();

        assert!((1..=3).contains(&objects.obstacles_per_spawn()));
        assert!(objects.obstacles_per_spawn() >= per_spawn);
        per_spawn = objects.obstacles_per_spawn();

        assert!(session.health().current() <= session.health().max_health());
        session.drain_events();
    }

    assert!(mid && late);
    assert_eq!(per_spawn, 3);
    assert_eq!(session.objects().active_obstacle_prefabs().len(), 3);
}

#[test]
fn test_pool_grows_on_eleventh_acquire() {
    let config = GameConfig::default();
    let catalog = PrefabCatalog::from_tiers(&config.prefabs).unwrap();
    let mut pool = ObjectPool::with_seed(config.spawn.clone(), catalog, 4);
    pool.warm_up(PoolCategory::Obstacle, 10);

    let ids: Vec<_> = (0..10)
        .map(|_| pool.acquire(PoolCategory::Obstacle, Vec2::new(11.0, 0.0)).unwrap())
        .collect();
    assert_eq!(pool.active_count(PoolCategory::Obstacle), 10);
    assert_eq!(pool.pooled_count(PoolCategory::Obstacle), 0);

    let extra = pool.acquire(PoolCategory::Obstacle, Vec2::new(11.0, 0.0)).unwrap();
    assert!(!ids.contains(&extra));
    assert_eq!(pool.created_count(PoolCategory::Obstacle), 11);
}

#[test]
fn test_hits_drain_fuel_and_end_game_once() {
    let mut session = GameSession::new(&quiet_config()).unwrap();

    hit_with(&mut session, "Barrier");
    assert_eq!(session.health().current(), 2);
    assert_eq!(session.fuel().current(), 3);

    hit_with(&mut session, "Barrier");
    assert_eq!(session.health().current(), 1);
    assert_eq!(session.fuel().current(), 2);
    session.drain_events();

    hit_with(&mut session, "Barrier");
    hit_with(&mut session, "Barrier");

    let game_overs = events(&mut session)
        .iter()
        .filter(|event| matches!(event, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);
    assert!(session.is_game_over());
    assert!(!session.bus().is_active());
    assert_eq!(session.health().current(), 0);
}

#[test]
fn test_life_reward_restores_then_shields() {
    let mut config = quiet_config();
    config.prefabs.common = vec![PrefabConfig::food("Cake", 125)];
    config.prefabs.rare = Vec::new();
    let mut session = GameSession::new(&config).unwrap();

    hit_with(&mut session, "Barrier");
    assert_eq!(session.health().current(), 2);

    hit_with(&mut session, "Cake");
    assert_eq!(session.score().score(), 125);
    assert_eq!(session.health().current(), 3);
    session.drain_events();

    hit_with(&mut session, "Cake");
    assert!(events(&mut session).contains(&GameEvent::InvulnerabilityChanged { active: true }));
    assert!(session.bus().is_invulnerable());

    // Hits are ignored while the shield is up
    hit_with(&mut session, "Barrier");
    assert_eq!(session.health().current(), 3);

    for _ in 0..4 {
        session.frame(1.0, InputAxes::NEUTRAL);
    }
    assert!(session.bus().is_invulnerable());
    session.frame(1.0, InputAxes::NEUTRAL);
    assert!(!session.bus().is_invulnerable());
    assert!(events(&mut session).contains(&GameEvent::InvulnerabilityChanged { active: false }));
}

#[test]
fn test_fuel_pickup_boosts_speed() {
    let mut session = GameSession::new(&quiet_config()).unwrap();
    hit_with(&mut session, "GasTank");

    assert_eq!(session.fuel().current(), 4);
    assert_eq!(session.bus().move_speed(), 6.0);
    let events = events(&mut session);
    assert!(events.contains(&GameEvent::FuelChanged { fuel: 4 }));
    assert!(events.contains(&GameEvent::SpeedChanged { speed: 6.0 }));
}

#[test]
fn test_off_screen_then_overlap_releases_once() {
    let mut session = GameSession::new(&quiet_config()).unwrap();
    let id = session.place_actor("Burger", Vec2::new(-14.99, 0.0)).unwrap();
    session.drain_events();

    session.report_overlap(id);
    session.frame(0.1, InputAxes::NEUTRAL);

    let events = events(&mut session);
    let releases = events
        .iter()
        .filter(|event| matches!(event, GameEvent::EntityDestroyed { .. } | GameEvent::EntityReleased { .. }))
        .count();
    assert_eq!(releases, 1);
    assert_eq!(session.score().score(), 0);
}

#[test]
fn test_pickup_effect_returns_to_pool() {
    let mut session = GameSession::new(&quiet_config()).unwrap();
    hit_with(&mut session, "Burger");
    assert_eq!(session.effects().unwrap().active_count(), 1);
    session.drain_events();

    session.frame(0.3, InputAxes::NEUTRAL);
    assert_eq!(session.effects().unwrap().active_count(), 1);
    session.frame(0.3, InputAxes::NEUTRAL);

    assert_eq!(session.effects().unwrap().active_count(), 0);
    assert_eq!(session.effects().unwrap().pooled_count(), 10);
    assert!(events(&mut session)
        .iter()
        .any(|event| matches!(event, GameEvent::EffectExpired { .. })));
}

#[test]
fn test_pooled_food_recycles_through_session() {
    let mut config = GameConfig::default();
    config.seed = Some(5);
    config.spawn.obstacle_spawn_interval = 1000.0;
    let mut session = GameSession::new(&config).unwrap();

    // Food crosses 26 units at 7 u/s; run long enough for several to leave
    for _ in 0..(20 * 30) {
        session.frame(1.0 / 30.0, InputAxes::new(0.0, -1.0));
    }
    let released = events(&mut session)
        .iter()
        .filter(|event| matches!(event, GameEvent::EntityReleased { category: PoolCategory::Collectible, .. }))
        .count();
    assert!(released >= 5);
    assert_eq!(session.objects().created_count(PoolCategory::Collectible), 10);
}

#[test]
fn test_session_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bus.toml");
    let mut config = quiet_config();
    config.spawn.pool_size = 2;
    config.save_to_file(&path).unwrap();

    let session = GameSession::from_config_file(&path).unwrap();
    assert_eq!(session.objects().pooled_count(PoolCategory::Collectible), 2);
    assert_eq!(session.objects().pooled_count(PoolCategory::Obstacle), 2);
}
