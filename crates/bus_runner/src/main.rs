//! Headless Bus Runner
//!
//! Runs a seeded session at a fixed frame rate with a scripted joystick and
//! logs what happens. Usage:
//!
//! ```text
//! bus_runner [config.ron|config.toml] [seconds]
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use bus_runner::{GameConfig, GameEvent, GameSession, InputAxes};
use runner_engine::config::Config;
use runner_engine::events::EventHandler;
use runner_engine::foundation::logging;

const FRAME_TIME: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: f32 = 150.0;
const DEFAULT_SEED: u64 = 0x0B05;

/// Tallies events the way a HUD would consume them
#[derive(Debug, Default)]
struct RunStats {
    spawned: u32,
    released: u32,
    effects: u32,
    score: u32,
    health: Option<u32>,
    fuel: Option<u32>,
    game_over_at: Option<u64>,
}

struct HudLogger {
    stats: Rc<RefCell<RunStats>>,
    frame: Rc<RefCell<u64>>,
}

impl EventHandler<GameEvent> for HudLogger {
    fn on_event(&mut self, event: &GameEvent) -> bool {
        let mut stats = self.stats.borrow_mut();
        match event {
            GameEvent::EntityActivated { .. } => stats.spawned += 1,
            GameEvent::EntityReleased { .. } | GameEvent::EntityDestroyed { .. } => stats.released += 1,
            GameEvent::EffectSpawned { .. } => stats.effects += 1,
            GameEvent::ScoreChanged { score } => stats.score = *score,
            GameEvent::HealthChanged { health } => {
                stats.health = Some(*health);
                log::info!("Health: {}", health);
            }
            GameEvent::FuelChanged { fuel } => {
                stats.fuel = Some(*fuel);
                log::info!("Fuel: {}", fuel);
            }
            GameEvent::GameOver { score } => {
                stats.game_over_at = Some(*self.frame.borrow());
                log::info!("Game over with {} points", score);
            }
            GameEvent::InvulnerabilityChanged { active } => log::info!("Shield {}", if *active { "up" } else { "down" }),
            GameEvent::ObstaclesUnlocked { tier, active_types } => {
                log::info!("{:?} obstacles unlocked ({} types)", tier, active_types);
            }
            GameEvent::SpawnMultiplierChanged { per_spawn } => log::info!("Waves of {}", per_spawn),
            GameEvent::SpeedChanged { speed } => log::debug!("Speed: {:.1}", speed),
            GameEvent::EffectExpired { .. } => {}
        }
        true
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => GameConfig::load_or_default(&path)?,
        None => GameConfig::default(),
    };
    let seconds = match args.next() {
        Some(value) => value.parse::<f32>()?,
        None => DEFAULT_SECONDS,
    };
    config.seed.get_or_insert(DEFAULT_SEED);

    log::info!("Starting Bus Runner simulation for {:.0}s", seconds);
    let mut session = GameSession::new(&config)?;

    let stats = Rc::new(RefCell::new(RunStats::default()));
    let frame = Rc::new(RefCell::new(0_u64));
    session.events_mut().register_handler(Box::new(HudLogger {
        stats: Rc::clone(&stats),
        frame: Rc::clone(&frame),
    }));

    let frames = (seconds / FRAME_TIME).ceil() as u64;
    for _ in 0..frames {
        let t = session.game_time();
        // Weave up and down while drifting around the left third of the screen
        let input = InputAxes::new((t * 0.3).sin() * 0.5, (t * 1.7).sin());
        session.frame(FRAME_TIME, input);
        *frame.borrow_mut() = session.frame_count();
        session.dispatch_events();
    }

    let stats = stats.borrow();
    log::info!(
        "Finished after {} frames: score {}, health {}, fuel {}",
        session.frame_count(),
        stats.score,
        session.health().current(),
        session.fuel().current()
    );
    log::info!(
        "{} spawns, {} releases, {} effects, {} obstacle types active, waves of {}",
        stats.spawned,
        stats.released,
        stats.effects,
        session.objects().active_obstacle_prefabs().len(),
        session.objects().obstacles_per_spawn()
    );
    if let Some(frame) = stats.game_over_at {
        log::info!("Game over on frame {}", frame);
    }
    log::debug!("Last HUD values: health {:?}, fuel {:?}", stats.health, stats.fuel);
    Ok(())
}
