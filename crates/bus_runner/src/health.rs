//! Player health
//!
//! Health drops on hits, every few hits also costs a unit of fuel, and
//! reaching zero ends the run. Life rewards restore health or, at full
//! health, grant a timed shield. The shield is a deadline checked by
//! [`HealthManager::tick`].

use runner_engine::foundation::time::Deadline;

use crate::bus::BusController;
use crate::config::HealthConfig;
use crate::fuel::FuelGauge;

/// Outcome of a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    /// Health after the hit
    pub health: u32,
    /// Whether this hit also drained a unit of fuel
    pub fuel_lost: bool,
    /// Whether this hit ended the game
    pub game_over: bool,
}

/// Outcome of a life reward
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifeReward {
    /// One unit of health came back
    Restored {
        /// Health after the reward
        health: u32,
    },
    /// At full health: shield raised until the given game time
    Invulnerable {
        /// Game time at which the shield drops
        until: f32,
    },
    /// At full health with the shield already up; nothing changed
    AlreadyInvulnerable,
}

/// Health, fuel drain and invulnerability of the player
#[derive(Debug, Clone)]
pub struct HealthManager {
    max_health: u32,
    current: u32,
    damage_per_fuel_loss: u32,
    hits_since_fuel_loss: u32,
    invulnerability_duration: f32,
    invulnerable_until: Option<Deadline>,
    game_over: bool,
}

impl HealthManager {
    /// Create a manager at full health
    pub fn new(config: &HealthConfig) -> Self {
        Self {
            max_health: config.max_health,
            current: config.max_health,
            damage_per_fuel_loss: config.damage_per_fuel_loss.max(1),
            hits_since_fuel_loss: 0,
            invulnerability_duration: config.invulnerability_duration,
            invulnerable_until: None,
            game_over: false,
        }
    }

    /// Apply a hit.
    ///
    /// Every `damage_per_fuel_loss`-th hit removes one unit from `fuel`.
    /// Game over is reported once; hits after that change nothing.
    pub fn take_damage(&mut self, amount: u32, fuel: Option<&mut FuelGauge>) -> DamageReport {
        if self.game_over {
            return DamageReport {
                health: self.current,
                fuel_lost: false,
                game_over: false,
            };
        }

        self.current = self.current.saturating_sub(amount);
        self.hits_since_fuel_loss += 1;

        let mut fuel_lost = false;
        if self.hits_since_fuel_loss >= self.damage_per_fuel_loss {
            self.hits_since_fuel_loss = 0;
            match fuel {
                Some(fuel) => fuel_lost = fuel.remove_fuel(),
                None => log::warn!("No fuel gauge wired, fuel loss skipped"),
            }
        }

        let game_over = self.current == 0;
        if game_over {
            self.game_over = true;
            log::info!("Health depleted, game over");
        }

        DamageReport {
            health: self.current,
            fuel_lost,
            game_over,
        }
    }

    /// Award a life at game time `now`.
    ///
    /// Below max health one unit is restored. At max health the bus becomes
    /// invulnerable for `invulnerability_duration` seconds; a reward while the
    /// shield is up does not extend it.
    pub fn reward_life(&mut self, now: f32, bus: Option<&mut BusController>) -> LifeReward {
        if self.current < self.max_health {
            self.current += 1;
            return LifeReward::Restored { health: self.current };
        }
        if self.invulnerable_until.is_some() {
            return LifeReward::AlreadyInvulnerable;
        }

        let deadline = Deadline::after(now, self.invulnerability_duration);
        self.invulnerable_until = Some(deadline);
        match bus {
            Some(bus) => bus.set_invulnerable(true),
            None => log::warn!("No bus wired, invulnerability flag not set"),
        }
        log::info!("Full health reward: invulnerable until {:.1}s", deadline.at());
        LifeReward::Invulnerable { until: deadline.at() }
    }

    /// Drop the shield once its deadline passes. Returns true on the frame it ends.
    pub fn tick(&mut self, now: f32, bus: Option<&mut BusController>) -> bool {
        match self.invulnerable_until {
            Some(deadline) if deadline.has_passed(now) => {
                self.invulnerable_until = None;
                if let Some(bus) = bus {
                    bus.set_invulnerable(false);
                }
                true
            }
            _ => false,
        }
    }

    /// Back to full health for a new run
    pub fn reset_health(&mut self) {
        self.current = self.max_health;
        self.hits_since_fuel_loss = 0;
        self.invulnerable_until = None;
        self.game_over = false;
    }

    /// Current health
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Maximum health
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Whether the reward shield is up
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_until.is_some()
    }

    /// Seconds of shield left at `now`
    pub fn invulnerability_remaining(&self, now: f32) -> f32 {
        self.invulnerable_until.map_or(0.0, |deadline| deadline.remaining(now))
    }

    /// Whether health has run out
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Number of bus icons shown on the HUD
    pub fn visible_health_icons(&self) -> u32 {
        self.current
    }

    /// Per-icon visibility, lost lives hidden from the left
    pub fn icon_visibility(&self) -> Vec<bool> {
        let hidden = self.max_health - self.current;
        (0..self.max_health).map(|index| index >= hidden).collect()
    }
}
