//! Fuel gauge

use crate::config::FuelConfig;

/// Bounded fuel counter shown as a bar on the HUD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuelGauge {
    current: u32,
    max: u32,
}

impl FuelGauge {
    /// Create a gauge at its starting level
    pub fn new(config: &FuelConfig) -> Self {
        Self {
            current: config.starting_fuel.min(config.max_fuel),
            max: config.max_fuel,
        }
    }

    /// Add one unit. Returns false when the gauge was already full.
    pub fn add_fuel(&mut self) -> bool {
        if self.current < self.max {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Remove one unit. Returns false when the gauge was already empty.
    pub fn remove_fuel(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Current level
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Capacity
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Fill ratio in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_is_bounded() {
        let mut fuel = FuelGauge::new(&FuelConfig { max_fuel: 2, starting_fuel: 1 });
        assert!(fuel.add_fuel());
        assert!(!fuel.add_fuel());
        assert_eq!(fuel.current(), 2);

        assert!(fuel.remove_fuel());
        assert!(fuel.remove_fuel());
        assert!(!fuel.remove_fuel());
        assert_eq!(fuel.current(), 0);
        assert_eq!(fuel.fraction(), 0.0);
    }
}
