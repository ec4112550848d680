//! Score keeping and life rewards

use crate::config::ScoreConfig;

/// Receiver of points from pickups, handed to the session at construction
pub trait ScoreSink {
    /// Add points to the score.
    ///
    /// Returns the number of life rewards earned by the addition.
    fn add_points(&mut self, amount: u32) -> u32;

    /// Current score
    fn score(&self) -> u32;
}

/// Score counter with a life reward every `points_per_life` points
#[derive(Debug, Clone)]
pub struct ScoreManager {
    score: u32,
    points_per_life: u32,
    last_reward_score: u32,
    catch_up: bool,
}

impl ScoreManager {
    /// Create a manager at zero points
    pub fn new(config: &ScoreConfig) -> Self {
        Self {
            score: 0,
            points_per_life: config.points_per_life.max(1),
            last_reward_score: 0,
            catch_up: config.reward_catch_up,
        }
    }

    /// Score at which the next life is awarded
    pub fn next_reward_at(&self) -> u32 {
        self.last_reward_score.saturating_add(self.points_per_life)
    }

    /// Back to zero points
    pub fn reset(&mut self) {
        self.score = 0;
        self.last_reward_score = 0;
    }
}

impl ScoreSink for ScoreManager {
    fn add_points(&mut self, amount: u32) -> u32 {
        self.score = self.score.saturating_add(amount);

        let mut rewards = 0;
        while let Some(next) = self.last_reward_score.checked_add(self.points_per_life) {
            if self.score < next {
                break;
            }
            self.last_reward_score = next;
            rewards += 1;
            if !self.catch_up {
                break;
            }
        }
        if rewards > 0 {
            log::info!("Score {} earned {} life reward(s)", self.score, rewards);
        }
        rewards
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(catch_up: bool) -> ScoreManager {
        ScoreManager::new(&ScoreConfig {
            points_per_life: 125,
            reward_catch_up: catch_up,
        })
    }

    #[test]
    fn test_one_reward_per_boundary_in_small_steps() {
        let mut score = manager(true);
        let mut rewards = 0;
        // 4 * 63 = 252 crosses 125 and 250
        for _ in 0..63 {
            rewards += score.add_points(4);
        }
        assert_eq!(score.score(), 252);
        assert_eq!(rewards, 2);
        assert_eq!(score.next_reward_at(), 375);
    }

    #[test]
    fn test_catch_up_rewards_double_crossing() {
        let mut score = manager(true);
        assert_eq!(score.add_points(260), 2);
        assert_eq!(score.next_reward_at(), 375);
    }

    #[test]
    fn test_single_check_defers_second_reward() {
        let mut score = manager(false);
        assert_eq!(score.add_points(260), 1);
        assert_eq!(score.next_reward_at(), 250);
        // The missed boundary is picked up by the next addition
        assert_eq!(score.add_points(4), 1);
        assert_eq!(score.next_reward_at(), 375);
    }

    #[test]
    fn test_reset() {
        let mut score = manager(true);
        score.add_points(130);
        score.reset();
        assert_eq!(score.score(), 0);
        assert_eq!(score.next_reward_at(), 125);
    }
}
