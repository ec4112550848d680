//! Display window for recycled one-shot entities
//!
//! A pickup burst is shown for a fixed number of seconds, then handed back
//! to its pool. The window is restarted every time the entity is reused, so
//! only the start time changes between uses.

/// Fixed-length window measured in seconds of game time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    /// Game time at which the current use began
    pub started_at: f32,
    /// Window length; never negative
    pub duration: f32,
}

impl Lifetime {
    /// Window of `duration` seconds opening at `started_at`
    pub fn new(started_at: f32, duration: f32) -> Self {
        Self {
            started_at,
            duration: duration.max(0.0),
        }
    }

    /// Reopen the window at `now` for the next use
    pub fn restart(&mut self, now: f32) {
        self.started_at = now;
    }

    /// Seconds since the window opened
    pub fn elapsed(&self, now: f32) -> f32 {
        (now - self.started_at).max(0.0)
    }

    /// Whether the window has closed by `now`.
    ///
    /// A zero-length window is closed from the moment it opens.
    pub fn is_expired(&self, now: f32) -> bool {
        self.elapsed(now) >= self.duration
    }

    /// Seconds left before the entity goes back to its pool
    pub fn remaining(&self, now: f32) -> f32 {
        (self.duration - self.elapsed(now)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_closes_after_duration() {
        let lifetime = Lifetime::new(1.0, 0.5);
        assert!(!lifetime.is_expired(1.25));
        assert!(lifetime.is_expired(1.5));
        assert_eq!(lifetime.remaining(2.0), 0.0);
    }

    #[test]
    fn test_reuse_reopens_window() {
        let mut lifetime = Lifetime::new(0.0, 0.5);
        assert!(lifetime.is_expired(10.0));

        lifetime.restart(10.0);
        assert!(!lifetime.is_expired(10.4));
        assert_eq!(lifetime.remaining(10.25), 0.25);
        assert_eq!(lifetime.elapsed(10.25), 0.25);
    }

    #[test]
    fn test_zero_length_and_negative_durations() {
        assert!(Lifetime::new(3.0, 0.0).is_expired(3.0));
        let clamped = Lifetime::new(3.0, -1.0);
        assert_eq!(clamped.duration, 0.0);
        assert!(clamped.is_expired(3.0));
    }
}
