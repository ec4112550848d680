//! Time management utilities
//!
//! Game time is driven by the host: every frame hands in a delta and the
//! clocks below accumulate it. Nothing here reads the wall clock.

/// Frame clock accumulating host-supplied delta times
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a new clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame
    pub fn advance(&mut self, delta_time: f32) {
        let delta_time = delta_time.max(0.0);
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;
    }

    /// Get the time of the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed game time in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the number of frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since the clock started
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Repeating interval timer.
///
/// On rollover the accumulator is reset to zero, not reduced by the interval,
/// so any overshoot of the frame that fired is dropped.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: f32,
    elapsed: f32,
}

impl IntervalTimer {
    /// Create a timer that fires every `interval` seconds
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance the timer; returns true when the interval rolled over
    pub fn tick(&mut self, delta_time: f32) -> bool {
        self.elapsed += delta_time;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// Time accumulated toward the next rollover
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Configured interval in seconds
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Restart accumulation from zero
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// A point in game time after which something expires
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadline {
    at: f32,
}

impl Deadline {
    /// Deadline `duration` seconds after `now`
    pub fn after(now: f32, duration: f32) -> Self {
        Self { at: now + duration }
    }

    /// Whether the deadline has passed at `now`
    pub fn has_passed(&self, now: f32) -> bool {
        now >= self.at
    }

    /// Seconds left until the deadline, never negative
    pub fn remaining(&self, now: f32) -> f32 {
        (self.at - now).max(0.0)
    }

    /// Game time at which the deadline expires
    pub fn at(&self) -> f32 {
        self.at
    }
}
