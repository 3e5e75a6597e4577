//! Retry policy for the unlock signaler.

use std::time::Duration;

/// Bounded, fixed-interval retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    interval: Duration,
}

impl RetryPolicy {
    /// Ten attempts, 50ms apart: a 500ms window for the locker to bind.
    pub const SIGNAL: Self = Self {
        attempts: 10,
        interval: Duration::from_millis(50),
    };

    pub fn new(attempts: u32, interval: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            interval,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::SIGNAL
    }
}
