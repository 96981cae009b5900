//! Bounded-retry policy.
//!
//! Fixed attempt count, fixed inter-attempt delay, every failure treated as
//! retryable. No backoff, no jitter — remote operations here fail for
//! transient SSH/network reasons that a short fixed pause absorbs.

use std::time::Duration;

/// A bounded retry schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never zero.
    pub attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create a policy. An `attempts` of zero is clamped to one.
    #[must_use]
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Single attempt, no pause. Used by dry runs and tests.
    #[must_use]
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    /// Three attempts, five seconds apart.
    fn default() -> Self {
        Self::new(3, Duration::from_secs(5))
    }
}
