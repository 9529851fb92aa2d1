use std::time::Duration;

/// Growth factor applied to the interval after every failed attempt.
pub const DEFAULT_MULTIPLIER: f64 = 1.5;
/// Default first retry delay, in seconds.
pub const DEFAULT_INITIAL_INTERVAL_SECS: u64 = 1;
/// Default cap on a single retry delay, in seconds.
pub const DEFAULT_MAX_INTERVAL_SECS: u64 = 1000;
/// Default total retry budget, in seconds. `0` means no budget.
pub const DEFAULT_MAX_ELAPSED_TIME_SECS: u64 = 10_000;

/// Backoff parameters, built once at program entry and passed by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffConfig {
    /// Delay before the first retry.
    pub initial_interval: Duration,
    /// Upper bound on any single delay.
    pub max_interval: Duration,
    /// Total time budget for retries; `Duration::ZERO` never stops.
    pub max_elapsed_time: Duration,
    /// Interval growth factor.
    pub multiplier: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self::from_secs(
            DEFAULT_INITIAL_INTERVAL_SECS,
            DEFAULT_MAX_INTERVAL_SECS,
            DEFAULT_MAX_ELAPSED_TIME_SECS,
        )
    }
}

impl BackoffConfig {
    /// Build from whole seconds, as given on the command line.
    pub fn from_secs(initial_interval: u64, max_interval: u64, max_elapsed_time: u64) -> Self {
        Self {
            initial_interval: Duration::from_secs(initial_interval),
            max_interval: Duration::from_secs(max_interval),
            max_elapsed_time: Duration::from_secs(max_elapsed_time),
            multiplier: DEFAULT_MULTIPLIER,
        }
    }

    /// The elapsed-time budget, or `None` when retries never give up.
    pub fn budget(&self) -> Option<Duration> {
        if self.max_elapsed_time.is_zero() {
            None
        } else {
            Some(self.max_elapsed_time)
        }
    }
}
