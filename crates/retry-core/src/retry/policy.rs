use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::config::BackoffConfig;

/// Decision returned by the backoff policy after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffDecision {
    /// Give up: the next wait would overrun the elapsed-time budget.
    Stop,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff with an interval cap and a total elapsed-time budget.
///
/// The first call to [`next_backoff`](Self::next_backoff) yields the initial
/// interval; each later call multiplies the previous interval by the
/// configured multiplier, capped at `max_interval`. Returned intervals never
/// decrease (multipliers below 1.0 behave like 1.0).
///
/// With a non-zero `max_elapsed_time`, the policy stops as soon as
/// `elapsed + proposed` would exceed the budget. With a zero budget it never
/// stops on its own.
#[derive(Debug)]
pub struct ExponentialBackoff<C = SystemClock> {
    config: BackoffConfig,
    clock: C,
    start: Instant,
    current: Option<Duration>,
}

impl ExponentialBackoff<SystemClock> {
    pub fn new(config: BackoffConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ExponentialBackoff<C> {
    pub fn with_clock(config: BackoffConfig, clock: C) -> Self {
        let start = clock.now();
        Self {
            config,
            clock,
            start,
            current: None,
        }
    }

    /// Restart the interval sequence and the elapsed-time clock.
    pub fn reset(&mut self) {
        self.start = self.clock.now();
        self.current = None;
    }

    /// Time since construction or the last [`reset`](Self::reset).
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start)
    }

    /// Compute the wait before the next attempt, or `Stop`.
    pub fn next_backoff(&mut self) -> BackoffDecision {
        let proposed = match self.current {
            None => self.config.initial_interval.min(self.config.max_interval),
            Some(prev) => grow(prev, self.config.multiplier, self.config.max_interval),
        };

        if let Some(budget) = self.config.budget() {
            if self.elapsed().saturating_add(proposed) > budget {
                return BackoffDecision::Stop;
            }
        }

        self.current = Some(proposed);
        BackoffDecision::RetryAfter(proposed)
    }
}

fn grow(prev: Duration, multiplier: f64, max: Duration) -> Duration {
    let secs = prev.as_secs_f64() * multiplier.max(1.0);
    if !secs.is_finite() || secs >= max.as_secs_f64() {
        return max.max(prev);
    }
    Duration::from_secs_f64(secs).max(prev)
}
