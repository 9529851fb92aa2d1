//! Retry loop: run an operation until it succeeds or the policy says stop.

use std::fmt;

use super::policy::{BackoffDecision, ExponentialBackoff};
use crate::clock::{Clock, Sleeper, SystemClock};

/// What one execution of the operation produced.
#[derive(Debug)]
pub struct AttemptResult<E> {
    /// Captured output. Kept even when the attempt failed.
    pub output: Vec<u8>,
    pub status: Result<(), E>,
}

impl<E> AttemptResult<E> {
    pub fn success(output: Vec<u8>) -> Self {
        Self {
            output,
            status: Ok(()),
        }
    }

    pub fn failure(output: Vec<u8>, error: E) -> Self {
        Self {
            output,
            status: Err(error),
        }
    }
}

/// Why the loop ended without success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The backoff policy ran out of elapsed-time budget.
    BudgetExhausted,
    /// The retry predicate rejected the last error.
    NotRetryable,
}

/// Terminal failure: the last attempt's error and output.
#[derive(Debug)]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub reason: StopReason,
    pub last_error: E,
    pub last_output: Vec<u8>,
}

/// Terminal value of [`RetryDriver::run`].
#[derive(Debug)]
pub enum Outcome<E> {
    Success { attempts: u32 },
    Exhausted(Exhausted<E>),
}

impl<E> Outcome<E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Outcome::Success { attempts } => *attempts,
            Outcome::Exhausted(e) => e.attempts,
        }
    }
}

type RetryPredicate<E> = Box<dyn Fn(&E) -> bool>;

/// Drives an operation under an [`ExponentialBackoff`].
///
/// Sleeps block the calling thread; there is no cancellation. With an
/// unbounded budget and an operation that never succeeds, [`run`](Self::run)
/// does not return.
pub struct RetryDriver<E, C = SystemClock, S = SystemClock> {
    policy: ExponentialBackoff<C>,
    sleeper: S,
    is_retryable: RetryPredicate<E>,
}

impl<E> RetryDriver<E> {
    /// Driver on the wall clock.
    pub fn new(policy: ExponentialBackoff) -> Self {
        Self::with_sleeper(policy, SystemClock)
    }
}

impl<E, C: Clock, S: Sleeper> RetryDriver<E, C, S> {
    pub fn with_sleeper(policy: ExponentialBackoff<C>, sleeper: S) -> Self {
        Self {
            policy,
            sleeper,
            is_retryable: Box::new(|_: &E| true),
        }
    }

    /// Replace the retry predicate (default: every error is retryable).
    pub fn with_retryable<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&E) -> bool + 'static,
    {
        self.is_retryable = Box::new(predicate);
        self
    }

    /// Run `op` until it succeeds, the policy stops, or an error is not
    /// retryable. Only the most recent attempt's output is retained.
    pub fn run<F>(&mut self, mut op: F) -> Outcome<E>
    where
        F: FnMut() -> AttemptResult<E>,
        E: fmt::Display,
    {
        self.policy.reset();
        let mut attempt = 1u32;
        loop {
            let AttemptResult { output, status } = op();
            let err = match status {
                Ok(()) => {
                    tracing::debug!(attempt, "operation succeeded");
                    return Outcome::Success { attempts: attempt };
                }
                Err(e) => e,
            };
            tracing::warn!(attempt, error = %err, "attempt failed");

            if !(self.is_retryable)(&err) {
                return self.give_up(attempt, StopReason::NotRetryable, err, output);
            }

            match self.policy.next_backoff() {
                BackoffDecision::Stop => {
                    return self.give_up(attempt, StopReason::BudgetExhausted, err, output);
                }
                BackoffDecision::RetryAfter(d) => {
                    tracing::info!(attempt, delay = ?d, "retrying after backoff");
                    self.sleeper.sleep(d);
                    attempt = attempt.saturating_add(1);
                }
            }
        }
    }

    fn give_up(
        &self,
        attempts: u32,
        reason: StopReason,
        last_error: E,
        last_output: Vec<u8>,
    ) -> Outcome<E> {
        let elapsed = self.policy.elapsed();
        tracing::info!(attempts, ?reason, ?elapsed, "giving up");
        Outcome::Exhausted(Exhausted {
            attempts,
            reason,
            last_error,
            last_output,
        })
    }
}
