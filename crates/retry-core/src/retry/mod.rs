//! Retry and backoff policy.
//!
//! [`ExponentialBackoff`] decides how long to wait after each failure and
//! when to give up; [`RetryDriver`] runs an operation under it and reports a
//! single terminal [`Outcome`]. Neither knows what the operation does.

mod error;
mod policy;
mod run;

pub use error::AttemptError;
pub use policy::{BackoffDecision, ExponentialBackoff};
pub use run::{AttemptResult, Exhausted, Outcome, RetryDriver, StopReason};
