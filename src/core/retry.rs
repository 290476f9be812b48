//! Retry logic with exponential backoff for transient model overload.
//!
//! The hosted model endpoint occasionally sheds load with a 503. Calls
//! wrapped here are retried a bounded number of times with doubling
//! delays; every other error class propagates immediately.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Marker for errors that are safe to retry.
///
/// Classification happens once, at the boundary where the raw transport
/// error is received. Callers of [`retry_transient`] only consult this
/// tag and never inspect messages or status codes themselves.
pub trait TransientError {
    /// Whether this error signals a temporary overload condition.
    fn is_transient(&self) -> bool;
}

/// Attempt budget for calls wrapped in [`retry_transient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl RetryPolicy {
    /// Create a policy with the given total attempt budget (minimum 1).
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts: max_attempts.max(1) }
    }

    /// Create a policy that fails fast on the first error.
    pub fn no_retry() -> Self {
        Self { max_attempts: 1 }
    }

    /// Total number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay inserted before the given 1-based attempt.
    ///
    /// The first attempt runs immediately; attempt k waits `2^(k-1)`
    /// seconds (2s before attempt 2, 4s before attempt 3, ...). No
    /// jitter, no cap.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        // Shift kept below 64 so the arithmetic stays defined.
        let exponent = (attempt - 1).min(62);
        Duration::from_secs(1u64 << exponent)
    }
}

/// Invoke `operation`, retrying transient failures with exponential backoff.
///
/// Non-transient errors propagate immediately regardless of remaining
/// budget. When the budget is exhausted the last transient error is
/// surfaced. Each retry emits a single diagnostic log line.
pub async fn retry_transient<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    E: TransientError,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_attempts() => {
                let delay = policy.delay_before(attempt + 1);
                warn!(
                    attempt,
                    delay_secs = delay.as_secs(),
                    "model overloaded, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
