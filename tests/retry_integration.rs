//! Retry Wrapper Integration Tests
//!
//! Exercises the overload-masking wrapper end-to-end against the real
//! error taxonomy, with paused tokio time so backoff delays are asserted
//! exactly.

use std::cell::Cell;
use std::time::Duration;

use lexaid::ai::AiError;
use lexaid::core::{retry_transient, RetryPolicy, TransientError};

fn overloaded() -> AiError {
    AiError::Overloaded { status: 503, message: "The model is overloaded.".to_string() }
}

fn unauthorized() -> AiError {
    AiError::Api { status: 401, message: "API key not valid".to_string() }
}

#[tokio::test(start_paused = true)]
async fn two_overloads_then_success_waits_two_then_four_seconds() {
    let calls = Cell::new(0u32);
    let start = tokio::time::Instant::now();

    let result = retry_transient(&RetryPolicy::new(3), || {
        let n = calls.get() + 1;
        calls.set(n);
        async move {
            if n < 3 {
                Err(overloaded())
            } else {
                Ok("X")
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), "X");
    assert_eq!(calls.get(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn permanent_error_surfaces_immediately() {
    let calls = Cell::new(0u32);
    let start = tokio::time::Instant::now();

    let result: Result<(), AiError> = retry_transient(&RetryPolicy::new(3), || {
        calls.set(calls.get() + 1);
        async { Err(unauthorized()) }
    })
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AiError::Api { status: 401, .. }));
    assert_eq!(calls.get(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn exhausted_budget_surfaces_final_overload() {
    let calls = Cell::new(0u32);
    let start = tokio::time::Instant::now();

    let result: Result<(), AiError> = retry_transient(&RetryPolicy::new(3), || {
        calls.set(calls.get() + 1);
        async { Err(overloaded()) }
    })
    .await;

    let err = result.unwrap_err();
    assert!(err.is_transient());
    assert_eq!(calls.get(), 3);
    // Only the waits between attempts elapse: 2s + 4s.
    assert_eq!(start.elapsed(), Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn single_attempt_budget_never_waits() {
    let calls = Cell::new(0u32);
    let start = tokio::time::Instant::now();

    let result: Result<(), AiError> = retry_transient(&RetryPolicy::new(1), || {
        calls.set(calls.get() + 1);
        async { Err(overloaded()) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.get(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn always_successful_operation_runs_once() {
    let calls = Cell::new(0u32);
    let start = tokio::time::Instant::now();

    let result = retry_transient(&RetryPolicy::new(5), || {
        calls.set(calls.get() + 1);
        async { Ok::<_, AiError>(42) }
    })
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls.get(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}
