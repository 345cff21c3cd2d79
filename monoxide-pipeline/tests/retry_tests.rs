// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::{PipelineError, Signal};
use monoxide_pipeline::{Backoff, Failure, Pipeline, RetryDecision, RetryPolicy};
use monoxide_test_utils::{flaky, scheduler};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test]
async fn test_retry_makes_n_plus_one_attempts() {
    // Arrange
    let (source, attempts) = flaky(usize::MAX, 1);

    // Act
    let signal = source.retry(3).run(&scheduler()).await;

    // Assert
    let error = signal.unwrap_error();
    assert_eq!(attempts.get(), 4);
    assert_eq!(error.to_string(), "Upstream error: flaky attempt 3");
}

#[tokio::test]
async fn test_retry_stops_on_first_success() {
    let (source, attempts) = flaky(2, "ok");

    let signal = source.retry(5).run(&scheduler()).await;

    assert_eq!(signal, Signal::Value("ok"));
    assert_eq!(attempts.get(), 3);
}

#[tokio::test]
async fn test_retry_zero_is_a_single_attempt() {
    let (source, attempts) = flaky(1, 0);

    assert!(source.retry(0).run(&scheduler()).await.is_error());
    assert_eq!(attempts.get(), 1);
}

#[tokio::test]
async fn test_retry_when_stop_surfaces_original_error() {
    // Arrange
    let (source, attempts) = flaky(usize::MAX, 1);
    let pipeline = source.retry_when(|_: &Failure| RetryDecision::Stop);

    // Act
    let error = pipeline.run(&scheduler()).await.unwrap_error();

    // Assert
    assert_eq!(attempts.get(), 1);
    let upstream = error.upstream_source().map(ToString::to_string);
    assert_eq!(upstream.as_deref(), Some("flaky attempt 0"));
}

#[tokio::test(start_paused = true)]
async fn test_retry_when_backoff_delays_and_exhausts() {
    // Arrange
    let start = Instant::now();
    let (source, attempts) = flaky(usize::MAX, 1);
    let policy = Backoff::new()
        .with_max_retries(2)
        .with_initial_delay(Duration::from_millis(10));

    // Act
    let signal = source.retry_when(policy).run(&scheduler()).await;

    // Assert
    assert!(signal.is_error());
    assert_eq!(attempts.get(), 3);
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[tokio::test(start_paused = true)]
async fn test_retry_when_backoff_recovers() {
    let (source, attempts) = flaky(2, "recovered");

    let signal = source
        .retry_when(Backoff::fixed(Duration::from_millis(5), 5))
        .run(&scheduler())
        .await;

    assert_eq!(signal, Signal::Value("recovered"));
    assert_eq!(attempts.get(), 3);
}

#[tokio::test]
async fn test_retry_when_predicate_stops_unmatched_errors() {
    let pipeline = Pipeline::<i32>::error(PipelineError::invalid_argument("bad input"))
        .retry_when(Backoff::new().retry_if(PipelineError::is_recoverable));

    let error = pipeline.run(&scheduler()).await.unwrap_error();

    assert!(error.is_invalid_argument());
}

#[test]
fn test_backoff_delays_are_capped() {
    let policy = Backoff::new()
        .with_max_retries(10)
        .with_initial_delay(Duration::from_millis(100))
        .with_max_delay(Duration::from_millis(250));

    let delays: Vec<_> = (0..4)
        .map(|attempt| {
            policy.decide(&Failure {
                error: PipelineError::upstream_message("flaky"),
                attempt,
            })
        })
        .collect();

    assert_eq!(
        delays,
        vec![
            RetryDecision::RetryAfter(Duration::from_millis(100)),
            RetryDecision::RetryAfter(Duration::from_millis(200)),
            RetryDecision::RetryAfter(Duration::from_millis(250)),
            RetryDecision::RetryAfter(Duration::from_millis(250)),
        ]
    );
}

#[test]
fn test_backoff_stops_after_max_retries() {
    let policy = Backoff::fixed(Duration::ZERO, 1);
    let failure = |attempt| Failure {
        error: PipelineError::upstream_message("flaky"),
        attempt,
    };

    assert_eq!(
        policy.decide(&failure(0)),
        RetryDecision::RetryAfter(Duration::ZERO)
    );
    assert_eq!(policy.decide(&failure(1)), RetryDecision::Stop);
}
