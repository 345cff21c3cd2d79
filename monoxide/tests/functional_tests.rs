// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide::prelude::*;
use monoxide::{Backoff, Failure, RetryDecision};
use monoxide_test_utils::{flaky, init_tracing, scheduler, Probe, TestError};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Profile {
    id: u32,
    name: String,
}

fn profile(id: u32) -> Profile {
    Profile {
        id,
        name: format!("user-{id}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_flaky_lookup_recovers_with_backoff() -> anyhow::Result<()> {
    // Arrange
    init_tracing();
    let (lookup, attempts) = flaky(2, profile(7));
    let pipeline = lookup
        .retry_when(Backoff::fixed(Duration::from_millis(100), 3))
        .map(|profile| profile.name)
        .timeout(Duration::from_secs(5))
        .log("functional.lookup");

    // Act
    let name = pipeline.to_future(&scheduler()).await.into_result()?;

    // Assert
    assert_eq!(name.as_deref(), Some("user-7"));
    assert_eq!(attempts.get(), 3);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_slow_primary_falls_back_to_replica() {
    // Arrange
    let probe = Probe::new();
    let primary = probe.instrument(Pipeline::just(profile(1)).delay(Duration::from_secs(10)));
    let replica = Pipeline::just(profile(2)).delay(Duration::from_millis(50));

    // Act
    let signal = primary
        .timeout(Duration::from_secs(1))
        .on_error_resume(move |_| replica.clone())
        .run(&scheduler())
        .await;

    // Assert
    assert_eq!(signal, Signal::Value(profile(2)));
    assert_eq!(probe.cancellations(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dashboard_zips_concurrent_sources_once_cached() {
    // Arrange
    let scheduler = scheduler();
    let probe = Probe::new();
    let settings = probe
        .instrument(Pipeline::just("dark".to_string()).delay(Duration::from_millis(300)))
        .cache();
    let dashboard = Pipeline::zip(
        Pipeline::just(profile(3)).delay(Duration::from_millis(500)),
        settings.clone(),
    )
    .map(|(profile, theme)| format!("{} ({theme})", profile.name));
    let start = Instant::now();

    // Act
    let first = dashboard.run(&scheduler).await;
    let second = dashboard.run(&scheduler).await;

    // Assert
    assert_eq!(first, Signal::Value("user-3 (dark)".to_string()));
    assert_eq!(second, first);
    assert_eq!(probe.subscriptions(), 1);
    assert!(start.elapsed() < Duration::from_millis(1100));
}

#[tokio::test(start_paused = true)]
async fn test_cancelling_subscription_reaches_nested_runs() {
    // Arrange
    let scheduler = scheduler();
    let probe = Probe::new();
    let nested = probe.instrument(Pipeline::<u32>::never());
    let pipeline = Pipeline::just(1_u32)
        .flat_map(move |_| nested.clone())
        .map(|v| v + 1);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let subscription = pipeline.subscribe_fn(&scheduler, move |signal| {
        let _ = tx.send(signal);
    });
    tokio::time::sleep(Duration::from_millis(10)).await;

    // Act
    subscription.cancel();
    tokio::time::sleep(Duration::from_millis(10)).await;

    // Assert
    assert!(subscription.is_cancelled());
    assert_eq!(probe.cancellations(), 1);
    assert_eq!(rx.recv().await, Some(Signal::Cancelled));
}

#[tokio::test]
async fn test_custom_policy_stops_on_non_recoverable_error() {
    // Arrange
    let (lookup, attempts) = flaky(5, 0_u8);
    let policy = |failure: &Failure| {
        if failure.error.is_recoverable() && failure.attempt < 10 {
            RetryDecision::RetryAfter(Duration::ZERO)
        } else {
            RetryDecision::Stop
        }
    };
    let rejected = Pipeline::<u8>::error(PipelineError::invalid_argument("id must be positive"))
        .retry_when(policy);

    // Act
    let recovered = lookup.retry_when(policy).run(&scheduler()).await;
    let signal = rejected.run(&scheduler()).await;

    // Assert
    assert_eq!(recovered, Signal::Value(0));
    assert_eq!(attempts.get(), 6);
    assert!(signal.unwrap_error().is_invalid_argument());
}

#[tokio::test]
async fn test_upstream_error_maps_to_domain_error() {
    let signal = Pipeline::<Profile>::error(TestError::boom("db down"))
        .on_error_map(|error| PipelineError::upstream_message(format!("profile lookup: {error}")))
        .run(&scheduler())
        .await;

    assert_eq!(
        signal.unwrap_error().to_string(),
        "Upstream error: profile lookup: Upstream error: boom: db down"
    );
}
