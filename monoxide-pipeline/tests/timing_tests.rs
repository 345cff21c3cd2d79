// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::Signal;
use monoxide_pipeline::{Context, Pipeline};
use monoxide_test_utils::{scheduler, Probe, TestError};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_delay_holds_value_back() {
    let start = Instant::now();

    let signal = Pipeline::just("hello").delay(Duration::from_secs(3)).run(&scheduler()).await;

    assert_eq!(signal, Signal::Value("hello"));
    assert!(start.elapsed() >= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_delay_holds_errors_and_empty_back() {
    let start = Instant::now();

    let error = Pipeline::<i32>::error(TestError::boom("late"))
        .delay(Duration::from_secs(1))
        .run(&scheduler())
        .await;
    let empty = Pipeline::<i32>::empty()
        .delay(Duration::from_secs(1))
        .run(&scheduler())
        .await;

    assert!(error.is_error());
    assert_eq!(empty, Signal::Empty);
    assert!(start.elapsed() >= Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_delay_does_not_hold_cancellation_back() -> anyhow::Result<()> {
    // Arrange
    let ctx = Context::new(scheduler());
    let run = tokio::spawn(
        Pipeline::<i32>::never()
            .delay(Duration::from_secs(60))
            .evaluate(ctx.clone()),
    );
    tokio::time::sleep(Duration::from_millis(10)).await;
    let start = Instant::now();

    // Act
    ctx.cancel();
    let signal = run.await?;

    // Assert
    assert_eq!(signal, Signal::Cancelled);
    assert!(start.elapsed() < Duration::from_secs(1));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_delay_subscription_postpones_upstream() {
    // Arrange
    let probe = Probe::new();
    let scheduler = scheduler();
    let pipeline = probe
        .instrument(Pipeline::just(1))
        .delay_subscription(Duration::from_millis(100));
    let run = tokio::spawn({
        let scheduler = scheduler.clone();
        async move { pipeline.run(&scheduler).await }
    });

    // Act
    tokio::time::sleep(Duration::from_millis(50)).await;
    let subscribed_early = probe.subscriptions();
    let signal = run.await.unwrap_or(Signal::Cancelled);

    // Assert
    assert_eq!(subscribed_early, 0);
    assert_eq!(signal, Signal::Value(1));
    assert_eq!(probe.subscriptions(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_cancels_slow_upstream() {
    // Arrange
    let probe = Probe::new();
    let slow = probe.instrument(Pipeline::just("hello").delay(Duration::from_secs(2)));

    // Act
    let signal = slow.timeout(Duration::from_secs(1)).run(&scheduler()).await;

    // Assert
    assert!(signal.unwrap_error().is_timeout());
    assert_eq!(probe.cancellations(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_passes_fast_upstream_through() {
    let signal = Pipeline::just("hello")
        .delay(Duration::from_millis(500))
        .timeout(Duration::from_secs(1))
        .run(&scheduler())
        .await;

    assert_eq!(signal, Signal::Value("hello"));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_on_never() {
    let error = Pipeline::<i32>::never()
        .timeout(Duration::from_millis(100))
        .run(&scheduler())
        .await
        .unwrap_error();

    assert_eq!(error.to_string(), "Timeout error: no signal within 100ms");
}
