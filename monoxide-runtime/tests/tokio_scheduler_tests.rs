// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::channel::oneshot;
use futures::FutureExt;
use monoxide_runtime::TokioScheduler;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::advance;

#[tokio::test]
async fn test_spawn_runs_off_the_caller() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TokioScheduler::current();
    let (tx, rx) = oneshot::channel();

    // Act
    scheduler.spawn(
        async move {
            let _ = tx.send("ran");
        }
        .boxed(),
    );

    // Assert
    assert_eq!(rx.await?, "ran");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_sleep_follows_paused_clock() {
    // Arrange
    let scheduler = TokioScheduler::current();
    let start = scheduler.now();
    let mut sleep = scheduler.sleep(Duration::from_millis(100));

    // Act & Assert
    assert!((&mut sleep).now_or_never().is_none());
    advance(Duration::from_millis(100)).await;
    assert!(sleep.now_or_never().is_some());
    assert_eq!(scheduler.now() - start, Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn test_spawn_after_orders_by_delay() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TokioScheduler::current();
    let order = Arc::new(Mutex::new(Vec::new()));
    let (done_tx, done_rx) = oneshot::channel();

    // Act
    scheduler.spawn_after(Duration::from_millis(300), {
        let order = order.clone();
        async move {
            order.lock().unwrap().push("slow");
            let _ = done_tx.send(());
        }
        .boxed()
    });
    scheduler.spawn_after(Duration::from_millis(100), {
        let order = order.clone();
        async move {
            order.lock().unwrap().push("fast");
        }
        .boxed()
    });

    // Assert
    done_rx.await?;
    assert_eq!(*order.lock().unwrap(), vec!["fast", "slow"]);

    Ok(())
}

#[test]
fn test_try_current_outside_runtime_is_none() {
    assert!(TokioScheduler::try_current().is_none());
}
