// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-smol")]

use futures::channel::oneshot;
use futures::FutureExt;
use monoxide_runtime::SmolScheduler;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn test_smol_spawn_runs_off_the_caller() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let scheduler = SmolScheduler::shared();
        let caller = thread::current().id();
        let (tx, rx) = oneshot::channel();

        // Act
        scheduler.spawn(
            async move {
                let _ = tx.send(thread::current().id());
            }
            .boxed(),
        );

        // Assert
        assert_ne!(rx.await?, caller);
        Ok(())
    })
}

#[test]
fn test_smol_sleep_waits_at_least_the_duration() {
    smol::block_on(async {
        // Arrange
        let scheduler = SmolScheduler::shared();
        let start = scheduler.now();

        // Act
        scheduler.sleep(Duration::from_millis(50)).await;

        // Assert
        assert!(scheduler.now() - start >= Duration::from_millis(50));
        assert_eq!(scheduler.name(), "smol");
    });
}

#[test]
fn test_smol_spawn_after_orders_by_delay() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let scheduler = SmolScheduler::shared();
        let order = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done_rx) = oneshot::channel();

        // Act
        scheduler.spawn_after(Duration::from_millis(150), {
            let order = order.clone();
            async move {
                order.lock().unwrap().push("slow");
                let _ = done_tx.send(());
            }
            .boxed()
        });
        scheduler.spawn_after(Duration::from_millis(10), {
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
    })
}
