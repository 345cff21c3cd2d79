// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_runtime::{SchedulerRef, TokioScheduler};
use std::fmt::Debug;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

/// Scheduler bound to the current tokio runtime.
///
/// # Panics
/// Panics outside a tokio runtime.
#[must_use]
pub fn scheduler() -> SchedulerRef {
    TokioScheduler::current()
}

/// Install a fmt subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Receive the next item, panicking if none arrives within `timeout_ms`.
pub async fn recv_timeout<T>(rx: &mut UnboundedReceiver<T>, timeout_ms: u64) -> T {
    match timeout(Duration::from_millis(timeout_ms), rx.recv()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("channel closed, expected an item"),
        Err(_) => panic!("no item received within {timeout_ms}ms"),
    }
}

/// Assert that nothing arrives within `timeout_ms`.
pub async fn assert_no_recv<T: Debug>(rx: &mut UnboundedReceiver<T>, timeout_ms: u64) {
    if let Ok(Some(item)) = timeout(Duration::from_millis(timeout_ms), rx.recv()).await {
        panic!("unexpected item received: {item:?}");
    }
}
