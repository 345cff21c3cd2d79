// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Scheduler, SchedulerRef, Timer};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

#[derive(Clone, Debug, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    type Sleep = tokio::time::Sleep;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        tokio::time::sleep(duration)
    }

    // Tokio's clock, so paused test time is honoured
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Scheduler backed by a tokio runtime handle.
///
/// # Example
///
/// ```
/// use monoxide_runtime::{Scheduler, TokioScheduler};
///
/// # #[tokio::main]
/// # async fn main() {
/// let scheduler = TokioScheduler::current();
/// let (tx, rx) = futures::channel::oneshot::channel();
/// scheduler.spawn(Box::pin(async move {
///     let _ = tx.send(42);
/// }));
/// assert_eq!(rx.await.unwrap(), 42);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
    timer: TokioTimer,
}

impl TokioScheduler {
    /// Capture the runtime the caller is currently running on.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; use [`try_current`](Self::try_current)
    /// to probe instead.
    pub fn current() -> SchedulerRef {
        Arc::new(Self::from_handle(Handle::current()))
    }

    /// Capture the caller's runtime, if there is one.
    pub fn try_current() -> Option<SchedulerRef> {
        Handle::try_current()
            .ok()
            .map(|handle| Arc::new(Self::from_handle(handle)) as SchedulerRef)
    }

    pub fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            timer: TokioTimer,
        }
    }
}

impl Scheduler for TokioScheduler {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        drop(self.handle.spawn(task));
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        // The sleep registers with the timer driver on creation
        let _guard = self.handle.enter();
        self.timer.sleep_future(duration).boxed()
    }

    fn now(&self) -> Instant {
        let _guard = self.handle.enter();
        self.timer.now()
    }

    fn name(&self) -> &'static str {
        "tokio"
    }
}
