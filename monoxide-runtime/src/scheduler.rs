// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared handle to a scheduler, threaded explicitly through every subscription.
pub type SchedulerRef = Arc<dyn Scheduler>;

/// An executor capable of running a unit of work now or after a delay.
///
/// Implementations must run spawned work on a worker distinct from the caller,
/// so that subscribing never blocks the subscribing thread.
pub trait Scheduler: Send + Sync + Debug + 'static {
    /// Run `task` on a worker, returning immediately.
    fn spawn(&self, task: BoxFuture<'static, ()>);

    /// A future that completes after `duration` on this scheduler's clock.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;

    /// Current instant on this scheduler's clock.
    fn now(&self) -> Instant;

    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Run `task` on a worker once `delay` has elapsed.
    fn spawn_after(&self, delay: Duration, task: BoxFuture<'static, ()>) {
        let sleep = self.sleep(delay);
        self.spawn(
            async move {
                sleep.await;
                task.await;
            }
            .boxed(),
        );
    }
}
