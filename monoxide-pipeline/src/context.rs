// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::future::{select, Either};
use monoxide_core::CancellationToken;
use monoxide_runtime::SchedulerRef;
use std::future::Future;
use std::pin::pin;
use std::time::Duration;

/// Execution context of one pipeline run.
///
/// Owns the scheduler reference and the cancellation token of the run.
/// Combinators hand each child run a [`child`](Self::child) context so they can
/// cancel a single child without affecting the others.
#[derive(Clone, Debug)]
pub struct Context {
    scheduler: SchedulerRef,
    token: CancellationToken,
}

impl Context {
    /// A root context with a fresh token.
    pub fn new(scheduler: SchedulerRef) -> Self {
        Self::with_token(scheduler, CancellationToken::new())
    }

    pub fn with_token(scheduler: SchedulerRef, token: CancellationToken) -> Self {
        Self { scheduler, token }
    }

    pub fn scheduler(&self) -> &SchedulerRef {
        &self.scheduler
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Same scheduler, token cancelled together with this one.
    pub fn child(&self) -> Self {
        Self::with_token(self.scheduler.clone(), self.token.child_token())
    }

    /// Same scheduler, independent root token.
    pub fn detached(&self) -> Self {
        Self::new(self.scheduler.clone())
    }

    /// Drive `future` until it completes or this context is cancelled.
    ///
    /// Returns `None` on cancellation; the future is dropped in that case.
    pub async fn until_cancelled<F: Future>(&self, future: F) -> Option<F::Output> {
        let future = pin!(future);
        let cancelled = pin!(self.token.cancelled());
        match select(future, cancelled).await {
            Either::Left((output, _)) => Some(output),
            Either::Right(_) => None,
        }
    }

    /// Sleep on the scheduler's clock. Returns `None` if cancelled first.
    pub async fn sleep(&self, duration: Duration) -> Option<()> {
        self.until_cancelled(self.scheduler.sleep(duration)).await
    }
}
