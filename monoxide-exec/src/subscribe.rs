// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::signal_future::SignalFuture;
use crate::subscriber::{FnSubscriber, Subscriber};
use crate::subscription::Subscription;
use futures::channel::oneshot;
use futures::FutureExt;
use monoxide_core::{PipelineError, PipelineItem, Signal};
use monoxide_pipeline::{Context, Pipeline};
use monoxide_runtime::SchedulerRef;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Extension trait for running a [`Pipeline`].
///
/// # Examples
///
/// ```
/// use monoxide_core::Signal;
/// use monoxide_exec::SubscribeExt;
/// use monoxide_pipeline::Pipeline;
/// use monoxide_runtime::TokioScheduler;
///
/// # #[tokio::main]
/// # async fn main() {
/// let scheduler = TokioScheduler::current();
/// let signal = Pipeline::just(2).map(|v| v * 21).to_future(&scheduler).await;
/// assert_eq!(signal, Signal::Value(42));
/// # }
/// ```
pub trait SubscribeExt<T: PipelineItem> {
    /// Spawn one run on `scheduler` and return immediately.
    ///
    /// The terminal signal is handed to `subscriber` on the scheduler's worker.
    /// A panic inside the subscriber is logged and swallowed.
    fn subscribe<S>(&self, scheduler: &SchedulerRef, subscriber: S) -> Subscription
    where
        S: Subscriber<T>;

    /// [`subscribe`](Self::subscribe) with a closure receiving the signal.
    fn subscribe_fn<F>(&self, scheduler: &SchedulerRef, f: F) -> Subscription
    where
        F: FnOnce(Signal<T>) + Send + 'static,
    {
        self.subscribe(scheduler, FnSubscriber::new(f))
    }

    /// Spawn one run and await its signal.
    ///
    /// Dropping the returned future before it resolves cancels the run.
    fn to_future(&self, scheduler: &SchedulerRef) -> SignalFuture<T> {
        let (sender, receiver) = oneshot::channel();
        let subscription = self.subscribe_fn(scheduler, move |signal| {
            let _ = sender.send(signal);
        });
        SignalFuture::new(receiver, subscription)
    }

    /// Spawn one run and block the calling thread until its signal arrives.
    ///
    /// Must not be called from a thread that drives `scheduler`'s own
    /// executor, or the run never makes progress.
    fn block_and_wait(&self, scheduler: &SchedulerRef) -> Signal<T> {
        futures::executor::block_on(self.to_future(scheduler))
    }

    /// Like [`block_and_wait`](Self::block_and_wait), flattened to a `Result`.
    ///
    /// # Errors
    /// Returns the run's error, or [`PipelineError::Cancelled`].
    fn block(&self, scheduler: &SchedulerRef) -> Result<Option<T>, PipelineError> {
        self.block_and_wait(scheduler).into_result()
    }
}

impl<T: PipelineItem> SubscribeExt<T> for Pipeline<T> {
    fn subscribe<S>(&self, scheduler: &SchedulerRef, subscriber: S) -> Subscription
    where
        S: Subscriber<T>,
    {
        let ctx = Context::new(Arc::clone(scheduler));
        let subscription = Subscription::new(ctx.token().clone());
        let run = self.evaluate(ctx);
        let handle = subscription.clone();

        tracing::trace!(pipeline = self.kind(), scheduler = scheduler.name(), "subscribe");
        scheduler.spawn(
            async move {
                let signal = run.await;
                let signal = if handle.finish() {
                    signal
                } else {
                    Signal::Cancelled
                };
                deliver(subscriber, signal);
            }
            .boxed(),
        );

        subscription
    }
}

fn deliver<T, S: Subscriber<T>>(subscriber: S, signal: Signal<T>) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(|| subscriber.deliver(signal))) {
        let error = PipelineError::from_panic(payload);
        tracing::error!(%error, "subscriber panicked");
    }
}
