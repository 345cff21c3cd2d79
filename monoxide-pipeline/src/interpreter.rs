// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Evaluation of [`Node`] descriptions.
//!
//! Every node is evaluated by one `match`; upstream nodes are evaluated
//! through [`Pipeline::evaluate`], which boxes them, so the recursion depth of
//! the description never shows up in the size of a future.

use crate::context::Context;
use crate::guard::{guarded, CancelHook};
use crate::pipeline::{Node, Pipeline};
use crate::retry::{Failure, RetryDecision};
use crate::sink::Sink;
use futures::channel::oneshot;
use futures::future::{select, Either};
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use monoxide_core::{PipelineError, PipelineItem, Signal};
use std::panic::AssertUnwindSafe;
use tracing::{debug, info, trace};

pub(crate) async fn interpret<T: PipelineItem>(node: &Node<T>, ctx: Context) -> Signal<T> {
    match node {
        Node::Just(value) => Signal::Value(value.clone()),
        Node::Empty => Signal::Empty,
        Node::Never => {
            ctx.token().cancelled().await;
            Signal::Cancelled
        }
        Node::Fail(error) => Signal::Error(error.clone()),
        Node::Defer(factory) => match guarded(|| factory()) {
            Ok(pipeline) => pipeline.evaluate(ctx).await,
            Err(error) => Signal::Error(error),
        },
        Node::Thunk(thunk) => guarded(|| thunk()).and_then(|result| result).into(),
        Node::Future(factory) => {
            let future = match guarded(|| factory()) {
                Ok(future) => future,
                Err(error) => return Signal::Error(error),
            };
            match ctx
                .until_cancelled(AssertUnwindSafe(future).catch_unwind())
                .await
            {
                Some(Ok(result)) => result.into(),
                Some(Err(payload)) => Signal::Error(PipelineError::from_panic(payload)),
                None => Signal::Cancelled,
            }
        }
        Node::Create(producer) => create(producer.as_ref(), &ctx).await,
        Node::Filter {
            upstream,
            predicate,
        } => match upstream.evaluate(ctx).await {
            Signal::Value(value) => match guarded(|| predicate(&value)) {
                Ok(true) => Signal::Value(value),
                Ok(false) => Signal::Empty,
                Err(error) => Signal::Error(error),
            },
            other => other,
        },
        Node::FilterAsync {
            upstream,
            predicate,
        } => {
            let value = match upstream.evaluate(ctx.clone()).await {
                Signal::Value(value) => value,
                other => return other,
            };
            let verdict = match guarded(|| predicate(&value)) {
                Ok(verdict) => verdict,
                Err(error) => return Signal::Error(error),
            };
            match verdict.evaluate(ctx).await {
                Signal::Value(true) => Signal::Value(value),
                Signal::Value(false) | Signal::Empty => Signal::Empty,
                Signal::Error(error) => Signal::Error(error),
                Signal::Cancelled => Signal::Cancelled,
            }
        }
        Node::SwitchIfEmpty { upstream, fallback } => match upstream.evaluate(ctx.clone()).await {
            Signal::Empty => fallback.evaluate(ctx).await,
            other => other,
        },
        Node::Single(upstream) => match upstream.evaluate(ctx).await {
            Signal::Empty => Signal::Error(PipelineError::NoSuchElement),
            other => other,
        },
        Node::Delay { upstream, duration } => {
            let signal = upstream.evaluate(ctx.clone()).await;
            if signal.is_cancelled() {
                return signal;
            }
            match ctx.sleep(*duration).await {
                Some(()) => signal,
                None => Signal::Cancelled,
            }
        }
        Node::DelaySubscription { upstream, duration } => match ctx.sleep(*duration).await {
            Some(()) => upstream.evaluate(ctx).await,
            None => Signal::Cancelled,
        },
        Node::Timeout { upstream, duration } => {
            let run = ctx.child();
            let attempt = upstream.evaluate(run.clone());
            let deadline = ctx.scheduler().sleep(*duration);
            match select(attempt, deadline).await {
                Either::Left((signal, _)) => signal,
                Either::Right(((), attempt)) => {
                    run.cancel();
                    drop(attempt);
                    debug!(?duration, upstream = upstream.kind(), "timeout elapsed");
                    Signal::Error(PipelineError::timeout(*duration))
                }
            }
        }
        Node::Retry {
            upstream,
            max_retries,
        } => {
            let mut retries = 0;
            loop {
                match upstream.evaluate(ctx.clone()).await {
                    Signal::Error(error) if retries < *max_retries && !ctx.is_cancelled() => {
                        retries += 1;
                        debug!(retries, max_retries, %error, "retry: resubscribing");
                    }
                    other => return other,
                }
            }
        }
        Node::RetryWhen { upstream, policy } => {
            let mut attempt = 0;
            loop {
                let error = match upstream.evaluate(ctx.clone()).await {
                    Signal::Error(error) => error,
                    other => return other,
                };
                let failure = Failure { error, attempt };
                match guarded(|| policy.decide(&failure)) {
                    Ok(RetryDecision::RetryAfter(delay)) => {
                        debug!(attempt, ?delay, error = %failure.error, "retry_when: resubscribing");
                        if ctx.sleep(delay).await.is_none() {
                            return Signal::Cancelled;
                        }
                        attempt += 1;
                    }
                    Ok(RetryDecision::Stop) => {
                        debug!(attempt, error = %failure.error, "retry_when: policy stopped");
                        return Signal::Error(failure.error);
                    }
                    Err(panic) => return Signal::Error(panic),
                }
            }
        }
        Node::OnErrorMap { upstream, mapper } => match upstream.evaluate(ctx).await {
            Signal::Error(error) => {
                let (Ok(mapped) | Err(mapped)) = guarded(|| mapper(error));
                Signal::Error(mapped)
            }
            other => other,
        },
        Node::OnErrorResume {
            upstream,
            filter,
            fallback,
        } => {
            let error = match upstream.evaluate(ctx.clone()).await {
                Signal::Error(error) => error,
                other => return other,
            };
            match guarded(|| filter(&error)) {
                Ok(true) => {}
                Ok(false) => return Signal::Error(error),
                Err(panic) => return Signal::Error(panic),
            }
            trace!(%error, "on_error_resume: switching to fallback");
            match guarded(|| fallback(error)) {
                Ok(pipeline) => pipeline.evaluate(ctx).await,
                Err(panic) => Signal::Error(panic),
            }
        }
        Node::FirstOf(candidates) => first_of(candidates, &ctx).await,
        Node::Cache { upstream, cell } => {
            let run = cell.shared(upstream, &ctx);
            ctx.until_cancelled(run).await.unwrap_or(Signal::Cancelled)
        }
        Node::Tap {
            upstream,
            inspector,
        } => match upstream.evaluate(ctx).await {
            Signal::Value(value) => match guarded(|| inspector(&value)) {
                Ok(()) => Signal::Value(value),
                Err(error) => Signal::Error(error),
            },
            other => other,
        },
        Node::OnCancel { upstream, hook } => {
            CancelHook::new(upstream.evaluate(ctx), hook.clone()).await
        }
        Node::Log { upstream, category } => {
            info!(category = %category, upstream = upstream.kind(), "subscribe");
            let signal = upstream.evaluate(ctx).await;
            match &signal {
                Signal::Value(_) => info!(category = %category, "on_value"),
                Signal::Empty => info!(category = %category, "on_empty"),
                Signal::Error(error) => info!(category = %category, %error, "on_error"),
                Signal::Cancelled => info!(category = %category, "cancel"),
            }
            signal
        }
        Node::Stage(stage) => stage.evaluate(ctx).await,
    }
}

async fn create<T: PipelineItem>(producer: &(dyn Fn(Sink<T>) + Send + Sync), ctx: &Context) -> Signal<T> {
    let (sender, mut receiver) = oneshot::channel();
    let sink = Sink::new(sender, ctx.token().clone());

    if let Err(error) = guarded(|| producer(sink)) {
        // The producer may have emitted before panicking
        return match receiver.try_recv() {
            Ok(Some(signal)) => signal,
            _ => Signal::Error(error),
        };
    }

    match ctx.until_cancelled(receiver).await {
        Some(Ok(signal)) => signal,
        Some(Err(oneshot::Canceled)) => Signal::Error(PipelineError::SinkDropped),
        None => Signal::Cancelled,
    }
}

async fn first_of<T: PipelineItem>(candidates: &[Pipeline<T>], ctx: &Context) -> Signal<T> {
    let group = ctx.child();
    let mut race: FuturesUnordered<_> = candidates
        .iter()
        .map(|candidate| candidate.evaluate(group.child()))
        .collect();

    let Some(winner) = race.next().await else {
        return Signal::Empty;
    };

    trace!(losers = race.len(), "first_of: cancelling losers");
    group.cancel();
    drop(race);
    winner
}
