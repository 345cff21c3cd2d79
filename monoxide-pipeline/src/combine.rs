// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operators that combine several pipelines into one.
//!
//! Sequential operators (`then_*`, `and`, `concat_*`) evaluate their sources
//! one after the other in the caller's context. Concurrent operators (`zip*`,
//! `when`, `merge_*`, `first_of*`) evaluate every source under a shared group
//! token and cancel that group as soon as the outcome is decided, dropping the
//! sources still in flight.

use crate::context::Context;
use crate::guard::guarded;
use crate::pipeline::{Node, Pipeline};
use crate::stage::{retype, Stage};
use futures::future::{select, BoxFuture, Either};
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use monoxide_core::{PipelineItem, Signal};
use std::sync::Arc;

/// Values gathered so far with their source index, or the signal that halted
/// the group.
type Gathered<T> = Result<Vec<(usize, T)>, Signal<T>>;

async fn gather<T: PipelineItem>(
    ctx: Context,
    sources: &[Pipeline<T>],
    empty_halts: bool,
) -> Gathered<T> {
    let group = ctx.child();
    let mut running: FuturesUnordered<_> = sources
        .iter()
        .enumerate()
        .map(|(index, source)| {
            source
                .evaluate(group.child())
                .map(move |signal| (index, signal))
        })
        .collect();

    let mut values = Vec::with_capacity(sources.len());
    while let Some((index, signal)) = running.next().await {
        match signal {
            Signal::Value(value) => values.push((index, value)),
            Signal::Empty if !empty_halts => {}
            halt => {
                tracing::trace!(index, in_flight = running.len(), "group halted, cancelling");
                group.cancel();
                return Err(halt);
            }
        }
    }
    Ok(values)
}

struct GatherStage<T, U> {
    sources: Arc<[Pipeline<T>]>,
    empty_halts: bool,
    finish: fn(Vec<(usize, T)>) -> Signal<U>,
    kind: &'static str,
}

impl<T: PipelineItem, U: PipelineItem> Stage<U> for GatherStage<T, U> {
    fn evaluate(&self, ctx: Context) -> BoxFuture<'static, Signal<U>> {
        let sources = Arc::clone(&self.sources);
        let empty_halts = self.empty_halts;
        let finish = self.finish;
        async move {
            match gather(ctx, &sources, empty_halts).await {
                Ok(values) => finish(values),
                Err(halt) => retype(halt),
            }
        }
        .boxed()
    }

    fn kind(&self) -> &'static str {
        self.kind
    }
}

struct ZipStage<A, B> {
    first: Pipeline<A>,
    second: Pipeline<B>,
}

impl<A: PipelineItem, B: PipelineItem> Stage<(A, B)> for ZipStage<A, B> {
    fn evaluate(&self, ctx: Context) -> BoxFuture<'static, Signal<(A, B)>> {
        let group = ctx.child();
        let first = self.first.evaluate(group.child());
        let second = self.second.evaluate(group.child());
        async move {
            match select(first, second).await {
                Either::Left((Signal::Value(a), second)) => second.await.map(|b| (a, b)),
                Either::Right((Signal::Value(b), first)) => first.await.map(|a| (a, b)),
                Either::Left((halt, _)) => {
                    group.cancel();
                    retype(halt)
                }
                Either::Right((halt, _)) => {
                    group.cancel();
                    retype(halt)
                }
            }
        }
        .boxed()
    }

    fn kind(&self) -> &'static str {
        "zip"
    }
}

struct ConcatStage<T> {
    sources: Arc<[Pipeline<T>]>,
}

impl<T: PipelineItem> Stage<Vec<T>> for ConcatStage<T> {
    fn evaluate(&self, ctx: Context) -> BoxFuture<'static, Signal<Vec<T>>> {
        let sources = Arc::clone(&self.sources);
        async move {
            let mut values = Vec::with_capacity(sources.len());
            for source in sources.iter() {
                match source.evaluate(ctx.clone()).await {
                    Signal::Value(value) => values.push(value),
                    Signal::Empty => {}
                    halt => return retype(halt),
                }
            }
            Signal::Value(values)
        }
        .boxed()
    }

    fn kind(&self) -> &'static str {
        "concat_values"
    }
}

struct ThenStage<S, T> {
    upstream: Pipeline<S>,
    next: Pipeline<T>,
}

impl<S: PipelineItem, T: PipelineItem> Stage<T> for ThenStage<S, T> {
    fn evaluate(&self, ctx: Context) -> BoxFuture<'static, Signal<T>> {
        let upstream = self.upstream.evaluate(ctx.clone());
        let next = self.next.clone();
        async move {
            match upstream.await {
                Signal::Value(_) | Signal::Empty => next.evaluate(ctx).await,
                halt => retype(halt),
            }
        }
        .boxed()
    }

    fn kind(&self) -> &'static str {
        "then"
    }
}

type Trigger<T> = Arc<dyn Fn(&T) -> Pipeline<()> + Send + Sync>;

struct DelayUntilStage<T> {
    upstream: Pipeline<T>,
    trigger: Trigger<T>,
}

impl<T: PipelineItem> Stage<T> for DelayUntilStage<T> {
    fn evaluate(&self, ctx: Context) -> BoxFuture<'static, Signal<T>> {
        let upstream = self.upstream.evaluate(ctx.clone());
        let trigger = Arc::clone(&self.trigger);
        async move {
            let value = match upstream.await {
                Signal::Value(value) => value,
                other => return other,
            };
            let gate = match guarded(|| trigger(&value)) {
                Ok(gate) => gate,
                Err(error) => return Signal::Error(error),
            };
            match gate.evaluate(ctx).await {
                Signal::Value(()) | Signal::Empty => Signal::Value(value),
                halt => retype(halt),
            }
        }
        .boxed()
    }

    fn kind(&self) -> &'static str {
        "delay_until"
    }
}

fn in_source_order<T>(mut values: Vec<(usize, T)>) -> Signal<Vec<T>> {
    values.sort_unstable_by_key(|(index, _)| *index);
    Signal::Value(values.into_iter().map(|(_, value)| value).collect())
}

fn in_completion_order<T>(values: Vec<(usize, T)>) -> Signal<Vec<T>> {
    Signal::Value(values.into_iter().map(|(_, value)| value).collect())
}

fn discard<T>(_: Vec<(usize, T)>) -> Signal<()> {
    Signal::Empty
}

impl<T: PipelineItem> Pipeline<T> {
    /// Run `self`, then `next`, and emit `next`'s signal.
    ///
    /// `self`'s value is discarded; if `self` fails, `next` never starts.
    pub fn then_pipeline<U: PipelineItem>(&self, next: Pipeline<U>) -> Pipeline<U> {
        Pipeline::from_stage(ThenStage {
            upstream: self.clone(),
            next,
        })
    }

    /// Wait for completion and discard the value.
    pub fn then(&self) -> Pipeline<()> {
        self.then_pipeline(Pipeline::empty())
    }

    /// Wait for completion, then emit `value`.
    pub fn then_return<U: PipelineItem>(&self, value: U) -> Pipeline<U> {
        self.then_pipeline(Pipeline::just(value))
    }

    /// Run `self` and then `other` to completion, discarding both values.
    pub fn and<U: PipelineItem>(&self, other: Pipeline<U>) -> Pipeline<()> {
        self.then_pipeline(other.then())
    }

    /// Pair this value with `other`'s; both run concurrently.
    pub fn zip_with<U: PipelineItem>(&self, other: Pipeline<U>) -> Pipeline<(T, U)> {
        Pipeline::zip(self.clone(), other)
    }

    /// Pair this value with the value of the pipeline `f` builds from it.
    ///
    /// Unlike [`zip_with`](Self::zip_with), the second pipeline only starts
    /// once this one has produced its value.
    pub fn zip_when<U, F>(&self, f: F) -> Pipeline<(T, U)>
    where
        U: PipelineItem,
        F: Fn(&T) -> Pipeline<U> + Send + Sync + 'static,
    {
        self.flat_map(move |value| f(&value).map(move |other| (value.clone(), other)))
    }

    /// Emit whichever of the given pipelines signals first; the rest are
    /// cancelled. No candidates means `Empty`.
    pub fn first_of_all<I>(candidates: I) -> Pipeline<T>
    where
        I: IntoIterator<Item = Pipeline<T>>,
    {
        Pipeline::from_node(Node::FirstOf(candidates.into_iter().collect()))
    }

    pub fn first_of(first: Pipeline<T>, second: Pipeline<T>) -> Pipeline<T> {
        Self::first_of_all([first, second])
    }

    /// Race this pipeline against `other`.
    pub fn or(&self, other: Pipeline<T>) -> Pipeline<T> {
        Self::first_of(self.clone(), other)
    }

    pub fn concat_with(&self, other: Pipeline<T>) -> Pipeline<Vec<T>> {
        Pipeline::concat_values([self.clone(), other])
    }

    pub fn merge_with(&self, other: Pipeline<T>) -> Pipeline<Vec<T>> {
        Pipeline::merge_values([self.clone(), other])
    }

    /// Hold the value back until the pipeline `trigger` builds from it has
    /// completed. The trigger's own value is discarded.
    pub fn delay_until<U, F>(&self, trigger: F) -> Pipeline<T>
    where
        U: PipelineItem,
        F: Fn(&T) -> Pipeline<U> + Send + Sync + 'static,
    {
        Pipeline::from_stage(DelayUntilStage {
            upstream: self.clone(),
            trigger: Arc::new(move |value: &T| trigger(value).then()),
        })
    }

    /// Continue with `fallback` if this pipeline completes empty.
    pub fn switch_if_empty(&self, fallback: Pipeline<T>) -> Pipeline<T> {
        Pipeline::from_node(Node::SwitchIfEmpty {
            upstream: self.clone(),
            fallback,
        })
    }

    pub fn default_if_empty(&self, value: T) -> Pipeline<T> {
        self.switch_if_empty(Pipeline::just(value))
    }

    /// Require a value: `Empty` becomes [`NoSuchElement`](monoxide_core::PipelineError::NoSuchElement).
    pub fn single(&self) -> Pipeline<T> {
        Pipeline::from_node(Node::Single(self.clone()))
    }
}

impl Pipeline<()> {
    /// Run every pipeline concurrently and complete empty once all have
    /// completed. The first failure cancels the rest.
    pub fn when<T, I>(pipelines: I) -> Pipeline<()>
    where
        T: PipelineItem,
        I: IntoIterator<Item = Pipeline<T>>,
    {
        Pipeline::from_stage(GatherStage {
            sources: pipelines.into_iter().collect(),
            empty_halts: false,
            finish: discard,
            kind: "when",
        })
    }
}

impl<A: PipelineItem, B: PipelineItem> Pipeline<(A, B)> {
    /// Run both concurrently and pair their values.
    ///
    /// The first error or empty completion wins and cancels the other side.
    pub fn zip(first: Pipeline<A>, second: Pipeline<B>) -> Self {
        Pipeline::from_stage(ZipStage { first, second })
    }
}

impl<A: PipelineItem, B: PipelineItem, C: PipelineItem> Pipeline<(A, B, C)> {
    pub fn zip3(first: Pipeline<A>, second: Pipeline<B>, third: Pipeline<C>) -> Self {
        Pipeline::zip(Pipeline::zip(first, second), third).map(|((a, b), c)| (a, b, c))
    }
}

impl<T: PipelineItem> Pipeline<Vec<T>> {
    /// Run every pipeline concurrently and collect their values in source
    /// order. Fails or completes empty as soon as any source does.
    pub fn zip_all<I>(pipelines: I) -> Self
    where
        I: IntoIterator<Item = Pipeline<T>>,
    {
        Pipeline::from_stage(GatherStage {
            sources: pipelines.into_iter().collect(),
            empty_halts: true,
            finish: in_source_order,
            kind: "zip_all",
        })
    }

    /// Run one pipeline after the other, collecting values in order. Empty
    /// sources contribute nothing; the first failure stops the sequence.
    pub fn concat_values<I>(pipelines: I) -> Self
    where
        I: IntoIterator<Item = Pipeline<T>>,
    {
        Pipeline::from_stage(ConcatStage {
            sources: pipelines.into_iter().collect(),
        })
    }

    /// Run every pipeline concurrently, collecting values in completion
    /// order. The first failure cancels the rest.
    pub fn merge_values<I>(pipelines: I) -> Self
    where
        I: IntoIterator<Item = Pipeline<T>>,
    {
        Pipeline::from_stage(GatherStage {
            sources: pipelines.into_iter().collect(),
            empty_halts: false,
            finish: in_completion_order,
            kind: "merge_values",
        })
    }
}
