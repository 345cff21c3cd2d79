// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::context::Context;
use crate::guard::guarded;
use crate::pipeline::{Node, Pipeline};
use crate::stage::Stage;
use futures::future::BoxFuture;
use futures::FutureExt;
use monoxide_core::{IntoPipelineError, PipelineItem, Result, Signal};
use std::error::Error as StdError;
use std::sync::Arc;

type MapFn<S, T> = Arc<dyn Fn(S) -> Result<T> + Send + Sync>;
type BindFn<S, T> = Arc<dyn Fn(S) -> Pipeline<T> + Send + Sync>;

struct MapStage<S, T> {
    upstream: Pipeline<S>,
    f: MapFn<S, T>,
}

impl<S: PipelineItem, T: PipelineItem> Stage<T> for MapStage<S, T> {
    fn evaluate(&self, ctx: Context) -> BoxFuture<'static, Signal<T>> {
        let upstream = self.upstream.evaluate(ctx);
        let f = Arc::clone(&self.f);
        async move {
            match upstream.await {
                Signal::Value(value) => {
                    Signal::from(guarded(|| f(value)).and_then(|result| result).map(Some))
                }
                other => crate::stage::retype(other),
            }
        }
        .boxed()
    }

    fn kind(&self) -> &'static str {
        "map"
    }
}

struct FlatMapStage<S, T> {
    upstream: Pipeline<S>,
    f: BindFn<S, T>,
}

impl<S: PipelineItem, T: PipelineItem> Stage<T> for FlatMapStage<S, T> {
    fn evaluate(&self, ctx: Context) -> BoxFuture<'static, Signal<T>> {
        let upstream = self.upstream.evaluate(ctx.clone());
        let f = Arc::clone(&self.f);
        async move {
            let value = match upstream.await {
                Signal::Value(value) => value,
                other => return crate::stage::retype(other),
            };
            match guarded(|| f(value)) {
                Ok(inner) => inner.evaluate(ctx).await,
                Err(error) => Signal::Error(error),
            }
        }
        .boxed()
    }

    fn kind(&self) -> &'static str {
        "flat_map"
    }
}

impl<T: PipelineItem> Pipeline<T> {
    /// Transform the value. A panic in `f` fails the run with an upstream
    /// error.
    pub fn map<U, F>(&self, f: F) -> Pipeline<U>
    where
        U: PipelineItem,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Pipeline::from_stage(MapStage {
            upstream: self.clone(),
            f: Arc::new(move |value| Ok(f(value))),
        })
    }

    /// Transform the value with a fallible function.
    pub fn try_map<U, E, F>(&self, f: F) -> Pipeline<U>
    where
        U: PipelineItem,
        E: StdError + Send + Sync + 'static,
        F: Fn(T) -> std::result::Result<U, E> + Send + Sync + 'static,
    {
        Pipeline::from_stage(MapStage {
            upstream: self.clone(),
            f: Arc::new(move |value| f(value).map_err(IntoPipelineError::into_pipeline_error)),
        })
    }

    /// Keep the value if `predicate` holds, otherwise complete empty.
    pub fn filter<F>(&self, predicate: F) -> Pipeline<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Pipeline::from_node(Node::Filter {
            upstream: self.clone(),
            predicate: Arc::new(predicate),
        })
    }

    /// Keep the value if the pipeline returned by `predicate` emits `true`.
    ///
    /// An empty verdict counts as `false`; a failed verdict fails the run.
    pub fn filter_async<F>(&self, predicate: F) -> Pipeline<T>
    where
        F: Fn(&T) -> Pipeline<bool> + Send + Sync + 'static,
    {
        Pipeline::from_node(Node::FilterAsync {
            upstream: self.clone(),
            predicate: Arc::new(predicate),
        })
    }

    /// Continue with the pipeline `f` builds from the value.
    pub fn flat_map<U, F>(&self, f: F) -> Pipeline<U>
    where
        U: PipelineItem,
        F: Fn(T) -> Pipeline<U> + Send + Sync + 'static,
    {
        Pipeline::from_stage(FlatMapStage {
            upstream: self.clone(),
            f: Arc::new(f),
        })
    }

    /// Apply a reusable pipeline-to-pipeline function once, now.
    pub fn transform<U, F>(&self, f: F) -> Pipeline<U>
    where
        F: FnOnce(Pipeline<T>) -> Pipeline<U>,
    {
        f(self.clone())
    }

    /// Apply a pipeline-to-pipeline function on every subscription.
    pub fn transform_deferred<U, F>(&self, f: F) -> Pipeline<U>
    where
        U: PipelineItem,
        F: Fn(Pipeline<T>) -> Pipeline<U> + Send + Sync + 'static,
    {
        let upstream = self.clone();
        Pipeline::defer(move || f(upstream.clone()))
    }

    /// Observe the value without changing it.
    pub fn do_on_value<F>(&self, f: F) -> Pipeline<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Pipeline::from_node(Node::Tap {
            upstream: self.clone(),
            inspector: Arc::new(f),
        })
    }

    /// Run `f` when a run of this pipeline is cancelled before it produced a
    /// signal.
    pub fn do_on_cancel<F>(&self, f: F) -> Pipeline<T>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Pipeline::from_node(Node::OnCancel {
            upstream: self.clone(),
            hook: Arc::new(f),
        })
    }

    /// Emit `info` events under `category` on subscribe and on the terminal
    /// signal.
    pub fn log(&self, category: impl Into<Arc<str>>) -> Pipeline<T> {
        Pipeline::from_node(Node::Log {
            upstream: self.clone(),
            category: category.into(),
        })
    }
}
