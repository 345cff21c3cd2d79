// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::pipeline::{Node, Pipeline};
use crate::sink::Sink;
use futures::FutureExt;
use monoxide_core::{IntoPipelineError, PipelineError, PipelineItem, Result};
use std::error::Error as StdError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

impl<T: PipelineItem> Pipeline<T> {
    /// A pipeline that completes with `value`.
    pub fn just(value: T) -> Self {
        Self::from_node(Node::Just(value))
    }

    /// Like [`just`](Self::just), for callers holding a possibly-absent value.
    ///
    /// # Errors
    /// Returns [`PipelineError::InvalidArgument`] when the value is absent. Use
    /// [`from_optional`](Self::from_optional) when absence is legitimate.
    pub fn from_value(value: impl Into<Option<T>>) -> Result<Self> {
        value
            .into()
            .map(Self::just)
            .ok_or_else(|| PipelineError::invalid_argument("from_value requires a present value"))
    }

    /// `Value` when present, `Empty` otherwise.
    pub fn from_optional(value: Option<T>) -> Self {
        value.map_or_else(Self::empty, Self::just)
    }

    /// Build the pipeline anew for every subscription.
    pub fn defer<F>(factory: F) -> Self
    where
        F: Fn() -> Pipeline<T> + Send + Sync + 'static,
    {
        Self::from_node(Node::Defer(Arc::new(factory)))
    }

    pub fn empty() -> Self {
        Self::from_node(Node::Empty)
    }

    /// Never produces a signal. Only cancellation ends a run.
    pub fn never() -> Self {
        Self::from_node(Node::Never)
    }

    pub fn error(error: PipelineError) -> Self {
        Self::from_node(Node::Fail(error))
    }

    /// Call `supplier` on every subscription and emit its result.
    pub fn from_supplier<F>(supplier: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::from_node(Node::Thunk(Arc::new(move || Ok(Some(supplier())))))
    }

    /// Fallible [`from_supplier`](Self::from_supplier); `Err` becomes an
    /// upstream error.
    pub fn from_callable<F, E>(callable: F) -> Self
    where
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
        E: StdError + Send + Sync + 'static,
    {
        Self::from_node(Node::Thunk(Arc::new(move || {
            callable()
                .map(Some)
                .map_err(IntoPipelineError::into_pipeline_error)
        })))
    }

    /// Start a fresh future per subscription and emit what it resolves to.
    pub fn from_future<F, Fut, E>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        Self::from_node(Node::Future(Arc::new(move || {
            factory()
                .map(|result| {
                    result
                        .map(Some)
                        .map_err(IntoPipelineError::into_pipeline_error)
                })
                .boxed()
        })))
    }

    /// Bridge a callback-style producer.
    ///
    /// `producer` runs once per subscription with a fresh [`Sink`]. It may
    /// emit synchronously or hand the sink to another thread or task.
    pub fn create<F>(producer: F) -> Self
    where
        F: Fn(Sink<T>) + Send + Sync + 'static,
    {
        Self::from_node(Node::Create(Arc::new(producer)))
    }
}

impl Pipeline<()> {
    /// Run `action` on every subscription, then complete empty.
    pub fn from_runnable<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::from_node(Node::Thunk(Arc::new(move || {
            action();
            Ok(None)
        })))
    }
}

impl Pipeline<u64> {
    /// Emits `0` once `delay` has elapsed on the subscriber's scheduler.
    pub fn timer(delay: Duration) -> Self {
        Self::just(0).delay_subscription(delay)
    }
}
