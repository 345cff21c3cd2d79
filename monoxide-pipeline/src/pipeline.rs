// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::cache::CacheCell;
use crate::context::Context;
use crate::guard::Hook;
use crate::retry::RetryPolicy;
use crate::sink::Sink;
use crate::stage::Stage;
use futures::future::BoxFuture;
use futures::FutureExt;
use monoxide_core::{PipelineError, PipelineItem, Result, Signal};
use monoxide_runtime::SchedulerRef;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub(crate) type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
pub(crate) type AsyncPredicate<T> = Arc<dyn Fn(&T) -> Pipeline<bool> + Send + Sync>;
pub(crate) type Factory<T> = Arc<dyn Fn() -> Pipeline<T> + Send + Sync>;
pub(crate) type Thunk<T> = Arc<dyn Fn() -> Result<Option<T>> + Send + Sync>;
pub(crate) type FutureFactory<T> =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Option<T>>> + Send + Sync>;
pub(crate) type Producer<T> = Arc<dyn Fn(Sink<T>) + Send + Sync>;
pub(crate) type Inspector<T> = Arc<dyn Fn(&T) + Send + Sync>;
pub(crate) type ErrorMapper = Arc<dyn Fn(PipelineError) -> PipelineError + Send + Sync>;
pub(crate) type ErrorFilter = Arc<dyn Fn(&PipelineError) -> bool + Send + Sync>;
pub(crate) type Fallback<T> = Arc<dyn Fn(PipelineError) -> Pipeline<T> + Send + Sync>;

/// One node of a pipeline description.
///
/// Sources have no upstream; operators wrap the pipeline they were called on.
/// Operators that change the value type are erased behind [`Stage`].
pub(crate) enum Node<T> {
    Just(T),
    Empty,
    Never,
    Fail(PipelineError),
    Defer(Factory<T>),
    Thunk(Thunk<T>),
    Future(FutureFactory<T>),
    Create(Producer<T>),
    Filter {
        upstream: Pipeline<T>,
        predicate: Predicate<T>,
    },
    FilterAsync {
        upstream: Pipeline<T>,
        predicate: AsyncPredicate<T>,
    },
    SwitchIfEmpty {
        upstream: Pipeline<T>,
        fallback: Pipeline<T>,
    },
    Single(Pipeline<T>),
    Delay {
        upstream: Pipeline<T>,
        duration: Duration,
    },
    DelaySubscription {
        upstream: Pipeline<T>,
        duration: Duration,
    },
    Timeout {
        upstream: Pipeline<T>,
        duration: Duration,
    },
    Retry {
        upstream: Pipeline<T>,
        max_retries: usize,
    },
    RetryWhen {
        upstream: Pipeline<T>,
        policy: Arc<dyn RetryPolicy>,
    },
    OnErrorMap {
        upstream: Pipeline<T>,
        mapper: ErrorMapper,
    },
    OnErrorResume {
        upstream: Pipeline<T>,
        filter: ErrorFilter,
        fallback: Fallback<T>,
    },
    FirstOf(Vec<Pipeline<T>>),
    Cache {
        upstream: Pipeline<T>,
        cell: Arc<CacheCell<T>>,
    },
    Tap {
        upstream: Pipeline<T>,
        inspector: Inspector<T>,
    },
    OnCancel {
        upstream: Pipeline<T>,
        hook: Hook,
    },
    Log {
        upstream: Pipeline<T>,
        category: Arc<str>,
    },
    Stage(Arc<dyn Stage<T>>),
}

impl<T> Node<T> {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Node::Just(_) => "just",
            Node::Empty => "empty",
            Node::Never => "never",
            Node::Fail(_) => "error",
            Node::Defer(_) => "defer",
            Node::Thunk(_) => "from_supplier",
            Node::Future(_) => "from_future",
            Node::Create(_) => "create",
            Node::Filter { .. } => "filter",
            Node::FilterAsync { .. } => "filter_async",
            Node::SwitchIfEmpty { .. } => "switch_if_empty",
            Node::Single(_) => "single",
            Node::Delay { .. } => "delay",
            Node::DelaySubscription { .. } => "delay_subscription",
            Node::Timeout { .. } => "timeout",
            Node::Retry { .. } => "retry",
            Node::RetryWhen { .. } => "retry_when",
            Node::OnErrorMap { .. } => "on_error_map",
            Node::OnErrorResume { .. } => "on_error_resume",
            Node::FirstOf(_) => "first_of",
            Node::Cache { .. } => "cache",
            Node::Tap { .. } => "do_on_value",
            Node::OnCancel { .. } => "do_on_cancel",
            Node::Log { .. } => "log",
            Node::Stage(stage) => stage.kind(),
        }
    }
}

/// A lazily-evaluated, composable description of zero or one value.
///
/// Cloning is cheap: clones share the same immutable description. Every
/// evaluation is an independent run unless the pipeline was built with
/// [`cache`](Self::cache) or [`hot`](Self::hot).
pub struct Pipeline<T> {
    pub(crate) node: Arc<Node<T>>,
}

impl<T> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("node", &self.node.kind())
            .finish()
    }
}

impl<T: PipelineItem> Pipeline<T> {
    pub(crate) fn from_node(node: Node<T>) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    pub(crate) fn from_stage(stage: impl Stage<T> + 'static) -> Self {
        Self::from_node(Node::Stage(Arc::new(stage)))
    }

    /// Name of the outermost operator, as shown in trace output.
    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    /// Start one run of this pipeline in `ctx`.
    ///
    /// The returned future is the run: polling it drives evaluation, dropping
    /// it abandons the run. It resolves to exactly one terminal [`Signal`].
    pub fn evaluate(&self, ctx: Context) -> BoxFuture<'static, Signal<T>> {
        let node = Arc::clone(&self.node);
        async move {
            if ctx.is_cancelled() {
                return Signal::Cancelled;
            }
            tracing::trace!(node = node.kind(), "evaluate");
            crate::interpreter::interpret(&node, ctx).await
        }
        .boxed()
    }

    /// Run this pipeline on the awaiting task with a fresh root context.
    ///
    /// Timers and spawned work use `scheduler`. For a callback-style,
    /// non-blocking subscription see `monoxide-exec`.
    pub async fn run(&self, scheduler: &SchedulerRef) -> Signal<T> {
        self.evaluate(Context::new(Arc::clone(scheduler))).await
    }
}
