// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::context::Context;
use crate::pipeline::{Node, Pipeline};
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use monoxide_core::{PipelineItem, Signal};
use monoxide_runtime::SchedulerRef;
use parking_lot::Mutex;
use std::sync::Arc;

type SharedRun<T> = Shared<BoxFuture<'static, Signal<T>>>;

/// Single-flight cell behind [`Pipeline::cache`].
///
/// The first subscriber installs the shared run; everyone else clones it.
/// The run uses its own root token, so a waiter going away never cancels it.
pub(crate) struct CacheCell<T> {
    run: Mutex<Option<SharedRun<T>>>,
}

impl<T: PipelineItem> CacheCell<T> {
    pub(crate) fn new() -> Self {
        Self {
            run: Mutex::new(None),
        }
    }

    pub(crate) fn shared(&self, upstream: &Pipeline<T>, ctx: &Context) -> SharedRun<T> {
        self.run
            .lock()
            .get_or_insert_with(|| {
                tracing::debug!(upstream = upstream.kind(), "cache: starting shared run");
                upstream.evaluate(ctx.detached()).shared()
            })
            .clone()
    }
}

impl<T: PipelineItem> Pipeline<T> {
    /// Share the first run's outcome with every subscriber.
    ///
    /// Concurrent first subscriptions still cause exactly one upstream run.
    /// A subscriber that cancels only stops waiting; the shared run keeps its
    /// result for the others.
    pub fn cache(&self) -> Pipeline<T> {
        Pipeline::from_node(Node::Cache {
            upstream: self.clone(),
            cell: Arc::new(CacheCell::new()),
        })
    }

    /// Start one run of `pipeline` now, on `scheduler`, and share it.
    ///
    /// This is the eager counterpart of [`cache`](Self::cache): the work
    /// begins at construction, and subscribers observe that same run.
    pub fn hot(pipeline: Pipeline<T>, scheduler: &SchedulerRef) -> Pipeline<T> {
        let cell = Arc::new(CacheCell::new());
        let run = cell.shared(&pipeline, &Context::new(Arc::clone(scheduler)));
        scheduler.spawn(run.map(|_| ()).boxed());

        Pipeline::from_node(Node::Cache {
            upstream: pipeline,
            cell,
        })
    }
}
