// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::test_error::TestError;
use monoxide_core::{IntoPipelineError, PipelineItem};
use monoxide_pipeline::Pipeline;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter, cloned into callbacks.
#[derive(Clone, Debug, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments and returns the previous value.
    pub fn incr(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst)
    }

    #[must_use]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Records subscriptions to, and cancellations of, an instrumented pipeline.
#[derive(Clone, Debug, Default)]
pub struct Probe {
    subscriptions: Counter,
    cancellations: Counter,
}

impl Probe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `pipeline` so every run bumps the subscription count and every
    /// cancelled run bumps the cancellation count.
    pub fn instrument<T: PipelineItem>(&self, pipeline: Pipeline<T>) -> Pipeline<T> {
        let subscriptions = self.subscriptions.clone();
        let cancellations = self.cancellations.clone();
        Pipeline::defer(move || {
            subscriptions.incr();
            pipeline.clone()
        })
        .do_on_cancel(move || {
            cancellations.incr();
        })
    }

    #[must_use]
    pub fn subscriptions(&self) -> usize {
        self.subscriptions.get()
    }

    #[must_use]
    pub fn cancellations(&self) -> usize {
        self.cancellations.get()
    }
}

/// A pipeline that fails its first `failures` runs, then emits `value`.
///
/// The returned counter holds the number of runs so far.
pub fn flaky<T: PipelineItem>(failures: usize, value: T) -> (Pipeline<T>, Counter) {
    let attempts = Counter::new();
    let pipeline = Pipeline::defer({
        let attempts = attempts.clone();
        move || {
            let attempt = attempts.incr();
            if attempt < failures {
                Pipeline::error(TestError::Flaky(attempt).into_pipeline_error())
            } else {
                Pipeline::just(value.clone())
            }
        }
    });
    (pipeline, attempts)
}
