// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// The standard bound for values produced by a pipeline.
///
/// A pipeline description can be subscribed many times, so constant values are
/// cloned into each run, and cached signals are cloned to every subscriber.
/// Runs may hop between worker threads, hence `Send + Sync + 'static`.
///
/// Implemented automatically for every type that satisfies the bounds.
pub trait PipelineItem: Clone + Send + Sync + 'static {}

impl<T> PipelineItem for T where T: Clone + Send + Sync + 'static {}
