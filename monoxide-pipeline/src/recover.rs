// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::pipeline::{Node, Pipeline};
use monoxide_core::{PipelineError, PipelineItem};
use std::sync::Arc;

impl<T: PipelineItem> Pipeline<T> {
    /// Rewrite the error. Values and empty completions pass through.
    pub fn on_error_map<F>(&self, mapper: F) -> Pipeline<T>
    where
        F: Fn(PipelineError) -> PipelineError + Send + Sync + 'static,
    {
        Pipeline::from_node(Node::OnErrorMap {
            upstream: self.clone(),
            mapper: Arc::new(mapper),
        })
    }

    /// Continue with the pipeline `fallback` builds from any error.
    pub fn on_error_resume<F>(&self, fallback: F) -> Pipeline<T>
    where
        F: Fn(PipelineError) -> Pipeline<T> + Send + Sync + 'static,
    {
        self.on_error_resume_if(|_| true, fallback)
    }

    /// Like [`on_error_resume`](Self::on_error_resume), for errors matching
    /// `filter` only.
    pub fn on_error_resume_if<P, F>(&self, filter: P, fallback: F) -> Pipeline<T>
    where
        P: Fn(&PipelineError) -> bool + Send + Sync + 'static,
        F: Fn(PipelineError) -> Pipeline<T> + Send + Sync + 'static,
    {
        Pipeline::from_node(Node::OnErrorResume {
            upstream: self.clone(),
            filter: Arc::new(filter),
            fallback: Arc::new(fallback),
        })
    }

    /// Replace any error with `value`.
    pub fn on_error_return(&self, value: T) -> Pipeline<T> {
        self.on_error_return_if(|_| true, value)
    }

    pub fn on_error_return_if<P>(&self, filter: P, value: T) -> Pipeline<T>
    where
        P: Fn(&PipelineError) -> bool + Send + Sync + 'static,
    {
        let fallback = Pipeline::just(value);
        self.on_error_resume_if(filter, move |_| fallback.clone())
    }
}
