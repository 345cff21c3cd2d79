// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Handlers, one module per endpoint group.
//!
//! Handlers only assemble. Nothing inside the returned pipeline runs until it
//! is served, which the `assembled` log line makes visible: it is always
//! printed before any step of the pipeline.

pub mod mono;
pub mod mono_from;
pub mod simple;
pub mod then;
pub mod zip;

use monoxide_core::{PipelineError, PipelineItem};
use monoxide_pipeline::Pipeline;
use std::time::Duration;

pub const ZHANG_SAN: &str = "张三";
pub const LI_SI: &str = "李四";

pub(crate) fn hello(name: &str) -> String {
    format!("hello {name}")
}

pub(crate) fn announce(handler: &'static str, name: Option<&str>) {
    tracing::info!(handler, name = name.unwrap_or("<none>"), "assembled");
}

/// Build with a required `name`, or fail with `InvalidArgument` when absent.
pub(crate) fn with_name<T, F>(handler: &'static str, name: Option<&str>, build: F) -> Pipeline<T>
where
    T: PipelineItem,
    F: FnOnce(String) -> Pipeline<T>,
{
    match name {
        Some(name) => {
            let pipeline = build(name.to_owned());
            announce(handler, Some(name));
            pipeline
        }
        None => Pipeline::error(PipelineError::invalid_argument(format!(
            "{handler}: missing required parameter `name`"
        ))),
    }
}

/// A deferred step that logs `line` when it runs.
pub(crate) fn logged(line: String) -> Pipeline<String> {
    Pipeline::defer(move || {
        tracing::info!(%line, "step");
        Pipeline::just(line.clone())
    })
}

/// Stand-in for a slow background task yielding `label`.
pub(crate) fn worker(label: &'static str, millis: u64) -> Pipeline<String> {
    Pipeline::from_supplier(move || {
        tracing::info!(label, "worker done");
        label.to_owned()
    })
    .delay_subscription(Duration::from_millis(millis))
}
