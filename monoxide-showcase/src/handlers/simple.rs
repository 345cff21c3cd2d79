// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `/simple/*`

use super::{hello, with_name};
use monoxide_core::PipelineError;
use monoxide_pipeline::Pipeline;

fn respond_to(name: &str) -> String {
    let response = hello(name);
    tracing::info!(%name, %response, "computed response");
    response
}

pub fn mono(name: Option<&str>) -> Pipeline<String> {
    Pipeline::from_value(name.map(hello)).unwrap_or_else(Pipeline::error)
}

/// The response is computed while assembling, before `assembled` is logged.
pub fn just_order(name: Option<&str>) -> Pipeline<String> {
    with_name("simple.just_order", name, |name| Pipeline::just(respond_to(&name)))
}

/// The response is computed per subscription, after `assembled` is logged.
pub fn defer_order(name: Option<&str>) -> Pipeline<String> {
    with_name("simple.defer_order", name, |name| {
        Pipeline::defer(move || Pipeline::just(respond_to(&name)))
    })
}

/// Both parts concatenated into one text body.
pub fn join(name: Option<&str>) -> Pipeline<String> {
    parts(name).map(|parts| parts.concat())
}

/// Both parts as a JSON array.
pub fn parts(name: Option<&str>) -> Pipeline<Vec<String>> {
    with_name("simple.parts", name, |name| {
        Pipeline::concat_values([Pipeline::just("hello ".to_owned()), Pipeline::just(name)])
    })
}

pub fn code_points(name: Option<&str>) -> Pipeline<Vec<u32>> {
    with_name("simple.code_points", name, |name| {
        Pipeline::just(name.chars().map(u32::from).collect())
    })
}

/// `0..size`; a missing or malformed `size` is a bad request.
pub fn range(size: Option<&str>) -> Pipeline<Vec<u32>> {
    match size.map(str::parse::<u32>) {
        Some(Ok(size)) => Pipeline::just((0..size).collect()),
        Some(Err(error)) => Pipeline::error(PipelineError::invalid_argument(format!(
            "simple.range: `size` is not a count: {error}"
        ))),
        None => Pipeline::error(PipelineError::invalid_argument(
            "simple.range: missing required parameter `size`",
        )),
    }
}
