// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `/mono/from/*`: every way of building a pipeline from plain Rust.

use super::{hello, with_name, worker};
use monoxide_pipeline::Pipeline;
use std::convert::Infallible;

pub fn mono(name: Option<&str>) -> Pipeline<String> {
    with_name("mono_from.mono", name, |name| {
        Pipeline::defer(move || Pipeline::just(hello(&name)))
    })
}

/// First code point of `name`, computed on subscription.
pub fn first_code_point(name: Option<&str>) -> Pipeline<u32> {
    with_name("mono_from.first_code_point", name, |name| {
        Pipeline::defer(move || Pipeline::from_optional(name.chars().next().map(u32::from)))
    })
}

pub fn callable(name: Option<&str>) -> Pipeline<String> {
    with_name("mono_from.callable", name, |name| {
        Pipeline::from_callable(move || {
            tracing::info!(%name, "callable invoked");
            Ok::<_, Infallible>(hello(&name))
        })
    })
}

pub fn future(name: Option<&str>) -> Pipeline<String> {
    with_name("mono_from.future", name, |name| {
        Pipeline::from_future(move || {
            let greeting = hello(&name);
            async move {
                tracing::info!(%greeting, "future polled");
                Ok::<_, Infallible>(greeting)
            }
        })
    })
}

pub fn runnable(name: Option<&str>) -> Pipeline<String> {
    with_name("mono_from.runnable", name, |name| {
        let greeting = hello(&name);
        Pipeline::from_runnable(move || tracing::info!(%name, "runnable ran"))
            .then_return(greeting)
    })
}

pub fn supplier(name: Option<&str>) -> Pipeline<String> {
    with_name("mono_from.supplier", name, |name| {
        Pipeline::from_supplier(move || {
            tracing::info!(%name, "supplier invoked");
            hello(&name)
        })
    })
}

/// Three concurrent workers for their effects, then a greeting.
pub fn future_concurrent(name: Option<&str>) -> Pipeline<String> {
    with_name("mono_from.future_concurrent", name, |name| {
        Pipeline::when([
            worker("Future 1", 500),
            worker("Future 2", 1500),
            worker("Future 3", 300),
        ])
        .then_pipeline(Pipeline::from_supplier(move || hello(&name)))
    })
}

/// Three concurrent workers whose results are joined in argument order.
pub fn future_concurrent_result(name: Option<&str>) -> Pipeline<String> {
    with_name("mono_from.future_concurrent_result", name, |_| {
        Pipeline::zip3(
            worker("Future 1", 500),
            worker("Future 2", 1500),
            worker("Future 3", 300),
        )
        .map(|(first, second, third)| format!("{first},   {second},   {third}"))
    })
}
