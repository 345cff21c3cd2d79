// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `/then/*`: the first step always runs, its value is always dropped.

use super::{hello, with_name};
use monoxide_pipeline::Pipeline;
use std::time::Duration;

fn greet(name: &str) -> Pipeline<String> {
    Pipeline::just(hello(name)).do_on_value(|greeting| tracing::info!(%greeting, "then step"))
}

pub fn then(name: Option<&str>) -> Pipeline<()> {
    with_name("then.then", name, |name| greet(&name).then())
}

pub fn then_pipeline(name: Option<&str>) -> Pipeline<String> {
    with_name("then.then_pipeline", name, |name| {
        let next = format!("你好{name}");
        greet(&name).then_pipeline(Pipeline::defer(move || Pipeline::just(next.clone())))
    })
}

pub fn then_return(name: Option<&str>) -> Pipeline<String> {
    with_name("then.then_return", name, |name| {
        greet(&name).then_return(format!("你好{name}"))
    })
}

pub fn then_many(name: Option<&str>) -> Pipeline<Vec<u32>> {
    with_name("then.then_many", name, |name| {
        let code_points: Vec<u32> = name.chars().map(u32::from).collect();
        greet(&name).then_pipeline(Pipeline::defer(move || Pipeline::just(code_points.clone())))
    })
}

/// Ten one-second ticks for their effect only: 204 after ~10s.
pub fn then_empty(name: Option<&str>) -> Pipeline<()> {
    with_name("then.then_empty", name, |name| {
        let ticks = Pipeline::defer(|| {
            Pipeline::concat_values((0..10).map(|tick| {
                Pipeline::just(tick)
                    .delay(Duration::from_secs(1))
                    .do_on_value(|tick| tracing::debug!(tick, "tick"))
            }))
            .then()
        });
        greet(&name).then_pipeline(ticks)
    })
}
