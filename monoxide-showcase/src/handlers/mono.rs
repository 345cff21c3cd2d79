// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `/mono/*`: one handler per pipeline operator.

use super::{announce, hello, logged, with_name, worker, LI_SI, ZHANG_SAN};
use monoxide_core::{IntoPipelineError, ResultExt, Signal};
use monoxide_exec::SubscribeExt;
use monoxide_pipeline::Pipeline;
use monoxide_runtime::SchedulerRef;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::time::Duration;

const APPLICATION_YAML: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/application.yaml");
const NEW_WAY: &str = "这是新的编程方式";

fn delayed_name(name: Option<&str>, delay: Duration) -> Pipeline<String> {
    let name = name.map(str::to_owned);
    Pipeline::defer(move || {
        Pipeline::timer(delay).then_pipeline(Pipeline::from_optional(name.clone()))
    })
}

/// Run both steps, drop their values, then answer.
pub fn and(name: Option<&str>) -> Pipeline<String> {
    with_name("mono.and", name, |name| {
        logged(format!("1 hello {name}"))
            .and(logged(format!("2 hello {name}")))
            .then_return(format!("3 hello {name}"))
    })
}

/// Wait for three concurrent workers, then answer.
pub fn when(name: Option<&str>) -> Pipeline<String> {
    with_name("mono.when", name, |name| {
        Pipeline::when([
            worker("Future 1", 500),
            worker("Future 2", 1500),
            worker("Future 3", 300),
        ])
        .then_return(format!("3 hello {name}"))
    })
}

pub fn just_or_empty(name: Option<&str>) -> Pipeline<String> {
    announce("mono.just_or_empty", name);
    Pipeline::from_optional(name.map(str::to_owned)).default_if_empty(ZHANG_SAN.to_owned())
}

pub fn switch_if_empty(name: Option<&str>) -> Pipeline<String> {
    announce("mono.switch_if_empty", name);
    Pipeline::from_optional(name.map(str::to_owned))
        .switch_if_empty(Pipeline::defer(|| Pipeline::just(ZHANG_SAN.to_owned())))
}

/// Read the bundled configuration file, closing it once the read is done.
pub fn using(name: Option<&str>) -> Pipeline<String> {
    announce("mono.using", name);
    Pipeline::using(
        || {
            File::open(APPLICATION_YAML)
                .map_err(IntoPipelineError::into_pipeline_error)
                .context("opening application.yaml")
        },
        |file: &File| match BufReader::new(file).lines().collect::<io::Result<Vec<_>>>() {
            Ok(lines) => Pipeline::just(lines.join("\n")),
            Err(error) => Pipeline::error(error.into_pipeline_error()),
        },
        |file: File| {
            drop(file);
            tracing::info!("application.yaml closed");
        },
    )
}

pub fn empty(name: Option<&str>) -> Pipeline<String> {
    announce("mono.empty", name);
    Pipeline::empty()
}

/// Never answers; the request hangs until the client gives up.
pub fn never(name: Option<&str>) -> Pipeline<String> {
    announce("mono.never", name);
    Pipeline::never()
}

pub fn create(name: Option<&str>) -> Pipeline<String> {
    announce("mono.create", name);
    let greeting = hello(name.unwrap_or_default());
    Pipeline::create(move |sink| {
        sink.success(greeting.clone());
    })
}

pub fn delay(name: Option<&str>) -> Pipeline<String> {
    announce("mono.delay", name);
    let greeting = hello(name.unwrap_or_default());
    Pipeline::timer(Duration::from_secs(2)).map(move |_| greeting.clone())
}

/// Run five steps for their effects only.
pub fn ignore_elements(name: Option<&str>) -> Pipeline<String> {
    announce("mono.ignore_elements", name);
    Pipeline::concat_values((1..=5).map(Pipeline::just))
        .then_return(hello(name.unwrap_or_default()))
}

/// Answers after 2s but is only given 1s, so this always times out.
pub fn timeout(name: Option<&str>) -> Pipeline<String> {
    announce("mono.timeout", name);
    let greeting = hello(name.unwrap_or_default());
    Pipeline::defer(move || {
        let greeting = greeting.clone();
        Pipeline::timer(Duration::from_secs(2)).map(move |_| greeting.clone())
    })
    .timeout(Duration::from_secs(1))
}

/// Fails with `NoSuchElement` when no name is given.
pub fn single(name: Option<&str>) -> Pipeline<String> {
    announce("mono.single", name);
    Pipeline::from_optional(name.map(str::to_owned)).single()
}

/// Greets only [`LI_SI`], deciding through a nested pipeline.
pub fn filter_when(name: Option<&str>) -> Pipeline<String> {
    announce("mono.filter_when", name);
    Pipeline::from_optional(name.map(str::to_owned))
        .filter_async(|candidate| Pipeline::just(candidate == LI_SI))
        .map(|name| hello(&name))
}

/// The 1s fallback beats the 2s lookup of `name`.
pub fn or(name: Option<&str>) -> Pipeline<String> {
    announce("mono.or", name);
    let fallback = Pipeline::defer(|| {
        Pipeline::timer(Duration::from_secs(1)).then_return(LI_SI.to_owned())
    });
    delayed_name(name, Duration::from_secs(2))
        .or(fallback)
        .map(|name| hello(&name))
}

/// Values in completion order, so `name` (2s late) comes last.
pub fn merge_with(name: Option<&str>) -> Pipeline<Vec<String>> {
    announce("mono.merge_with", name);
    Pipeline::merge_values([
        Pipeline::just("hello ".to_owned()),
        delayed_name(name, Duration::from_secs(2)),
        Pipeline::defer(|| Pipeline::just(NEW_WAY.to_owned())),
    ])
}

/// Values in subscription order, whatever their timing.
pub fn concat_with(name: Option<&str>) -> Pipeline<Vec<String>> {
    announce("mono.concat_with", name);
    Pipeline::concat_values([
        Pipeline::just("hello ".to_owned()),
        delayed_name(name, Duration::from_secs(2)),
        Pipeline::defer(|| Pipeline::just(NEW_WAY.to_owned())),
    ])
}

pub fn log(name: Option<&str>) -> Pipeline<String> {
    announce("mono.log", name);
    Pipeline::from_optional(name.map(str::to_owned)).log("showcase.mono.log")
}

pub fn delay_element(name: Option<&str>) -> Pipeline<String> {
    let name = name.map(str::to_owned);
    Pipeline::defer(move || {
        announce("mono.delay_element", name.as_deref());
        Pipeline::just(hello(name.as_deref().unwrap_or_default()))
    })
    .delay(Duration::from_secs(3))
}

/// A 5s value held back by a 3s trigger started after it: 8s in total.
pub fn delay_until(name: Option<&str>) -> Pipeline<String> {
    let name = name.map(str::to_owned);
    Pipeline::defer(move || {
        tracing::info!(name = ?name, "1 value subscribed");
        Pipeline::just(hello(name.as_deref().unwrap_or_default())).delay(Duration::from_secs(5))
    })
    .delay_until(|greeting| {
        tracing::info!(%greeting, "2 trigger subscribed");
        Pipeline::just(1).delay(Duration::from_secs(3))
    })
}

fn shout_at_zhang_san(upstream: Pipeline<String>) -> Pipeline<String> {
    tracing::info!("1 chain applied");
    upstream
        .filter(|name| name == ZHANG_SAN)
        .map(|name| hello(&name))
        .map(|greeting| greeting.to_uppercase())
}

/// The chain is applied while assembling: `1 chain applied` logs first.
pub fn transform(name: Option<&str>) -> Pipeline<String> {
    with_name("mono.transform", name, |name| {
        Pipeline::just(name).transform(shout_at_zhang_san)
    })
}

/// The chain is applied per subscription: `assembled` logs first.
pub fn transform_deferred(name: Option<&str>) -> Pipeline<String> {
    with_name("mono.transform_deferred", name, |name| {
        Pipeline::just(name).transform_deferred(shout_at_zhang_san)
    })
}

/// Subscribe a cached chain twice in the background. The steps run once.
pub fn cache(name: Option<&str>, scheduler: &SchedulerRef) -> Pipeline<String> {
    with_name("mono.cache", name, |name| {
        let cached = Pipeline::just(name.clone())
            .filter(|name| {
                tracing::info!(%name, "1 filter");
                name == ZHANG_SAN
            })
            .map(|name| {
                tracing::info!(%name, "2 greet");
                hello(&name)
            })
            .delay(Duration::from_secs(3))
            .map(|greeting| {
                tracing::info!(%greeting, "3 shout");
                greeting.to_uppercase()
            })
            .cache();

        for subscriber in 1..=2 {
            cached.subscribe_fn(scheduler, move |signal| {
                if let Signal::Value(greeting) = signal {
                    tracing::info!(subscriber, %greeting, "cached value");
                }
            });
        }

        Pipeline::just(name)
    })
}
