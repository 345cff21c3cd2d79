// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `/zip/*`

use super::{with_name, worker};
use monoxide_pipeline::Pipeline;
use std::convert::Infallible;
use std::time::Duration;

fn named_worker(label: &'static str, name: &str, millis: u64) -> Pipeline<String> {
    let value = format!("{label} {name}");
    worker(label, millis).map(move |_| value.clone())
}

pub fn tuple2(name: Option<&str>) -> Pipeline<String> {
    with_name("zip.tuple2", name, |_| {
        Pipeline::zip(Pipeline::just("Pipeline::just".to_owned()), worker("Future 2", 1500))
            .map(|(first, second)| format!("{first}, {second}"))
    })
}

/// One source per constructor, joined line by line in argument order.
pub fn all_constructors(name: Option<&str>) -> Pipeline<String> {
    with_name("zip.all_constructors", name, |_| {
        Pipeline::zip_all([
            Pipeline::just("1 just".to_owned()),
            worker("2 from_future", 1500),
            Pipeline::defer(|| Pipeline::just("3 defer".to_owned())),
            Pipeline::from_optional(Some("4 from_optional".to_owned())),
            Pipeline::from_future(|| async { Ok::<_, Infallible>("5 from_future".to_owned()) }),
            Pipeline::create(|sink| {
                sink.success("6 create".to_owned());
            }),
            Pipeline::from_supplier(|| "7 from_supplier".to_owned()),
            Pipeline::from_callable(|| Ok::<_, Infallible>("8 from_callable".to_owned()))
                .delay_subscription(Duration::from_secs(1)),
        ])
        .map(|values| values.join("\n"))
    })
}

pub fn tuples(name: Option<&str>) -> Pipeline<String> {
    with_name("zip.tuples", name, |_| {
        Pipeline::zip_all([
            Pipeline::just("1 just".to_owned()),
            Pipeline::just("2 just".to_owned()),
        ])
        .map(|values| values.join("\n"))
    })
}

/// Twenty sources from an iterator.
pub fn tuples2(name: Option<&str>) -> Pipeline<String> {
    with_name("zip.tuples2", name, |_| {
        Pipeline::zip_all((0..20).map(|i| Pipeline::just(format!("just{i}"))))
            .map(|values| values.join("\n"))
    })
}

/// Both sides run concurrently: ~1.5s, not 2s.
pub fn with(name: Option<&str>) -> Pipeline<String> {
    with_name("zip.with", name, |name| {
        let second = {
            let name = name.clone();
            Pipeline::defer(move || named_worker("fromFuture2", &name, 500))
        };
        named_worker("fromFuture1", &name, 1500)
            .zip_with(second)
            .map(|(first, second)| format!("{first},   {second}"))
    })
}

pub fn with_combinator(name: Option<&str>) -> Pipeline<String> {
    let combine = |(first, second): (String, String)| format!("{first},   {second}");
    with_name("zip.with_combinator", name, |name| {
        named_worker("fromFuture1", &name, 0)
            .zip_with(named_worker("fromFuture2", &name, 500))
            .map(combine)
    })
}

/// The second side starts only after the first yields: ~2s.
pub fn when(name: Option<&str>) -> Pipeline<String> {
    with_name("zip.when", name, |name| {
        let second = named_worker("fromFuture2", &name, 1500);
        named_worker("fromFuture1", &name, 500)
            .zip_when(move |_| second.clone())
            .map(|(first, second)| format!("{first},   {second}"))
    })
}
