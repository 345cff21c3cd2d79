// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Deferred single-value pipelines.
//!
//! A [`Pipeline<T>`] is an inert description of how to produce zero or one
//! value of type `T`. Operators wrap the description in a new node; nothing
//! runs until a subscriber evaluates it with a [`Context`], which carries the
//! scheduler and the cancellation token for that one run.
//!
//! ```
//! use monoxide_core::Signal;
//! use monoxide_pipeline::Pipeline;
//! use monoxide_runtime::TokioScheduler;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let greeting = Pipeline::from_optional(None::<String>)
//!     .default_if_empty("stranger".to_string())
//!     .map(|name| format!("hello {name}"));
//!
//! let signal = greeting.run(&TokioScheduler::current()).await;
//! assert_eq!(signal, Signal::Value("hello stranger".to_string()));
//! # }
//! ```
//!
//! # Operator families
//!
//! - construction: `just`, `from_value`, `from_optional`, `defer`, `empty`,
//!   `never`, `error`, `from_supplier`, `from_callable`, `from_runnable`,
//!   `from_future`, `create`, `timer`, `using`, `hot`
//! - transformation: `map`, `try_map`, `filter`, `filter_async`, `flat_map`,
//!   `transform`, `transform_deferred`, `do_on_value`, `do_on_cancel`, `log`
//! - combination: `and`, `then*`, `when`, `zip*`, `first_of*`, `or`,
//!   `concat_*`, `merge_*`, `delay_until`, `switch_if_empty`,
//!   `default_if_empty`, `single`
//! - timing and retry: `delay`, `delay_subscription`, `timeout`, `retry`,
//!   `retry_when`
//! - sharing: `cache`
//! - recovery: `on_error_map`, `on_error_resume*`, `on_error_return*`

mod cache;
mod combine;
mod construct;
mod context;
mod guard;
mod interpreter;
mod pipeline;
mod recover;
mod retry;
mod sink;
mod stage;
mod timing;
mod transform;
mod using;

pub use context::Context;
pub use pipeline::Pipeline;
pub use retry::{Backoff, Failure, RetryDecision, RetryPolicy};
pub use sink::Sink;
