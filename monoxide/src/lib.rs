// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Monoxide
//!
//! Deferred, single-value async pipelines.
//!
//! ## Overview
//!
//! A [`Pipeline<T>`] describes a computation that ends in exactly one
//! [`Signal`]: a value, empty completion, an error, or cancellation. Nothing
//! runs while a pipeline is assembled. Every subscription starts a fresh,
//! independent run, except downstream of [`Pipeline::cache`].
//!
//! Runs are driven by a [`Scheduler`]. Cancelling a [`Subscription`] reaches
//! every nested run through a tree of [`CancellationToken`]s, and combinators
//! such as `zip` or `first_of` cancel the runs they no longer need.
//!
//! ## Quick Start
//!
//! ```rust
//! use monoxide::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let scheduler = TokioScheduler::current();
//!
//!     let greeting = Pipeline::just("world")
//!         .delay(Duration::from_millis(10))
//!         .map(|name| format!("hello {name}"))
//!         .timeout(Duration::from_secs(1));
//!
//!     let signal = greeting.to_future(&scheduler).await;
//!     assert_eq!(signal, Signal::Value("hello world".to_string()));
//! }
//! ```

// Re-export core types
pub use monoxide_core::{
    CancellationToken, IntoPipelineError, PipelineError, PipelineItem, Result, ResultExt, Signal,
};

// Re-export the pipeline and its policies
pub use monoxide_pipeline::{Backoff, Context, Failure, Pipeline, RetryDecision, RetryPolicy, Sink};

// Re-export execution
pub use monoxide_exec::{FnSubscriber, SignalFuture, SubscribeExt, Subscriber, Subscription};

// Re-export schedulers
pub use monoxide_runtime::{Scheduler, SchedulerRef};

#[cfg(feature = "runtime-tokio")]
pub use monoxide_runtime::TokioScheduler;

#[cfg(feature = "runtime-smol")]
pub use monoxide_runtime::SmolScheduler;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Pipeline, PipelineError, SchedulerRef, Signal, SubscribeExt, Subscriber};

    #[cfg(feature = "runtime-tokio")]
    pub use crate::TokioScheduler;
}
