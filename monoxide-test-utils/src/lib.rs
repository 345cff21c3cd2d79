// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the Monoxide pipeline crates.
//!
//! Intended for `dev-dependencies` only.
//!
//! # Key Types
//!
//! - [`Probe`] counts how often a pipeline is subscribed and cancelled, which
//!   is how laziness, caching and cancellation propagation are asserted.
//! - [`Counter`] is a shared atomic counter for side effects in callbacks.
//! - [`TestError`] is a concrete error type for upstream failures.
//!
//! ```rust
//! use monoxide_pipeline::Pipeline;
//! use monoxide_test_utils::Probe;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let probe = Probe::new();
//! let pipeline = probe.instrument(Pipeline::just(1));
//! assert_eq!(probe.subscriptions(), 0);
//!
//! let scheduler = monoxide_test_utils::scheduler();
//! pipeline.run(&scheduler).await;
//! pipeline.run(&scheduler).await;
//! assert_eq!(probe.subscriptions(), 2);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod probe;
pub mod test_error;

pub use helpers::{assert_no_recv, init_tracing, recv_timeout, scheduler};
pub use probe::{flaky, Counter, Probe};
pub use test_error::TestError;
