// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core types shared by every Monoxide crate.
//!
//! - [`Signal`] - the terminal outcome of one pipeline run
//! - [`PipelineError`] - the error taxonomy carried by `Signal::Error`
//! - [`CancellationToken`] - hierarchical, runtime-agnostic cooperative cancellation
//! - [`PipelineItem`] - the bound every value flowing through a pipeline satisfies

pub mod cancellation_token;
pub mod error;
pub mod pipeline_item;
pub mod signal;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::error::{IntoPipelineError, PipelineError, Result, ResultExt};
pub use self::pipeline_item::PipelineItem;
pub use self::signal::Signal;
