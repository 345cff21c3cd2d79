// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scheduler abstraction for Monoxide pipelines.
//!
//! Pipelines never own an executor. A [`Scheduler`] is handed to every
//! subscription and provides the three facilities a run needs: spawning work
//! on a worker distinct from the caller, delayed execution, and a clock.
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - [`TokioScheduler`]
//! - `runtime-smol` - [`SmolScheduler`]

pub mod impls;
pub mod scheduler;
pub mod timer;

pub use scheduler::{Scheduler, SchedulerRef};
pub use timer::Timer;

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::{TokioScheduler, TokioTimer};

#[cfg(feature = "runtime-smol")]
pub use impls::smol::{SmolScheduler, SmolTimer};
