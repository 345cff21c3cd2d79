// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Running pipelines.
//!
//! [`SubscribeExt`] is the consumer side of a `Pipeline`: it spawns one run on
//! a scheduler and hands the terminal signal to a [`Subscriber`], awaits it
//! through a [`SignalFuture`], or blocks the calling thread until it arrives.

pub mod signal_future;
pub mod subscribe;
pub mod subscriber;
pub mod subscription;

pub use signal_future::SignalFuture;
pub use subscribe::SubscribeExt;
pub use subscriber::{FnSubscriber, Subscriber};
pub use subscription::Subscription;
