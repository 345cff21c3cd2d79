// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::Debug;
use std::future::Future;
use std::time::{Duration, Instant};

/// Runtime-specific timer used by a [`Scheduler`](crate::Scheduler).
pub trait Timer: Clone + Send + Sync + Debug + 'static {
    type Sleep: Future<Output = ()> + Send + 'static;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep;

    fn now(&self) -> Instant;
}
