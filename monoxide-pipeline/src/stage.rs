// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::context::Context;
use futures::future::BoxFuture;
use monoxide_core::Signal;

/// A type-erased pipeline node.
///
/// Operators whose output type differs from their input type, or which own
/// more than one upstream of different types, implement `Stage` so that
/// [`Node`](crate::pipeline::Node) stays generic over a single `T`.
pub(crate) trait Stage<T>: Send + Sync {
    fn evaluate(&self, ctx: Context) -> BoxFuture<'static, Signal<T>>;

    fn kind(&self) -> &'static str;
}

/// Re-type a signal that is known not to carry a value.
pub(crate) fn retype<T, U>(signal: Signal<T>) -> Signal<U> {
    signal.into_non_value().unwrap_or(Signal::Empty)
}
