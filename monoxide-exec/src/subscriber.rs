// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::{PipelineError, Signal};
use std::fmt;

/// Receives the terminal signal of one subscription.
///
/// Every callback consumes the subscriber, so at most one of them runs.
pub trait Subscriber<T>: Send + Sized + 'static {
    fn on_value(self, value: T);

    fn on_empty(self);

    fn on_error(self, error: PipelineError);

    /// The subscription was cancelled before the run produced a signal.
    fn on_cancel(self) {
        tracing::trace!("subscription cancelled");
    }

    /// Dispatch `signal` to the matching callback.
    fn deliver(self, signal: Signal<T>) {
        match signal {
            Signal::Value(value) => self.on_value(value),
            Signal::Empty => self.on_empty(),
            Signal::Error(error) => self.on_error(error),
            Signal::Cancelled => self.on_cancel(),
        }
    }
}

/// A [`Subscriber`] built from one closure taking the whole signal.
pub struct FnSubscriber<F> {
    f: F,
}

impl<F> FnSubscriber<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnSubscriber<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSubscriber")
    }
}

impl<T, F> Subscriber<T> for FnSubscriber<F>
where
    F: FnOnce(Signal<T>) + Send + 'static,
{
    fn on_value(self, value: T) {
        (self.f)(Signal::Value(value));
    }

    fn on_empty(self) {
        (self.f)(Signal::Empty);
    }

    fn on_error(self, error: PipelineError) {
        (self.f)(Signal::Error(error));
    }

    fn on_cancel(self) {
        (self.f)(Signal::Cancelled);
    }
}
