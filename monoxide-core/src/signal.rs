// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::PipelineError;

/// The terminal outcome of one pipeline run.
///
/// A subscription transitions through at most one signal. `Empty` is a
/// successful completion without a value; `Cancelled` means the run was
/// abandoned before it produced anything.
///
/// # Equality
///
/// `Error` signals never compare equal, not even to their own clone, because
/// [`PipelineError`] wraps opaque user errors. Compare errors with the
/// `PipelineError::is_*` predicates instead:
///
/// ```
/// use monoxide_core::{PipelineError, Signal};
///
/// let error = Signal::<i32>::Error(PipelineError::NoSuchElement);
///
/// assert_ne!(error, error.clone());
/// assert!(error.unwrap_error().is_no_such_element());
/// ```
#[derive(Debug, Clone)]
pub enum Signal<T> {
    /// Completed with a value
    Value(T),
    /// Completed without a value
    Empty,
    /// Failed
    Error(PipelineError),
    /// Abandoned by cancellation
    Cancelled,
}

impl<T: PartialEq> PartialEq for Signal<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Signal::Value(a), Signal::Value(b)) => a == b,
            (Signal::Empty, Signal::Empty) | (Signal::Cancelled, Signal::Cancelled) => true,
            _ => false, // Errors are never equal
        }
    }
}

impl<T> Signal<T> {
    /// Returns `true` if this is a `Value`.
    pub const fn is_value(&self) -> bool {
        matches!(self, Signal::Value(_))
    }

    /// Returns `true` if this is `Empty`.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Signal::Empty)
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, Signal::Error(_))
    }

    /// Returns `true` if this is `Cancelled`.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Signal::Cancelled)
    }

    /// Converts to `Option<T>`, discarding every non-value signal.
    pub fn value(self) -> Option<T> {
        match self {
            Signal::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Converts to `Option<PipelineError>`, discarding every non-error signal.
    pub fn error(self) -> Option<PipelineError> {
        match self {
            Signal::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Maps a `Signal<T>` to `Signal<U>` by applying a function to the value.
    ///
    /// Other signals are propagated unchanged.
    pub fn map<U, F>(self, f: F) -> Signal<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Signal::Value(v) => Signal::Value(f(v)),
            Signal::Empty => Signal::Empty,
            Signal::Error(e) => Signal::Error(e),
            Signal::Cancelled => Signal::Cancelled,
        }
    }

    /// Chains a signal-producing function onto a value.
    ///
    /// Other signals are propagated unchanged.
    pub fn and_then<U, F>(self, f: F) -> Signal<U>
    where
        F: FnOnce(T) -> Signal<U>,
    {
        match self {
            Signal::Value(v) => f(v),
            Signal::Empty => Signal::Empty,
            Signal::Error(e) => Signal::Error(e),
            Signal::Cancelled => Signal::Cancelled,
        }
    }

    /// Re-types a non-value signal.
    ///
    /// Returns `Err(value)` if this is a `Value`, so callers can branch on the
    /// value without repeating the pass-through arms.
    pub fn into_non_value<U>(self) -> Result<Signal<U>, T> {
        match self {
            Signal::Value(v) => Err(v),
            Signal::Empty => Ok(Signal::Empty),
            Signal::Error(e) => Ok(Signal::Error(e)),
            Signal::Cancelled => Ok(Signal::Cancelled),
        }
    }

    /// Converts into a `Result` over an optional value.
    ///
    /// `Cancelled` becomes `Err(PipelineError::Cancelled)`.
    ///
    /// # Errors
    /// Returns the carried error for `Error` and `Cancelled` signals.
    pub fn into_result(self) -> crate::Result<Option<T>> {
        match self {
            Signal::Value(v) => Ok(Some(v)),
            Signal::Empty => Ok(None),
            Signal::Error(e) => Err(e),
            Signal::Cancelled => Err(PipelineError::Cancelled),
        }
    }

    /// Returns the contained value, panicking otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the signal is not a `Value`.
    pub fn unwrap(self) -> T {
        match self {
            Signal::Value(v) => v,
            Signal::Empty => panic!("called `Signal::unwrap()` on an `Empty` signal"),
            Signal::Error(e) => {
                panic!("called `Signal::unwrap()` on an `Error` signal: {e:?}")
            }
            Signal::Cancelled => panic!("called `Signal::unwrap()` on a `Cancelled` signal"),
        }
    }

    /// Returns the contained error, panicking otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the signal is not an `Error`.
    pub fn unwrap_error(self) -> PipelineError {
        match self {
            Signal::Error(e) => e,
            _ => panic!("called `Signal::unwrap_error()` on a non-error signal"),
        }
    }
}

impl<T> From<crate::Result<Option<T>>> for Signal<T> {
    fn from(result: crate::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(v)) => Signal::Value(v),
            Ok(None) => Signal::Empty,
            Err(PipelineError::Cancelled) => Signal::Cancelled,
            Err(e) => Signal::Error(e),
        }
    }
}
