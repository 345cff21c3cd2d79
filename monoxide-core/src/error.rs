// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for Monoxide pipelines
//!
//! Every failure a pipeline can report travels as `Signal::Error(PipelineError)`.
//! The enum is `Clone` because a cached pipeline hands the same terminal signal
//! to every subscriber; user errors are therefore held behind an `Arc`.
//!
//! # Examples
//!
//! ```
//! use monoxide_core::{PipelineError, Result};
//!
//! fn parse_port(raw: &str) -> Result<u16> {
//!     raw.parse()
//!         .map_err(|_| PipelineError::invalid_argument(format!("not a port: {raw}")))
//! }
//!
//! assert!(parse_port("http").unwrap_err().is_invalid_argument());
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

/// Root error type for all pipeline operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    /// A construction input was malformed, e.g. an absent value passed to
    /// `Pipeline::from_value`.
    #[error("Invalid argument: {context}")]
    InvalidArgument {
        /// What was wrong with the input
        context: String,
    },

    /// No signal arrived before the deadline of a `timeout` operator.
    #[error("Timeout error: no signal within {duration:?}")]
    Timeout {
        /// The deadline that was exceeded
        duration: Duration,
    },

    /// The run was cancelled by its subscriber or by a sibling.
    #[error("Cancelled")]
    Cancelled,

    /// A fault raised while producing a value (user callback, future, panic).
    #[error("Upstream error: {0}")]
    Upstream(#[source] Arc<dyn StdError + Send + Sync>),

    /// `single()` demanded exactly one value but the source was empty.
    #[error("No such element: source completed empty")]
    NoSuchElement,

    /// A `create` sink was dropped without emitting any signal.
    #[error("Sink dropped without emitting a signal")]
    SinkDropped,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);

impl PipelineError {
    /// Create an invalid-argument error with the given context
    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: context.into(),
        }
    }

    /// Create a timeout error for the exceeded deadline
    pub const fn timeout(duration: Duration) -> Self {
        Self::Timeout { duration }
    }

    /// Wrap a user error
    ///
    /// A `PipelineError` passed in is returned unchanged so its kind survives.
    pub fn upstream(error: impl StdError + Send + Sync + 'static) -> Self {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(error);
        match boxed.downcast::<Self>() {
            Ok(own) => *own,
            Err(foreign) => Self::Upstream(Arc::from(foreign)),
        }
    }

    /// Create an upstream error from a plain message
    pub fn upstream_message(message: impl Into<String>) -> Self {
        Self::Upstream(Arc::new(Message(message.into())))
    }

    /// Convert a panic payload caught from a user callback into an upstream error.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "opaque panic payload".to_string()
        };
        Self::upstream_message(format!("callback panicked: {message}"))
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    #[must_use]
    pub const fn is_no_such_element(&self) -> bool {
        matches!(self, Self::NoSuchElement)
    }

    /// Check if this error indicates a transient failure worth retrying.
    ///
    /// Timeouts and upstream faults may succeed on a fresh subscription;
    /// malformed input, cancellation and an empty `single()` never will.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Upstream(_))
    }

    /// Returns the wrapped user error if this is an `Upstream` error.
    pub fn upstream_source(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Self::Upstream(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

/// Specialized Result type for pipeline operations
///
/// # Examples
///
/// ```
/// use monoxide_core::Result;
///
/// fn greet(name: &str) -> Result<String> {
///     Ok(format!("hello {name}"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Extension trait for converting errors into `PipelineError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoPipelineError {
    /// Convert this error into an `Upstream` pipeline error
    fn into_pipeline_error(self) -> PipelineError;
}

impl<E: StdError + Send + Sync + 'static> IntoPipelineError for E {
    fn into_pipeline_error(self) -> PipelineError {
        PipelineError::upstream(self)
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an upstream error
    ///
    /// # Errors
    /// Returns `Err(PipelineError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an upstream error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(PipelineError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PipelineError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.with_context(|| context.into())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            PipelineError::Upstream(inner) => {
                PipelineError::upstream_message(format!("{}: {inner}", f()))
            }
            other => other,
        })
    }
}
