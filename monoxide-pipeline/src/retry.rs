// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Retry policies for [`Pipeline::retry_when`](crate::Pipeline::retry_when).
//!
//! A policy sees every failure together with the number of retries already
//! made and answers with a [`RetryDecision`]. Stopping always surfaces the
//! error that triggered the decision.

use monoxide_core::PipelineError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// One failed attempt, as seen by a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct Failure {
    /// The error the attempt ended with.
    pub error: PipelineError,
    /// Retries made before this failure; `0` for the first attempt.
    pub attempt: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Resubscribe after the given delay.
    RetryAfter(Duration),
    /// Give up and propagate the failure.
    Stop,
}

/// Decides whether a failed run is retried.
pub trait RetryPolicy: Send + Sync + 'static {
    fn decide(&self, failure: &Failure) -> RetryDecision;
}

impl<F> RetryPolicy for F
where
    F: Fn(&Failure) -> RetryDecision + Send + Sync + 'static,
{
    fn decide(&self, failure: &Failure) -> RetryDecision {
        self(failure)
    }
}

/// Exponential backoff with a retry limit.
///
/// Defaults: 3 retries, 100ms initial delay, multiplier 2.0, 30s cap, every
/// error retried.
///
/// ```
/// use monoxide_pipeline::Backoff;
/// use std::time::Duration;
///
/// let policy = Backoff::new()
///     .with_max_retries(5)
///     .with_initial_delay(Duration::from_millis(10))
///     .retry_if(|error| error.is_recoverable());
///
/// assert_eq!(policy.delay_for(0), Duration::from_millis(10));
/// assert_eq!(policy.delay_for(2), Duration::from_millis(40));
/// ```
#[derive(Clone)]
pub struct Backoff {
    max_retries: usize,
    initial_delay: Duration,
    multiplier: f64,
    max_delay: Duration,
    predicate: Option<Arc<dyn Fn(&PipelineError) -> bool + Send + Sync>>,
}

impl Backoff {
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            multiplier: 2.0,
            max_delay: Duration::from_secs(30),
            predicate: None,
        }
    }

    /// Constant delay between retries.
    #[must_use]
    pub fn fixed(delay: Duration, max_retries: usize) -> Self {
        Self::new()
            .with_max_retries(max_retries)
            .with_initial_delay(delay)
            .with_max_delay(delay)
            .with_multiplier(1.0)
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Growth factor between consecutive delays, clamped to at least 1.0.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier.max(1.0);
        self
    }

    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Only retry errors matching `predicate`; others stop immediately.
    #[must_use]
    pub fn retry_if<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&PipelineError) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Delay before retry number `attempt + 1`.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let nanos = self.initial_delay.as_nanos() as f64 * self.multiplier.powi(exponent);
        let capped = nanos.min(self.max_delay.as_nanos() as f64);
        Duration::from_nanos(capped as u64)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Backoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backoff")
            .field("max_retries", &self.max_retries)
            .field("initial_delay", &self.initial_delay)
            .field("multiplier", &self.multiplier)
            .field("max_delay", &self.max_delay)
            .field("filtered", &self.predicate.is_some())
            .finish()
    }
}

impl RetryPolicy for Backoff {
    fn decide(&self, failure: &Failure) -> RetryDecision {
        if failure.attempt >= self.max_retries {
            return RetryDecision::Stop;
        }
        if let Some(predicate) = &self.predicate {
            if !predicate(&failure.error) {
                return RetryDecision::Stop;
            }
        }
        RetryDecision::RetryAfter(self.delay_for(failure.attempt))
    }
}
