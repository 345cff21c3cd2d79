// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::pipeline::{Node, Pipeline};
use crate::retry::RetryPolicy;
use monoxide_core::PipelineItem;
use std::sync::Arc;
use std::time::Duration;

impl<T: PipelineItem> Pipeline<T> {
    /// Deliver the upstream signal `duration` after it arrived.
    ///
    /// Values, empty completions and errors are all held back; cancellation
    /// is not.
    pub fn delay(&self, duration: Duration) -> Pipeline<T> {
        Pipeline::from_node(Node::Delay {
            upstream: self.clone(),
            duration,
        })
    }

    /// Wait `duration` before subscribing upstream.
    pub fn delay_subscription(&self, duration: Duration) -> Pipeline<T> {
        Pipeline::from_node(Node::DelaySubscription {
            upstream: self.clone(),
            duration,
        })
    }

    /// Fail with [`Timeout`](monoxide_core::PipelineError::Timeout) unless a
    /// signal arrives within `duration` of subscription. The upstream run is
    /// cancelled when the deadline passes.
    pub fn timeout(&self, duration: Duration) -> Pipeline<T> {
        Pipeline::from_node(Node::Timeout {
            upstream: self.clone(),
            duration,
        })
    }

    /// Resubscribe on error, at most `max_retries` more times.
    ///
    /// The last error is surfaced once retries run out.
    pub fn retry(&self, max_retries: usize) -> Pipeline<T> {
        Pipeline::from_node(Node::Retry {
            upstream: self.clone(),
            max_retries,
        })
    }

    /// Resubscribe on error as long as `policy` says so.
    ///
    /// When the policy stops, the error that was just observed is propagated.
    pub fn retry_when(&self, policy: impl RetryPolicy) -> Pipeline<T> {
        Pipeline::from_node(Node::RetryWhen {
            upstream: self.clone(),
            policy: Arc::new(policy),
        })
    }
}
