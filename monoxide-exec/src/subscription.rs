// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::CancellationToken;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const RUNNING: u8 = 0;
const CANCELLED: u8 = 1;
const FINISHED: u8 = 2;

/// Handle to one running subscription.
///
/// Dropping the handle leaves the run alone; call [`cancel`](Self::cancel) to
/// stop it. A cancelled subscription reports `on_cancel` to its subscriber and
/// never a value or an error.
#[derive(Clone, Debug)]
pub struct Subscription {
    token: CancellationToken,
    state: Arc<AtomicU8>,
}

impl Subscription {
    pub(crate) fn new(token: CancellationToken) -> Self {
        Self {
            token,
            state: Arc::new(AtomicU8::new(RUNNING)),
        }
    }

    /// Cancel the run. Has no effect once the run has settled.
    pub fn cancel(&self) {
        if self
            .state
            .compare_exchange(RUNNING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.token.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::Acquire) == CANCELLED
    }

    /// Whether the run settled with its own signal.
    pub fn is_finished(&self) -> bool {
        self.state.load(Ordering::Acquire) == FINISHED
    }

    /// Settle the run. Returns `false` if it was cancelled first.
    pub(crate) fn finish(&self) -> bool {
        self.state
            .compare_exchange(RUNNING, FINISHED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
