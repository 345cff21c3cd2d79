// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::channel::oneshot;
use monoxide_core::{CancellationToken, PipelineError, Signal};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Emitter handed to the producer of [`Pipeline::create`](crate::Pipeline::create).
///
/// Only the first emission counts; later calls are ignored and report `false`.
/// Clones share the same slot. If every clone is dropped before anything is
/// emitted, the run fails with [`PipelineError::SinkDropped`].
pub struct Sink<T> {
    slot: Arc<Mutex<Option<oneshot::Sender<Signal<T>>>>>,
    token: CancellationToken,
}

impl<T> Clone for Sink<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            token: self.token.clone(),
        }
    }
}

impl<T> fmt::Debug for Sink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("emitted", &self.slot.lock().is_none())
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}

impl<T> Sink<T> {
    pub(crate) fn new(sender: oneshot::Sender<Signal<T>>, token: CancellationToken) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(sender))),
            token,
        }
    }

    fn emit(&self, signal: Signal<T>) -> bool {
        let Some(sender) = self.slot.lock().take() else {
            return false;
        };
        sender.send(signal).is_ok()
    }

    /// Complete with a value.
    pub fn success(&self, value: T) -> bool {
        self.emit(Signal::Value(value))
    }

    /// Complete without a value.
    pub fn success_empty(&self) -> bool {
        self.emit(Signal::Empty)
    }

    pub fn error(&self, error: PipelineError) -> bool {
        self.emit(Signal::Error(error))
    }

    /// Whether the subscriber has gone away. Producers may poll this to stop
    /// early.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
