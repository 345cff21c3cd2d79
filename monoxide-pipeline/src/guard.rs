// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::{PipelineError, Result, Signal};
use pin_project::{pin_project, pinned_drop};
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

pub(crate) type Hook = Arc<dyn Fn() + Send + Sync>;

/// Run a user callback, turning a panic into an upstream error.
pub(crate) fn guarded<R>(f: impl FnOnce() -> R) -> Result<R> {
    catch_unwind(AssertUnwindSafe(f)).map_err(PipelineError::from_panic)
}

/// Run a user callback from a context that must not unwind (drop glue).
pub(crate) fn run_quietly(label: &'static str, f: impl FnOnce()) {
    if let Err(error) = guarded(f) {
        tracing::error!(hook = label, %error, "hook panicked");
    }
}

/// Future wrapper that fires `hook` when the wrapped run is cancelled.
///
/// Cancellation is either the run resolving to `Signal::Cancelled`, or the
/// wrapper being dropped while the run is still pending.
#[pin_project(PinnedDrop)]
pub(crate) struct CancelHook<F> {
    #[pin]
    inner: F,
    hook: Option<Hook>,
}

impl<F> CancelHook<F> {
    pub(crate) fn new(inner: F, hook: Hook) -> Self {
        Self {
            inner,
            hook: Some(hook),
        }
    }
}

impl<F, T> Future for CancelHook<F>
where
    F: Future<Output = Signal<T>>,
{
    type Output = Signal<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.inner.poll(cx) {
            Poll::Ready(signal) => {
                let hook = this.hook.take();
                if signal.is_cancelled() {
                    if let Some(hook) = hook {
                        run_quietly("do_on_cancel", || hook());
                    }
                }
                Poll::Ready(signal)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[pinned_drop]
impl<F> PinnedDrop for CancelHook<F> {
    fn drop(self: Pin<&mut Self>) {
        if let Some(hook) = self.project().hook.take() {
            run_quietly("do_on_cancel", || hook());
        }
    }
}
