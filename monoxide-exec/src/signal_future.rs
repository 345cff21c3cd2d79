// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::subscription::Subscription;
use futures::channel::oneshot;
use monoxide_core::Signal;
use pin_project::{pin_project, pinned_drop};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future resolving to the terminal signal of a spawned subscription.
///
/// Unlike a bare [`Subscription`], dropping a `SignalFuture` before it resolved
/// cancels the run.
#[pin_project(PinnedDrop)]
#[derive(Debug)]
pub struct SignalFuture<T> {
    #[pin]
    receiver: oneshot::Receiver<Signal<T>>,
    subscription: Subscription,
    resolved: bool,
}

impl<T> SignalFuture<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<Signal<T>>, subscription: Subscription) -> Self {
        Self {
            receiver,
            subscription,
            resolved: false,
        }
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<T> Future for SignalFuture<T> {
    type Output = Signal<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.receiver.poll(cx) {
            Poll::Ready(result) => {
                *this.resolved = true;
                // A dropped sender means the run was torn down before delivering
                Poll::Ready(result.unwrap_or(Signal::Cancelled))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[pinned_drop]
impl<T> PinnedDrop for SignalFuture<T> {
    fn drop(self: Pin<&mut Self>) {
        let this = self.project();
        if !*this.resolved {
            this.subscription.cancel();
        }
    }
}
