// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic, hierarchical cancellation token.
//!
//! Every pipeline run owns a token. Combinators derive a child token per child
//! run, so cancelling a subscription reaches every nested run, while a
//! combinator can cancel one losing child without touching its siblings.

use event_listener::{Event, EventListener};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Runtime-agnostic cancellation token.
///
/// Clones share the same cancellation state. A token created with
/// [`child_token`](Self::child_token) is cancelled when its parent is, but
/// cancelling the child leaves the parent untouched.
///
/// # Example
///
/// ```
/// use monoxide_core::CancellationToken;
///
/// let parent = CancellationToken::new();
/// let child = parent.child_token();
///
/// child.cancel();
/// assert!(!parent.is_cancelled());
///
/// let other_child = parent.child_token();
/// parent.cancel();
/// assert!(other_child.is_cancelled());
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    event: Event,
    parent: Option<CancellationToken>,
}

impl CancellationToken {
    /// Create a new root token. The token is initially not cancelled.
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    fn with_parent(parent: Option<CancellationToken>) -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                event: Event::new(),
                parent,
            }),
        }
    }

    /// Create a token that is cancelled whenever this one is.
    pub fn child_token(&self) -> Self {
        Self::with_parent(Some(self.clone()))
    }

    /// Cancel the token, waking all listeners. Idempotent.
    pub fn cancel(&self) {
        // Flag before notify, so woken waiters observe it
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.event.notify(usize::MAX);
    }

    /// Check if this token or any ancestor has been cancelled (non-blocking).
    pub fn is_cancelled(&self) -> bool {
        let mut current = Some(self);
        while let Some(token) = current {
            if token.inner.cancelled.load(Ordering::Acquire) {
                return true;
            }
            current = token.inner.parent.as_ref();
        }
        false
    }

    /// Wait asynchronously until this token or any ancestor is cancelled.
    ///
    /// If the token is already cancelled, this returns immediately.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            token: self,
            listener: None,
            parent: None,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`CancellationToken::cancelled()`].
pub struct Cancelled<'a> {
    token: &'a CancellationToken,
    listener: Option<EventListener>,
    parent: Option<Pin<Box<Cancelled<'a>>>>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = &mut *self;

        if this.token.is_cancelled() {
            return Poll::Ready(());
        }

        if this.listener.is_none() {
            this.listener = Some(this.token.inner.event.listen());
            this.parent = this
                .token
                .inner
                .parent
                .as_ref()
                .map(|parent| Box::pin(parent.cancelled()));

            // cancel() may have run between the first check and listen()
            if this.token.is_cancelled() {
                return Poll::Ready(());
            }
        }

        if let Some(listener) = this.listener.as_mut() {
            if Pin::new(listener).poll(cx).is_ready() {
                return Poll::Ready(());
            }
        }

        if let Some(parent) = this.parent.as_mut() {
            if parent.as_mut().poll(cx).is_ready() {
                return Poll::Ready(());
            }
        }

        Poll::Pending
    }
}
