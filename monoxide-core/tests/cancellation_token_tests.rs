// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::FutureExt;
use monoxide_core::CancellationToken;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_new_token_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
}

#[test]
fn test_cancel_is_idempotent() {
    let token = CancellationToken::new();
    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn test_clone_shares_state() {
    let token1 = CancellationToken::new();
    let token2 = token1.clone();

    token2.cancel();

    assert!(token1.is_cancelled());
}

#[test]
fn test_parent_cancel_reaches_grandchildren() {
    let root = CancellationToken::new();
    let child = root.child_token();
    let grandchild = child.child_token();

    root.cancel();

    assert!(child.is_cancelled());
    assert!(grandchild.is_cancelled());
}

#[test]
fn test_child_cancel_leaves_parent_and_siblings() {
    let root = CancellationToken::new();
    let loser = root.child_token();
    let sibling = root.child_token();

    loser.cancel();

    assert!(loser.is_cancelled());
    assert!(!root.is_cancelled());
    assert!(!sibling.is_cancelled());
}

#[tokio::test]
async fn test_cancelled_resolves_immediately_if_already_cancelled() {
    let token = CancellationToken::new();
    token.cancel();

    assert!(token.cancelled().now_or_never().is_some());
}

#[tokio::test]
async fn test_cancelled_pending_until_cancel() {
    let token = CancellationToken::new();

    assert!(token.cancelled().now_or_never().is_none());
}

#[tokio::test]
async fn test_child_waiter_wakes_on_parent_cancel() -> anyhow::Result<()> {
    // Arrange
    let root = CancellationToken::new();
    let child = root.child_token();
    let woken = Arc::new(AtomicUsize::new(0));

    let handle = tokio::spawn({
        let woken = woken.clone();
        async move {
            child.cancelled().await;
            woken.fetch_add(1, Ordering::SeqCst);
        }
    });

    // Act
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(woken.load(Ordering::SeqCst), 0);
    root.cancel();

    // Assert
    tokio::time::timeout(Duration::from_secs(1), handle).await??;
    assert_eq!(woken.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_many_waiters_all_woken() -> anyhow::Result<()> {
    let token = CancellationToken::new();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let token = token.clone();
            tokio::spawn(async move { token.cancelled().await })
        })
        .collect();

    token.cancel();

    for handle in handles {
        tokio::time::timeout(Duration::from_secs(1), handle).await??;
    }

    Ok(())
}
