// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::{PipelineError, Signal};
use monoxide_exec::{SubscribeExt, Subscriber};
use monoxide_pipeline::Pipeline;
use monoxide_test_utils::{assert_no_recv, recv_timeout, scheduler, Probe, TestError};
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

#[derive(Debug, PartialEq)]
enum Event {
    Value(String),
    Empty,
    Error(String),
    Cancel,
}

struct Recorder {
    events: UnboundedSender<Event>,
}

impl Subscriber<String> for Recorder {
    fn on_value(self, value: String) {
        let _ = self.events.send(Event::Value(value));
    }

    fn on_empty(self) {
        let _ = self.events.send(Event::Empty);
    }

    fn on_error(self, error: PipelineError) {
        let _ = self.events.send(Event::Error(error.to_string()));
    }

    fn on_cancel(self) {
        let _ = self.events.send(Event::Cancel);
    }
}

#[tokio::test]
async fn test_subscribe_returns_before_the_run_completes() {
    // Arrange
    let (tx, mut rx) = unbounded_channel();
    let pipeline = Pipeline::just("hello".to_string()).delay(Duration::from_millis(50));

    // Act
    let subscription = pipeline.subscribe(&scheduler(), Recorder { events: tx });

    // Assert
    assert!(!subscription.is_finished());
    assert_eq!(
        recv_timeout(&mut rx, 1000).await,
        Event::Value("hello".to_string())
    );
    assert!(subscription.is_finished());
}

#[tokio::test]
async fn test_subscriber_receives_empty_and_error() {
    let (tx, mut rx) = unbounded_channel();
    let scheduler = scheduler();

    Pipeline::<String>::empty().subscribe(&scheduler, Recorder { events: tx.clone() });
    assert_eq!(recv_timeout(&mut rx, 1000).await, Event::Empty);

    Pipeline::<String>::error(TestError::boom("subscriber"))
        .subscribe(&scheduler, Recorder { events: tx });
    assert_eq!(
        recv_timeout(&mut rx, 1000).await,
        Event::Error("Upstream error: boom: subscriber".to_string())
    );
}

#[tokio::test]
async fn test_cancelled_subscription_delivers_only_on_cancel() {
    // Arrange
    let (tx, mut rx) = unbounded_channel();
    let probe = Probe::new();
    let pipeline =
        probe.instrument(Pipeline::just("late".to_string()).delay(Duration::from_millis(200)));
    let subscription = pipeline.subscribe(&scheduler(), Recorder { events: tx });
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Act
    subscription.cancel();

    // Assert
    assert_eq!(recv_timeout(&mut rx, 1000).await, Event::Cancel);
    assert_no_recv(&mut rx, 300).await;
    assert!(subscription.is_cancelled());
    assert_eq!(probe.cancellations(), 1);
}

#[tokio::test]
async fn test_cancel_after_completion_is_a_no_op() {
    let (tx, mut rx) = unbounded_channel();
    let subscription =
        Pipeline::just("done".to_string()).subscribe(&scheduler(), Recorder { events: tx });

    assert_eq!(
        recv_timeout(&mut rx, 1000).await,
        Event::Value("done".to_string())
    );
    subscription.cancel();

    assert!(subscription.is_finished());
    assert!(!subscription.is_cancelled());
}

#[tokio::test]
async fn test_dropping_subscription_does_not_cancel() {
    let (tx, mut rx) = unbounded_channel();

    drop(
        Pipeline::just(1)
            .delay(Duration::from_millis(20))
            .subscribe_fn(&scheduler(), move |signal| {
                let _ = tx.send(signal);
            }),
    );

    assert_eq!(recv_timeout(&mut rx, 1000).await, Signal::Value(1));
}

#[tokio::test]
async fn test_panicking_subscriber_does_not_take_down_the_runtime() {
    let (tx, mut rx) = unbounded_channel();
    let scheduler = scheduler();

    Pipeline::just(1).subscribe_fn(&scheduler, |_| panic!("subscriber exploded"));
    Pipeline::just(2).subscribe_fn(&scheduler, move |signal| {
        let _ = tx.send(signal);
    });

    assert_eq!(recv_timeout(&mut rx, 1000).await, Signal::Value(2));
}
