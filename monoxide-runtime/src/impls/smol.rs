// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Scheduler, SchedulerRef, Timer};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default)]
pub struct SmolTimer;

pub struct SmolSleep {
    timer: async_io::Timer,
}

impl Future for SmolSleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.timer).poll(cx).map(|_| ())
    }
}

impl Timer for SmolTimer {
    type Sleep = SmolSleep;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        SmolSleep {
            timer: async_io::Timer::after(duration),
        }
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Scheduler that spawns onto smol's global executor.
#[derive(Clone, Debug, Default)]
pub struct SmolScheduler {
    timer: SmolTimer,
}

impl SmolScheduler {
    pub fn shared() -> SchedulerRef {
        Arc::new(Self::default())
    }
}

impl Scheduler for SmolScheduler {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        smol::spawn(task).detach();
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        self.timer.sleep_future(duration).boxed()
    }

    fn now(&self) -> Instant {
        self.timer.now()
    }

    fn name(&self) -> &'static str {
        "smol"
    }
}
