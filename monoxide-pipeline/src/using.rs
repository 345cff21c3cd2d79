// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::context::Context;
use crate::guard::{guarded, run_quietly};
use crate::pipeline::Pipeline;
use crate::stage::Stage;
use futures::future::BoxFuture;
use futures::FutureExt;
use monoxide_core::{PipelineItem, Result, Signal};
use std::sync::Arc;

type Acquire<R> = Arc<dyn Fn() -> Result<R> + Send + Sync>;
type Body<R, T> = Arc<dyn Fn(&R) -> Pipeline<T> + Send + Sync>;
type Release<R> = Arc<dyn Fn(R) + Send + Sync>;

/// Owns an acquired resource and releases it exactly once, on drop.
struct ReleaseGuard<R> {
    resource: Option<R>,
    release: Release<R>,
}

impl<R> Drop for ReleaseGuard<R> {
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            let release = Arc::clone(&self.release);
            run_quietly("using.release", move || release(resource));
        }
    }
}

struct UsingStage<R, T> {
    acquire: Acquire<R>,
    body: Body<R, T>,
    release: Release<R>,
}

impl<R, T> Stage<T> for UsingStage<R, T>
where
    R: Send + 'static,
    T: PipelineItem,
{
    fn evaluate(&self, ctx: Context) -> BoxFuture<'static, Signal<T>> {
        let acquire = Arc::clone(&self.acquire);
        let body = Arc::clone(&self.body);
        let release = Arc::clone(&self.release);
        async move {
            let resource = match guarded(|| acquire()).and_then(|result| result) {
                Ok(resource) => resource,
                Err(error) => return Signal::Error(error),
            };
            let built = guarded(|| body(&resource));
            let guard = ReleaseGuard {
                resource: Some(resource),
                release,
            };
            let pipeline = match built {
                Ok(pipeline) => pipeline,
                Err(error) => return Signal::Error(error),
            };
            let signal = pipeline.evaluate(ctx).await;
            drop(guard);
            signal
        }
        .boxed()
    }

    fn kind(&self) -> &'static str {
        "using"
    }
}

impl<T: PipelineItem> Pipeline<T> {
    /// Scope a resource to each subscription.
    ///
    /// `acquire` runs on subscription, `body` builds the pipeline that uses
    /// the resource, and `release` runs exactly once after the terminal signal,
    /// including when the run is cancelled or `body` fails.
    pub fn using<R, A, B, F>(acquire: A, body: B, release: F) -> Pipeline<T>
    where
        R: Send + 'static,
        A: Fn() -> Result<R> + Send + Sync + 'static,
        B: Fn(&R) -> Pipeline<T> + Send + Sync + 'static,
        F: Fn(R) + Send + Sync + 'static,
    {
        Pipeline::from_stage(UsingStage {
            acquire: Arc::new(acquire),
            body: Arc::new(body),
            release: Arc::new(release),
        })
    }
}
