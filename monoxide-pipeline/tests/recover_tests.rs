// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::{PipelineError, Signal};
use monoxide_pipeline::Pipeline;
use monoxide_test_utils::{scheduler, Counter, TestError};

#[tokio::test]
async fn test_on_error_map_rewrites_error() {
    let signal = Pipeline::<i32>::error(TestError::boom("raw"))
        .on_error_map(|_| PipelineError::invalid_argument("mapped"))
        .run(&scheduler())
        .await;

    assert!(signal.unwrap_error().is_invalid_argument());
}

#[tokio::test]
async fn test_on_error_resume_switches_to_fallback() {
    let signal = Pipeline::error(TestError::boom("primary"))
        .on_error_resume(|error| Pipeline::just(format!("recovered from {error}")))
        .run(&scheduler())
        .await;

    assert_eq!(
        signal,
        Signal::Value("recovered from Upstream error: boom: primary".to_string())
    );
}

#[tokio::test]
async fn test_on_error_resume_if_leaves_other_errors() {
    let signal = Pipeline::<i32>::error(PipelineError::invalid_argument("bad"))
        .on_error_resume_if(PipelineError::is_timeout, |_| Pipeline::just(0))
        .run(&scheduler())
        .await;

    assert!(signal.unwrap_error().is_invalid_argument());
}

#[tokio::test]
async fn test_on_error_return() {
    let scheduler = scheduler();

    let recovered = Pipeline::error(TestError::boom("x"))
        .on_error_return("fallback")
        .run(&scheduler)
        .await;
    let filtered = Pipeline::error(TestError::boom("x"))
        .on_error_return_if(PipelineError::is_no_such_element, "fallback")
        .run(&scheduler)
        .await;

    assert_eq!(recovered, Signal::Value("fallback"));
    assert!(filtered.is_error());
}

#[tokio::test]
async fn test_recovery_ignores_values_and_empty() {
    // Arrange
    let fired = Counter::new();
    let recover = {
        let fired = fired.clone();
        move |_: PipelineError| {
            fired.incr();
            Pipeline::just(-1)
        }
    };

    // Act
    let value = Pipeline::just(1).on_error_resume(recover.clone()).run(&scheduler()).await;
    let empty = Pipeline::empty().on_error_resume(recover).run(&scheduler()).await;

    // Assert
    assert_eq!(value, Signal::Value(1));
    assert_eq!(empty, Signal::Empty);
    assert_eq!(fired.get(), 0);
}
