// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::{PipelineError, Signal};
use monoxide_pipeline::Pipeline;
use monoxide_runtime::TokioScheduler;
use monoxide_showcase::{respond, serve, status, Response};
use monoxide_test_utils::TestError;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("not today"))
    }
}

#[test]
fn test_string_values_are_sent_raw() {
    assert_eq!(
        respond(Signal::Value("hello".to_owned())),
        Response::new(status::OK, "hello".to_owned())
    );
}

#[test]
fn test_other_values_are_sent_as_json() {
    let map = BTreeMap::from([("a", 1), ("b", 2)]);

    assert_eq!(respond(Signal::Value(map)).body.as_deref(), Some(r#"{"a":1,"b":2}"#));
    assert_eq!(respond(Signal::Value(7_u32)).body.as_deref(), Some("7"));
}

#[test]
fn test_empty_is_no_content() {
    assert_eq!(respond(Signal::<String>::Empty), Response::new(status::NO_CONTENT, None));
}

#[test]
fn test_error_statuses() {
    let status_of = |error: PipelineError| respond(Signal::<String>::Error(error)).status;

    assert_eq!(status_of(PipelineError::invalid_argument("bad")), status::BAD_REQUEST);
    assert_eq!(status_of(PipelineError::NoSuchElement), status::NOT_FOUND);
    assert_eq!(status_of(PipelineError::timeout(Duration::from_secs(1))), status::GATEWAY_TIMEOUT);
    assert_eq!(status_of(TestError::boom("db down")), status::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_error_body_is_the_message() {
    let response = respond(Signal::<String>::Error(PipelineError::NoSuchElement));

    assert_eq!(
        response.body.as_deref(),
        Some("No such element: source completed empty")
    );
}

#[test]
fn test_cancelled_is_client_closed_request() {
    assert_eq!(respond(Signal::<String>::Cancelled).status, status::CLIENT_CLOSED_REQUEST);
}

#[test]
fn test_serialization_failure_is_internal_error() {
    assert_eq!(respond(Signal::Value(Unserializable)).status, status::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_callable_raising_invalid_argument_is_bad_request() {
    let pipeline = Pipeline::<String>::from_callable(|| {
        Err(PipelineError::invalid_argument("name must not be blank"))
    });

    let response = serve(&pipeline, &TokioScheduler::current()).await;

    assert_eq!(response.status, status::BAD_REQUEST);
}
