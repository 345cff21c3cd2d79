// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::{PipelineError, PipelineItem, Signal};
use monoxide_exec::SubscribeExt;
use monoxide_pipeline::Pipeline;
use monoxide_runtime::SchedulerRef;
use serde::Serialize;

pub mod status {
    pub const OK: u16 = 200;
    pub const NO_CONTENT: u16 = 204;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    /// Non-standard: the client went away before the response was ready.
    pub const CLIENT_CLOSED_REQUEST: u16 = 499;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
    pub const GATEWAY_TIMEOUT: u16 = 504;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Option<String>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Option<String>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    fn from_error(error: &PipelineError) -> Self {
        let status = match error {
            PipelineError::InvalidArgument { .. } => status::BAD_REQUEST,
            PipelineError::NoSuchElement => status::NOT_FOUND,
            PipelineError::Timeout { .. } => status::GATEWAY_TIMEOUT,
            PipelineError::Cancelled => status::CLIENT_CLOSED_REQUEST,
            _ => status::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}

/// Map a terminal signal to a response.
///
/// String values are sent as they are, other values as JSON.
pub fn respond<T: Serialize>(signal: Signal<T>) -> Response {
    match signal {
        Signal::Value(value) => match serde_json::to_value(&value) {
            Ok(serde_json::Value::String(text)) => Response::new(status::OK, text),
            Ok(json) => Response::new(status::OK, json.to_string()),
            Err(error) => {
                tracing::error!(%error, "response body serialization failed");
                Response::new(status::INTERNAL_SERVER_ERROR, error.to_string())
            }
        },
        Signal::Empty => Response::new(status::NO_CONTENT, None),
        Signal::Error(error) => Response::from_error(&error),
        Signal::Cancelled => Response::new(status::CLIENT_CLOSED_REQUEST, None),
    }
}

/// Subscribe to `pipeline` on `scheduler` and map its signal to a response.
///
/// Dropping the returned future (a client disconnecting) cancels the run.
pub async fn serve<T>(pipeline: &Pipeline<T>, scheduler: &SchedulerRef) -> Response
where
    T: PipelineItem + Serialize,
{
    let response = respond(pipeline.to_future(scheduler).await);
    tracing::info!(status = response.status, pipeline = pipeline.kind(), "served");
    response
}
