// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! One handler per operator, grouped the way the endpoints are grouped.
//!
//! Every handler takes the optional `name` query parameter and returns an
//! unsubscribed [`Pipeline`](monoxide_pipeline::Pipeline). [`serve`] runs it on
//! a scheduler and maps the terminal signal to a [`Response`]:
//!
//! | Signal | Status |
//! |---|---|
//! | `Value` | 200 |
//! | `Empty` | 204 |
//! | `Error(InvalidArgument)` | 400 |
//! | `Error(NoSuchElement)` | 404 |
//! | `Cancelled` | 499 |
//! | `Error(Timeout)` | 504 |
//! | any other error | 500 |
//!
//! ```
//! use monoxide_runtime::TokioScheduler;
//! use monoxide_showcase::{handlers, serve};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let response = serve(&handlers::simple::mono(Some("world")), &TokioScheduler::current()).await;
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body.as_deref(), Some("hello world"));
//! # }
//! ```

pub mod handlers;
pub mod response;

pub use response::{respond, serve, status, Response};
