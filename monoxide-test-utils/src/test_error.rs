// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use monoxide_core::{IntoPipelineError, PipelineError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestError {
    #[error("boom: {0}")]
    Boom(String),
    #[error("flaky attempt {0}")]
    Flaky(usize),
}

impl TestError {
    /// A [`TestError::Boom`] already wrapped as an upstream pipeline error.
    pub fn boom(message: impl Into<String>) -> PipelineError {
        Self::Boom(message.into()).into_pipeline_error()
    }
}
