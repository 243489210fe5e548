use crate::domain::offer::{err, ErrorEnvelope};
use axum::http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Failure of a call across a service boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("invalid endpoint url {0}")]
    InvalidUrl(String),

    #[error("outbound http client is closed")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Ats,
    Resp,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Ats => f.write_str("ATS"),
            ModelKind::Resp => f.write_str("RESP"),
        }
    }
}

/// Fatal outcomes of one pass through the offer pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid transaction: {0}")]
    Validation(String),

    #[error("feature computation needs at least one transaction")]
    EmptyHistory,

    #[error("fetching member history failed: {0}")]
    HistoryFetch(#[source] ClientError),

    #[error("{model} prediction failed: {source}")]
    Prediction {
        model: ModelKind,
        #[source]
        source: ClientError,
    },

    #[error("writing request metrics failed: {0}")]
    Metrics(#[source] anyhow::Error),
}

impl PipelineError {
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "INVALID_TRANSACTION",
            PipelineError::EmptyHistory => "EMPTY_HISTORY",
            PipelineError::HistoryFetch(_) => "MEMBER_HISTORY_UNAVAILABLE",
            PipelineError::Prediction { .. } => "PREDICTION_FAILED",
            PipelineError::Metrics(_) => "METRICS_WRITE_FAILED",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
            PipelineError::HistoryFetch(_) | PipelineError::Prediction { .. } => StatusCode::BAD_GATEWAY,
            PipelineError::EmptyHistory | PipelineError::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        err(self.code(), &self.to_string())
    }
}
