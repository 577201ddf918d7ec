//! Inference client error types.

use i2v_models::FaultKind;
use thiserror::Error;

pub type InferenceResult<T> = Result<T, InferenceError>;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request rejected ({status}): {body}")]
    Client { status: u16, body: String },

    #[error("Service error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Inference job {response_id} failed: {message}")]
    JobFailed {
        response_id: String,
        message: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base64 output: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl InferenceError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Map a non-success HTTP status to the matching error.
    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        if status >= 500 {
            Self::Server { status, body }
        } else {
            Self::Client { status, body }
        }
    }

    /// Category shown to the user for this error.
    pub fn fault_kind(&self) -> FaultKind {
        match self {
            InferenceError::Config(_) | InferenceError::Client { .. } => FaultKind::Client,
            InferenceError::Server { .. } | InferenceError::JobFailed { .. } => FaultKind::Server,
            InferenceError::InvalidResponse(_)
            | InferenceError::Network(_)
            | InferenceError::Json(_)
            | InferenceError::Base64(_) => FaultKind::Unexpected,
        }
    }
}
