//! API Error Types
//!
//! Failures talking to the backend. Transport failures, HTTP error statuses
//! and malformed bodies are kept apart so callers never confuse a network
//! problem with a project that does not exist.

use thiserror::Error;

/// Errors returned by [`SourceApi`](super::SourceApi) implementations
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend could not be reached
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not the JSON we expected
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a reqwest failure the way the rest of the crate reports it
    pub(crate) fn from_transport(error: reqwest::Error, base_url: &str) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else if error.is_connect() {
            ApiError::Unavailable(base_url.to_string())
        } else if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Request(error)
        }
    }

    /// HTTP status of the failure, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
