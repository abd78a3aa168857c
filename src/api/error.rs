//! API error types and tolerant error-body parsing.

use crate::error::HubError;
use serde::Deserialize;
use thiserror::Error;

/// Errors from the HTTP/API layer.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The request itself failed (connect, timeout, TLS, ...).
    #[error("Request failed: {0}")]
    Http(String),

    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Error body the service sends on failures, when it sends one at all.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Builds a `Status` error from a non-success response body.
    ///
    /// The service usually answers `{"error": "..."}`, but bodies may be
    /// non-JSON or empty; all three shapes produce a usable message.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) => {
                let text = String::from_utf8_lossy(body);
                let text = text.trim();
                if text.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    text.to_string()
                }
            }
        };
        Self::Status { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<ApiError> for HubError {
    fn from(e: ApiError) -> Self {
        HubError::Transport(e.to_string())
    }
}
