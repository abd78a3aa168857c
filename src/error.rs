//! Crate-wide error taxonomy.
//!
//! Cancellation is deliberately not represented here: a cancelled
//! generation is a job status, not an error, and is suppressed from all
//! error-reporting paths.

use thiserror::Error;

/// Errors surfaced by hub operations.
#[derive(Debug, Error)]
pub enum HubError {
    /// Input rejected before any network call was made.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A local file could not be converted to a transportable form.
    #[error("Failed to encode image input: {0}")]
    Encoding(String),

    /// Network or HTTP-level failure. Always retryable by the caller.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server reported that generation itself failed.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Persisting a generated artifact failed. Always retryable.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl HubError {
    /// Returns true if the operation can be retried by the user as-is.
    ///
    /// Validation and encoding errors require changed input; transport and
    /// storage errors do not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Storage(_))
    }
}
