//! Remote status parsing.
//!
//! The hosted API reports job status as a free-form string. It is parsed
//! exactly once, at the API boundary, into a closed enum so the rest of
//! the crate never compares status strings.

/// Status reported by the remote generation service for a polled task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStatus {
    /// Generation finished and a result URL should be present.
    Succeeded,
    /// Generation failed on the server side.
    Failed,
    /// Generation is still running.
    InProgress,
    /// A status string outside the known contract.
    ///
    /// Unknown statuses are tolerated for a bounded number of consecutive
    /// polls before the job is failed (see the poll loop).
    Unknown(String),
}

impl RemoteStatus {
    /// Parses a wire status string.
    ///
    /// The known values are exactly those the service emits today; any
    /// other string becomes [`RemoteStatus::Unknown`] rather than being
    /// silently assumed in-progress.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "SUCCEEDED" | "completed" => Self::Succeeded,
            "FAILED" | "failed" => Self::Failed,
            "PROCESSING" | "PENDING" | "generating" => Self::InProgress,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Unknown(raw) => write!(f, "unknown({})", raw),
        }
    }
}
