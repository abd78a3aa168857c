//! Job identifiers, status, and the job record itself.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique job IDs.
static JOB_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Client-generated unique identifier for a generation job.
///
/// IDs are unique within a process lifetime and are used for correlating
/// log messages with state snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Creates a new unique job ID.
    pub fn generate() -> Self {
        Self(format!("job-{}", JOB_ID_COUNTER.fetch_add(1, Ordering::Relaxed)))
    }

    /// Creates a job ID from an existing string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a generation job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JobStatus {
    /// Submitted and being produced by the remote service.
    #[default]
    Generating,
    /// Finished successfully; the result URL is available.
    Completed,
    /// The remote service reported a failure.
    Failed,
    /// Torn down before completion, either explicitly or on disposal.
    Cancelled,
}

impl JobStatus {
    /// Returns true if this is a terminal state (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generating => write!(f, "generating"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One in-flight or completed generation request.
///
/// Fields are private so the record can uphold its invariants:
/// `result_url` is set if and only if the job completed, `error_message`
/// is set if and only if it failed, and no field changes once a terminal
/// status is reached (transition methods on a terminal job are no-ops
/// that return `false`).
#[derive(Debug, Clone)]
pub struct GenerationJob {
    id: JobId,
    external_task_id: String,
    status: JobStatus,
    progress: u8,
    result_url: Option<String>,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
}

impl GenerationJob {
    /// Creates a new job in the `Generating` state with zero progress.
    ///
    /// Called when the submission request returns a server-assigned task
    /// identifier.
    pub fn new(id: JobId, external_task_id: impl Into<String>) -> Self {
        Self {
            id,
            external_task_id: external_task_id.into(),
            status: JobStatus::Generating,
            progress: 0,
            result_url: None,
            error_message: None,
            created_at: Utc::now(),
        }
    }

    /// Returns the client-generated job ID.
    pub fn id(&self) -> &JobId {
        &self.id
    }

    /// Returns the server-assigned task identifier.
    pub fn external_task_id(&self) -> &str {
        &self.external_task_id
    }

    /// Returns the current status.
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the last reported progress (0–100).
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Returns the result URL. Set if and only if the job completed.
    pub fn result_url(&self) -> Option<&str> {
        self.result_url.as_deref()
    }

    /// Returns the failure message. Set if and only if the job failed.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns when the job record was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Updates progress, clamped to [0, 100].
    ///
    /// Ignored once the job is terminal. Returns whether the update was
    /// applied.
    pub fn set_progress(&mut self, progress: u8) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.progress = progress.min(100);
        true
    }

    /// Transitions to `Completed`, recording the result URL and forcing
    /// progress to exactly 100.
    ///
    /// Returns `false` (and changes nothing) if the job is already
    /// terminal.
    pub fn complete(&mut self, result_url: impl Into<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = JobStatus::Completed;
        self.progress = 100;
        self.result_url = Some(result_url.into());
        true
    }

    /// Transitions to `Failed`, recording the failure message.
    ///
    /// Returns `false` (and changes nothing) if the job is already
    /// terminal.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = JobStatus::Failed;
        self.error_message = Some(message.into());
        true
    }

    /// Transitions to `Cancelled`.
    ///
    /// Cancelling an already-terminal job is a no-op on the record and
    /// returns `false`.
    pub fn cancel(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = JobStatus::Cancelled;
        true
    }
}
