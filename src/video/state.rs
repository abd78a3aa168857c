//! Observable generation state.
//!
//! The [`StatePublisher`] is the single writer of [`GenerationState`]
//! snapshots; observers hold `watch::Receiver`s and always see the latest
//! snapshot. Every mutation happens inside the watch channel's lock, with
//! the attempt's cancellation token checked inside the closure, so a
//! cancelled poll task can never write over a newer attempt's state.

use crate::job::GenerationJob;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Snapshot of the current generation flow, as consumed by observers.
#[derive(Debug, Clone, Default)]
pub struct GenerationState {
    /// True from submission start until a terminal transition.
    pub is_generating: bool,
    /// Last reported progress, 0–100.
    pub progress: u8,
    /// Failure message, set on submit or generation failure.
    pub error: Option<String>,
    /// The current job record, present once submission has returned a
    /// task identifier.
    pub job: Option<GenerationJob>,
}

/// Publishes state snapshots for one generation slot.
///
/// Terminal transitions are one-shot: after `complete` or `fail` has
/// fired, further terminal calls are no-ops, so `is_generating` becomes
/// false exactly once per attempt.
#[derive(Debug)]
pub(crate) struct StatePublisher {
    tx: watch::Sender<GenerationState>,
}

impl StatePublisher {
    /// Creates a publisher with an idle initial state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(GenerationState::default());
        Self { tx }
    }

    /// Returns a new observer of this slot.
    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.tx.subscribe()
    }

    /// Returns the latest snapshot.
    pub fn current(&self) -> GenerationState {
        self.tx.borrow().clone()
    }

    /// Resets the slot for a fresh attempt: generating, zero progress,
    /// no error, no job yet.
    pub fn begin(&self) {
        self.tx.send_modify(|s| {
            *s = GenerationState {
                is_generating: true,
                ..GenerationState::default()
            };
        });
    }

    /// Installs the job record once submission has returned a task id.
    ///
    /// No-op if the attempt was cancelled.
    pub fn job_created(&self, token: &CancellationToken, job: GenerationJob) -> bool {
        self.tx.send_if_modified(|s| {
            if token.is_cancelled() || !s.is_generating {
                return false;
            }
            s.job = Some(job.clone());
            true
        })
    }

    /// Publishes a progress update, clamped to [0, 100].
    ///
    /// No-op if the attempt was cancelled or already terminal.
    pub fn progress(&self, token: &CancellationToken, progress: u8) -> bool {
        self.tx.send_if_modified(|s| {
            if token.is_cancelled() || !s.is_generating {
                return false;
            }
            s.progress = progress.min(100);
            if let Some(job) = &mut s.job {
                job.set_progress(progress);
            }
            true
        })
    }

    /// Terminal success: job completed, progress forced to 100,
    /// `is_generating` cleared.
    pub fn complete(&self, token: &CancellationToken, result_url: &str) -> bool {
        self.tx.send_if_modified(|s| {
            if token.is_cancelled() || !s.is_generating {
                return false;
            }
            let Some(job) = &mut s.job else {
                return false;
            };
            if !job.complete(result_url) {
                return false;
            }
            s.progress = 100;
            s.is_generating = false;
            true
        })
    }

    /// Terminal failure: error recorded, job failed (when one exists),
    /// `is_generating` cleared.
    ///
    /// Also used for submission failures, where no job record exists yet.
    pub fn fail(&self, token: &CancellationToken, message: &str) -> bool {
        self.tx.send_if_modified(|s| {
            if token.is_cancelled() || !s.is_generating {
                return false;
            }
            if let Some(job) = &mut s.job {
                job.fail(message);
            }
            s.error = Some(message.to_string());
            s.is_generating = false;
            true
        })
    }

    /// Cancellation: resets UI-layer progress/flags and cancels a
    /// non-terminal job.
    ///
    /// Callers must cancel the attempt's token before invoking this, so
    /// in-flight publishes from the poll task are already fenced off.
    /// Safe to call repeatedly; an already-reset slot publishes nothing.
    pub fn cancelled(&self) -> bool {
        self.tx.send_if_modified(|s| {
            let mut changed = false;
            if s.is_generating {
                s.is_generating = false;
                changed = true;
            }
            if s.progress != 0 {
                s.progress = 0;
                changed = true;
            }
            if let Some(job) = &mut s.job {
                if job.cancel() {
                    changed = true;
                }
            }
            changed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{JobId, JobStatus};

    fn job() -> GenerationJob {
        GenerationJob::new(JobId::generate(), "t1")
    }

    #[test]
    fn test_begin_resets_slot() {
        let publisher = StatePublisher::new();
        let token = CancellationToken::new();
        publisher.begin();
        publisher.job_created(&token, job());
        publisher.fail(&token, "boom");

        publisher.begin();
        let state = publisher.current();
        assert!(state.is_generating);
        assert_eq!(state.progress, 0);
        assert!(state.error.is_none());
        assert!(state.job.is_none());
    }

    #[test]
    fn test_success_flow() {
        let publisher = StatePublisher::new();
        let token = CancellationToken::new();
        publisher.begin();
        assert!(publisher.job_created(&token, job()));
        assert!(publisher.progress(&token, 40));

        let state = publisher.current();
        assert!(state.is_generating);
        assert_eq!(state.progress, 40);

        assert!(publisher.complete(&token, "https://x/v1.mp4"));
        let state = publisher.current();
        assert!(!state.is_generating);
        assert_eq!(state.progress, 100);
        let job = state.job.unwrap();
        assert_eq!(job.status(), JobStatus::Completed);
        assert_eq!(job.result_url(), Some("https://x/v1.mp4"));
    }

    #[test]
    fn test_terminal_transition_fires_once() {
        let publisher = StatePublisher::new();
        let token = CancellationToken::new();
        publisher.begin();
        publisher.job_created(&token, job());

        assert!(publisher.complete(&token, "https://x/v1.mp4"));
        assert!(!publisher.fail(&token, "late"));
        assert!(!publisher.complete(&token, "https://x/v2.mp4"));
        assert!(!publisher.progress(&token, 10));

        let state = publisher.current();
        assert!(state.error.is_none());
        assert_eq!(state.job.unwrap().result_url(), Some("https://x/v1.mp4"));
    }

    #[test]
    fn test_fail_without_job_records_error() {
        let publisher = StatePublisher::new();
        let token = CancellationToken::new();
        publisher.begin();

        assert!(publisher.fail(&token, "rate limited"));
        let state = publisher.current();
        assert!(!state.is_generating);
        assert_eq!(state.error.as_deref(), Some("rate limited"));
        assert!(state.job.is_none());
    }

    #[test]
    fn test_cancelled_token_fences_publishes() {
        let publisher = StatePublisher::new();
        let token = CancellationToken::new();
        publisher.begin();
        publisher.job_created(&token, job());

        token.cancel();
        assert!(!publisher.progress(&token, 90));
        assert!(!publisher.complete(&token, "https://x/v1.mp4"));
        assert!(!publisher.fail(&token, "boom"));

        // Nothing observed the fenced writes.
        let state = publisher.current();
        assert_eq!(state.progress, 0);
        assert!(state.is_generating);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_cancelled_resets_flags_and_job() {
        let publisher = StatePublisher::new();
        let token = CancellationToken::new();
        publisher.begin();
        publisher.job_created(&token, job());
        publisher.progress(&token, 55);

        token.cancel();
        assert!(publisher.cancelled());

        let state = publisher.current();
        assert!(!state.is_generating);
        assert_eq!(state.progress, 0);
        assert_eq!(state.job.unwrap().status(), JobStatus::Cancelled);
    }

    #[test]
    fn test_cancelled_is_idempotent() {
        let publisher = StatePublisher::new();
        let token = CancellationToken::new();
        publisher.begin();
        publisher.job_created(&token, job());

        token.cancel();
        assert!(publisher.cancelled());
        assert!(!publisher.cancelled());
    }

    #[test]
    fn test_cancel_after_completion_resets_progress_only() {
        let publisher = StatePublisher::new();
        let token = CancellationToken::new();
        publisher.begin();
        publisher.job_created(&token, job());
        publisher.complete(&token, "https://x/v1.mp4");

        assert!(publisher.cancelled());
        let state = publisher.current();
        assert_eq!(state.progress, 0);
        // The record keeps its terminal state.
        let job = state.job.unwrap();
        assert_eq!(job.status(), JobStatus::Completed);
        assert_eq!(job.progress(), 100);
    }

    #[test]
    fn test_progress_clamped() {
        let publisher = StatePublisher::new();
        let token = CancellationToken::new();
        publisher.begin();
        publisher.progress(&token, 200);
        assert_eq!(publisher.current().progress, 100);
    }

    #[test]
    fn test_subscribers_see_updates() {
        let publisher = StatePublisher::new();
        let token = CancellationToken::new();
        let rx = publisher.subscribe();

        publisher.begin();
        publisher.job_created(&token, job());
        publisher.progress(&token, 10);

        assert_eq!(rx.borrow().progress, 10);
    }
}
