//! Handle to an in-flight video generation.

use super::state::{GenerationState, StatePublisher};
use crate::job::JobId;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Handle to a submitted video generation.
///
/// Cloneable; all clones refer to the same attempt. The handle observes
/// the generator's single state slot: if a newer generation supersedes
/// this one, [`wait`](Self::wait) resolves when the slot next goes idle,
/// and the snapshot's job id tells the two apart.
#[derive(Debug, Clone)]
pub struct VideoJobHandle {
    job_id: JobId,
    state_rx: watch::Receiver<GenerationState>,
    token: CancellationToken,
    publisher: Arc<StatePublisher>,
}

impl VideoJobHandle {
    pub(crate) fn new(
        job_id: JobId,
        state_rx: watch::Receiver<GenerationState>,
        token: CancellationToken,
        publisher: Arc<StatePublisher>,
    ) -> Self {
        Self {
            job_id,
            state_rx,
            token,
            publisher,
        }
    }

    /// Returns the client-generated job ID of this attempt.
    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Returns the latest state snapshot without waiting.
    pub fn state(&self) -> GenerationState {
        self.state_rx.borrow().clone()
    }

    /// Returns a fresh observer of the generation state.
    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.state_rx.clone()
    }

    /// Cancels this attempt.
    ///
    /// Aborts any in-flight request, resets progress/flags, and marks a
    /// non-terminal job cancelled. A no-op if the attempt was already
    /// cancelled or superseded by a newer generation.
    pub fn cancel(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        self.publisher.cancelled();
    }

    /// Waits until the generation slot goes idle and returns the final
    /// snapshot.
    pub async fn wait(&mut self) -> GenerationState {
        loop {
            let state = self.state_rx.borrow_and_update().clone();
            if !state.is_generating {
                return state;
            }
            if self.state_rx.changed().await.is_err() {
                return self.state_rx.borrow().clone();
            }
        }
    }
}
