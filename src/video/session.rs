//! Poll session bookkeeping.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The cancellation token and task handle of one generation attempt.
///
/// At most one session exists per generator. Tearing a session down
/// cancels its token; the running task observes the token and exits
/// silently without publishing anything further.
#[derive(Debug)]
pub(crate) struct PollSession {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl PollSession {
    /// Wraps a spawned generation task and its token.
    pub fn new(token: CancellationToken, task: JoinHandle<()>) -> Self {
        Self { token, task }
    }

    /// Cancels the attempt. Safe to call more than once.
    ///
    /// The task is not aborted: it observes the token at its next
    /// suspension point and exits without side effects, dropping any
    /// in-flight request.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once the attempt has been cancelled.
    #[allow(dead_code)]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns true once the task has exited.
    #[allow(dead_code)]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
