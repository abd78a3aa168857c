//! Video generation driver.
//!
//! [`VideoGenerator`] owns the single generation slot: submitting starts
//! a cancellable task that performs the one submission call and then
//! polls status on a fixed interval until a terminal state. The loop
//! awaits each status query before taking the next tick, so at most one
//! request is in flight at a time; a slow response delays subsequent
//! ticks instead of stacking requests.

use super::handle::VideoJobHandle;
use super::session::PollSession;
use super::state::{GenerationState, StatePublisher};
use crate::api::types::VideoGeneratePayload;
use crate::api::{AsyncHttpClient, GenerationApi};
use crate::error::HubError;
use crate::job::{GenerationJob, JobId, RemoteStatus};
use crate::request::VideoRequest;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default status poll interval.
pub(crate) const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Consecutive unrecognized status values tolerated before the job is
/// failed. Keeps a changed API contract from polling silently forever
/// while letting a one-off odd status pass.
const MAX_UNKNOWN_STREAK: u32 = 5;

/// Drives video generations against the hub API.
///
/// One logical "current job" slot: starting a new generation cancels any
/// active session first. Observers subscribe to [`GenerationState`]
/// snapshots; per-attempt control goes through the returned
/// [`VideoJobHandle`].
pub struct VideoGenerator<C> {
    api: Arc<GenerationApi<C>>,
    poll_interval: Duration,
    publisher: Arc<StatePublisher>,
    active: Mutex<Option<PollSession>>,
}

impl<C: AsyncHttpClient + 'static> VideoGenerator<C> {
    /// Creates a generator with the default 3 s poll interval.
    pub fn new(api: Arc<GenerationApi<C>>) -> Self {
        Self::with_poll_interval(api, DEFAULT_POLL_INTERVAL)
    }

    /// Creates a generator with a custom poll interval.
    pub fn with_poll_interval(api: Arc<GenerationApi<C>>, poll_interval: Duration) -> Self {
        Self {
            api,
            poll_interval,
            publisher: Arc::new(StatePublisher::new()),
            active: Mutex::new(None),
        }
    }

    /// Returns the latest state snapshot.
    pub fn state(&self) -> GenerationState {
        self.publisher.current()
    }

    /// Returns an observer of the generation slot.
    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.publisher.subscribe()
    }

    /// Starts a video generation.
    ///
    /// Validation and payload assembly happen before anything else; an
    /// invalid request is rejected without a network call and without
    /// touching the active session. On success the previous session (if
    /// any) is cancelled, and a new task is spawned that submits the
    /// request and polls until terminal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn generate(&self, request: VideoRequest) -> Result<VideoJobHandle, HubError> {
        let payload = request.build()?;

        let token = CancellationToken::new();
        let job_id = JobId::generate();

        let mut active = match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = active.take() {
            previous.cancel();
            self.publisher.cancelled();
            debug!("previous generation session torn down");
        }
        self.publisher.begin();

        info!(job = %job_id, "starting video generation");
        let task = tokio::spawn(run_generation(
            Arc::clone(&self.api),
            payload,
            job_id.clone(),
            self.poll_interval,
            token.clone(),
            Arc::clone(&self.publisher),
        ));
        *active = Some(PollSession::new(token.clone(), task));
        drop(active);

        Ok(VideoJobHandle::new(
            job_id,
            self.publisher.subscribe(),
            token,
            Arc::clone(&self.publisher),
        ))
    }

    /// Cancels the active generation, if any.
    ///
    /// Aborts any in-flight request, stops polling, marks a non-terminal
    /// job cancelled, and resets progress/flags. Idempotent: with no
    /// active session this is a no-op.
    pub fn cancel(&self) {
        let session = match self.active.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(session) = session {
            session.cancel();
            self.publisher.cancelled();
            info!("video generation cancelled");
        }
    }
}

impl<C> Drop for VideoGenerator<C> {
    /// Teardown cancels whatever is still running.
    fn drop(&mut self) {
        let session = match self.active.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(session) = session {
            session.cancel();
            self.publisher.cancelled();
        }
    }
}

/// Converts a wire progress value to the 0–100 domain.
fn clamp_progress(raw: f64) -> u8 {
    if raw.is_finite() {
        raw.clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Submits the generation and polls until terminal.
///
/// Every await is fenced by the cancellation token: an explicit cancel
/// drops the in-flight request and exits without publishing. The token
/// is re-checked after each await so a response that settles in the same
/// instant as a cancel is still discarded.
async fn run_generation<C: AsyncHttpClient>(
    api: Arc<GenerationApi<C>>,
    payload: VideoGeneratePayload,
    job_id: JobId,
    poll_interval: Duration,
    token: CancellationToken,
    publisher: Arc<StatePublisher>,
) {
    // Exactly one submission call.
    let submitted = tokio::select! {
        _ = token.cancelled() => return,
        result = api.submit_video(&payload) => result,
    };
    if token.is_cancelled() {
        return;
    }
    let submitted = match submitted {
        Ok(response) => response,
        Err(e) => {
            warn!(job = %job_id, error = %e, "video submission failed");
            publisher.fail(&token, &e.to_string());
            return;
        }
    };

    let video_id = submitted.video_id;
    let task_id = submitted.task_id;
    let job = GenerationJob::new(job_id.clone(), task_id.clone());
    if !publisher.job_created(&token, job) {
        return;
    }
    info!(job = %job_id, video_id = %video_id, task_id = %task_id, "video generation submitted");

    let mut unknown_streak = 0u32;
    let mut ticker = tokio::time::interval(poll_interval);
    // A response slower than the interval pushes later ticks back rather
    // than bursting queued ones.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick fires immediately, matching the immediate initial
        // status query.
        tokio::select! {
            _ = token.cancelled() => return,
            _ = ticker.tick() => {}
        }

        let polled = tokio::select! {
            _ = token.cancelled() => return,
            result = api.poll_video(&video_id, &task_id) => result,
        };
        if token.is_cancelled() {
            return;
        }

        let status = match polled {
            Ok(response) => response,
            Err(e) => {
                // Poll failures are terminal, never retried.
                warn!(job = %job_id, error = %e, "status poll failed");
                publisher.fail(&token, &e.to_string());
                return;
            }
        };

        // Progress is applied whenever present, regardless of status.
        if let Some(raw) = status.progress {
            publisher.progress(&token, clamp_progress(raw));
        }

        match RemoteStatus::parse(&status.status) {
            RemoteStatus::Succeeded => {
                match status.video_url {
                    Some(url) => {
                        info!(job = %job_id, url = %url, "video generation completed");
                        publisher.complete(&token, &url);
                    }
                    None => {
                        warn!(job = %job_id, "success status without a result URL");
                        publisher.fail(&token, "Generation completed without a result URL");
                    }
                }
                return;
            }
            RemoteStatus::Failed => {
                let message = status
                    .error_message
                    .unwrap_or_else(|| "Video generation failed".to_string());
                warn!(job = %job_id, error = %message, "video generation failed");
                publisher.fail(&token, &message);
                return;
            }
            RemoteStatus::InProgress => {
                unknown_streak = 0;
            }
            RemoteStatus::Unknown(raw) => {
                unknown_streak += 1;
                warn!(job = %job_id, status = %raw, streak = unknown_streak, "unrecognized generation status");
                if unknown_streak >= MAX_UNKNOWN_STREAK {
                    publisher.fail(
                        &token,
                        &format!("Unrecognized generation status {:?}", raw),
                    );
                    return;
                }
            }
        }
    }
}
