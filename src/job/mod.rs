//! Generation job model.
//!
//! A [`GenerationJob`] tracks one logical request to produce an image or
//! video artifact, from submission to a terminal state. Jobs are created
//! when the submission call returns a task identifier and are mutated
//! exclusively by the poll task until they reach a terminal status; a
//! terminal job is never resurrected.

mod record;
mod remote;

pub use record::{GenerationJob, JobId, JobStatus};
pub use remote::RemoteStatus;
