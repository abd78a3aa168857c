//! Video generation lifecycle.
//!
//! The submit/poll/cancel flow as a cancellable async task: a
//! generation is submitted, then polled on a fixed interval until a
//! terminal status, publishing [`GenerationState`] snapshots through a
//! watch channel the whole way. At most one generation is active per
//! [`VideoGenerator`]; starting a new one tears down the previous
//! session first.

mod generator;
mod handle;
mod session;
mod state;

pub use generator::VideoGenerator;
pub use handle::VideoJobHandle;
pub use state::GenerationState;
