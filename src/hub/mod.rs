//! Creation Hub orchestrator service.
//!
//! [`CreationHub`] is an explicitly constructed, dependency-injected
//! service instance: callers hand it an HTTP client, an image store, and
//! a settings store, and dispose of it when done. There is no hidden
//! module-level singleton.

mod record;
mod service;
mod store;

pub use record::{GeneratedImageRecord, ImageFilter};
pub use service::CreationHub;
pub use store::{ImageStore, MemoryImageStore, StoreError};
