//! Creation Hub client library.
//!
//! Async client for an AI generation service: image generation, image
//! editing, and video generation with a submit-then-poll lifecycle.
//!
//! # High-Level API
//!
//! Most use cases go through the [`hub`] module's service facade:
//!
//! ```ignore
//! use creationhub::api::ReqwestClient;
//! use creationhub::config::SettingsStore;
//! use creationhub::hub::{CreationHub, MemoryImageStore};
//! use creationhub::request::VideoRequest;
//!
//! let hub = CreationHub::new(
//!     ReqwestClient::new()?,
//!     "https://hub.example",
//!     MemoryImageStore::new(),
//!     SettingsStore::new(config_dir),
//! );
//!
//! let mut handle = hub.generate_video(VideoRequest::new("a red bicycle"))?;
//! let outcome = handle.wait().await;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod hub;
pub mod job;
pub mod logging;
pub mod request;
pub mod video;

/// Version of the creationhub library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
