//! User settings and their persistence.
//!
//! Settings live in a single JSON document at a fixed file name. They are
//! read once when the hub service is constructed and written back on
//! every update.

mod settings;
mod store;

pub use settings::{HubSettings, DEFAULT_POLL_INTERVAL_MS};
pub use store::{SettingsStore, SETTINGS_FILE_NAME};
