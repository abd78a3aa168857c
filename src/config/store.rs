//! Settings persistence.

use super::settings::HubSettings;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Fixed file name of the persisted settings document.
pub const SETTINGS_FILE_NAME: &str = "creation-hub-settings.json";

/// Reads and writes the settings JSON document.
///
/// The store never fails construction: a missing or unreadable document
/// simply yields defaults on load. Writes propagate I/O errors to the
/// caller.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store over `<dir>/creation-hub-settings.json`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SETTINGS_FILE_NAME),
        }
    }

    /// Returns the full path of the settings document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings, falling back to defaults when the document is
    /// missing or malformed.
    ///
    /// A malformed document is logged and replaced by defaults rather
    /// than failing hub construction.
    pub fn load(&self) -> HubSettings {
        match std::fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(settings) => {
                    debug!(path = %self.path.display(), "settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "malformed settings document, using defaults");
                    HubSettings::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => HubSettings::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read settings, using defaults");
                HubSettings::default()
            }
        }
    }

    /// Writes the full settings document, creating parent directories as
    /// needed.
    pub fn save(&self, settings: &HubSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
