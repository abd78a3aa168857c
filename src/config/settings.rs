//! User preference settings.
//!
//! Pure data with serde derives; persistence lives in the store.

use crate::request::{Background, ImageSize, OutputFormat, Quality};
use serde::{Deserialize, Serialize};

/// Default poll interval for video generation status, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

/// User preferences applied as request defaults.
///
/// Unknown fields in a persisted document are ignored; missing fields
/// fall back to defaults, so documents written by older versions load
/// cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSettings {
    /// Default quality for image generation.
    pub default_quality: Quality,
    /// Default size for image generation.
    pub default_size: ImageSize,
    /// Default output format for image generation.
    pub default_format: OutputFormat,
    /// Default background handling for image generation.
    pub default_background: Background,
    /// Persist generated images to the store automatically.
    pub auto_save: bool,
    /// Video status poll interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            default_quality: Quality::Auto,
            default_size: ImageSize::Auto,
            default_format: OutputFormat::Png,
            default_background: Background::Auto,
            auto_save: true,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}
