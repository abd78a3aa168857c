//! Image generation and edit request types.
//!
//! Quality, size, format, and background are closed enums so an
//! unsupported value is unrepresentable past the deserialization
//! boundary. Compression is the one numeric knob and is range-checked
//! at validation time.

use super::validate::validate_prompt;
use crate::error::HubError;
use serde::{Deserialize, Serialize};

/// Output quality tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Auto,
    Low,
    Medium,
    High,
}

/// Output dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1024x1536")]
    Portrait,
    #[serde(rename = "1536x1024")]
    Landscape,
}

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    /// Returns true if the format supports a compression level.
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::Jpeg | Self::Webp)
    }

    /// Returns true if the format supports an alpha channel.
    pub fn supports_transparency(&self) -> bool {
        matches!(self, Self::Png | Self::Webp)
    }
}

/// Background handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Auto,
    Transparent,
    Opaque,
}

/// An image generation request.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    /// Generation prompt.
    pub prompt: String,
    /// Output quality tier.
    pub quality: Quality,
    /// Output dimensions.
    pub size: ImageSize,
    /// Output file format.
    pub format: OutputFormat,
    /// Background handling.
    pub background: Background,
    /// Compression level (0–100), lossy formats only.
    pub compression: Option<u8>,
    /// Requesting user, threaded through to the persisted record.
    pub user_id: Option<String>,
    /// Category context, threaded through to the persisted record.
    pub category: Option<String>,
    /// Conversation this generation belongs to, if any.
    pub conversation_id: Option<String>,
}

impl ImageRequest {
    /// Creates a request with default quality/size/format/background.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            quality: Quality::default(),
            size: ImageSize::default(),
            format: OutputFormat::default(),
            background: Background::default(),
            compression: None,
            user_id: None,
            category: None,
            conversation_id: None,
        }
    }

    /// Validates the request and returns the trimmed prompt.
    ///
    /// Checks the prompt bounds, the compression range, and option
    /// coherence (compression requires a lossy format, a transparent
    /// background requires a format with an alpha channel).
    pub fn validate(&self) -> Result<&str, HubError> {
        let prompt = validate_prompt(&self.prompt)?;

        if let Some(level) = self.compression {
            if level > 100 {
                return Err(HubError::Validation(format!(
                    "Compression must be between 0 and 100, got {}",
                    level
                )));
            }
            if !self.format.is_lossy() {
                return Err(HubError::Validation(
                    "Compression is only supported for jpeg and webp output".to_string(),
                ));
            }
        }

        if self.background == Background::Transparent && !self.format.supports_transparency() {
            return Err(HubError::Validation(
                "Transparent background requires png or webp output".to_string(),
            ));
        }

        Ok(prompt)
    }
}

/// An image edit request: a source image plus an instruction prompt.
#[derive(Debug, Clone)]
pub struct EditRequest {
    /// Raw bytes of the source image.
    pub image: Vec<u8>,
    /// Media type of the source image (e.g. "image/png").
    pub image_mime: String,
    /// Filename reported in the multipart form.
    pub image_filename: String,
    /// Edit instruction prompt.
    pub prompt: String,
    /// Model identifier to edit with.
    pub model: String,
    /// Record id of the image being edited, if it came from the store.
    pub parent_image_id: Option<String>,
}

impl EditRequest {
    /// Creates an edit request for the given image bytes.
    pub fn new(
        image: Vec<u8>,
        image_mime: impl Into<String>,
        prompt: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            image,
            image_mime: image_mime.into(),
            image_filename: "image.png".to_string(),
            prompt: prompt.into(),
            model: model.into(),
            parent_image_id: None,
        }
    }

    /// Validates the request and returns the trimmed prompt.
    pub fn validate(&self) -> Result<&str, HubError> {
        if self.image.is_empty() {
            return Err(HubError::Validation("Source image is empty".to_string()));
        }
        if !self.image_mime.starts_with("image/") {
            return Err(HubError::Validation(format!(
                "Unsupported source media type: {:?}",
                self.image_mime
            )));
        }
        validate_prompt(&self.prompt)
    }
}
