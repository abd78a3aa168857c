//! Video generation request builder.
//!
//! Assembles the submission payload from user input and defaults. A local
//! image file is converted to a transportable base64 data URL at payload
//! build time; if that conversion fails, no partial payload is produced.

use super::validate::validate_prompt;
use crate::api::types::VideoGeneratePayload;
use crate::error::HubError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Default clip duration in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 5;

/// Source image reference for image-to-video generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// An image already hosted somewhere reachable by the service.
    Url(String),
    /// Raw bytes of a local file, encoded into a data URL on build.
    File { data: Vec<u8>, mime: String },
}

/// A video generation request.
///
/// # Example
///
/// ```
/// use creationhub::request::VideoRequest;
///
/// let request = VideoRequest::new("a red bicycle")
///     .with_duration(8)
///     .with_platform("tiktok");
/// let payload = request.build().unwrap();
/// assert_eq!(payload.duration, 8);
/// ```
#[derive(Debug, Clone)]
pub struct VideoRequest {
    prompt: String,
    duration_secs: u32,
    platform: Option<String>,
    format: Option<String>,
    image: Option<ImageInput>,
}

impl VideoRequest {
    /// Creates a request with the default duration and no hints.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            duration_secs: DEFAULT_DURATION_SECS,
            platform: None,
            format: None,
            image: None,
        }
    }

    /// Sets the target clip duration in seconds.
    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Sets the target platform hint (e.g. "tiktok", "youtube").
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Sets the output format hint (e.g. "vertical", "landscape").
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Uses an already-hosted image as the generation source.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image = Some(ImageInput::Url(url.into()));
        self
    }

    /// Uses a local image file as the generation source.
    ///
    /// The bytes are encoded as a base64 data URL when the payload is
    /// built.
    pub fn with_image_file(mut self, data: Vec<u8>, mime: impl Into<String>) -> Self {
        self.image = Some(ImageInput::File {
            data,
            mime: mime.into(),
        });
        self
    }

    /// Returns the prompt as given (untrimmed).
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Validates the request and assembles the wire payload.
    ///
    /// No network or state side effects. Errors: invalid prompt, or a
    /// local file that cannot be converted to a data URL.
    pub fn build(&self) -> Result<VideoGeneratePayload, HubError> {
        let prompt = validate_prompt(&self.prompt)?;

        let (image_url, image_file) = match &self.image {
            None => (None, None),
            Some(ImageInput::Url(url)) => (Some(url.clone()), None),
            Some(ImageInput::File { data, mime }) => (None, Some(encode_data_url(data, mime)?)),
        };

        Ok(VideoGeneratePayload {
            prompt: prompt.to_string(),
            duration: self.duration_secs,
            platform: self.platform.clone(),
            format: self.format.clone(),
            image_url,
            image_file,
        })
    }
}

/// Encodes image bytes as a `data:<mime>;base64,<payload>` URL.
fn encode_data_url(data: &[u8], mime: &str) -> Result<String, HubError> {
    if data.is_empty() {
        return Err(HubError::Encoding("image file is empty".to_string()));
    }
    if mime.is_empty() || !mime.starts_with("image/") {
        return Err(HubError::Encoding(format!(
            "unsupported media type: {:?}",
            mime
        )));
    }
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(data)))
}
