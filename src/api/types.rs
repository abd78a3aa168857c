//! Wire types for the Creation Hub endpoints.
//!
//! Field names follow the service's camelCase JSON convention. These
//! types exist only at the API boundary; the rest of the crate works with
//! parsed domain types.

use serde::{Deserialize, Serialize};

/// Body for `POST /api/video/generate`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoGeneratePayload {
    pub prompt: String,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Base64 data URL of a local source image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,
}

/// Success body of `POST /api/video/generate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGenerateResponse {
    pub video_id: String,
    pub task_id: String,
}

/// Body of `GET /api/video/generate?videoId=..&taskId=..`.
///
/// `status` stays a raw string here; it is parsed into
/// [`crate::job::RemoteStatus`] by the poll loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatusResponse {
    pub status: String,
    pub progress: Option<f64>,
    pub video_url: Option<String>,
    pub error_message: Option<String>,
}

/// Body for `POST /api/creation-hub/generate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGeneratePayload {
    pub prompt: String,
    pub quality: crate::request::Quality,
    pub size: crate::request::ImageSize,
    pub format: crate::request::OutputFormat,
    pub background: crate::request::Background,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Success body of `POST /api/creation-hub/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerateResponse {
    pub data: ImageData,
}

/// Generated image payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub image_url: String,
    pub revised_prompt: Option<String>,
}

/// Success body of `POST /api/creation-hub/edit`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageEditResponse {
    pub success: bool,
    pub data: Option<ImageData>,
}
