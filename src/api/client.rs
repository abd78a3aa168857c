//! Endpoint client for the Creation Hub service.

use super::error::ApiError;
use super::http::{AsyncHttpClient, FormPart};
use super::types::{
    ImageEditResponse, ImageGeneratePayload, ImageGenerateResponse, VideoGeneratePayload,
    VideoGenerateResponse, VideoStatusResponse,
};
use crate::request::EditRequest;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Client for the Creation Hub HTTP endpoints.
///
/// Generic over the HTTP seam so tests can inject a scripted mock.
pub struct GenerationApi<C> {
    http: C,
    base_url: String,
}

impl<C: AsyncHttpClient> GenerationApi<C> {
    /// Creates a client for the service at `base_url`.
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Test access to the underlying HTTP client.
    #[cfg(test)]
    pub(crate) fn http(&self) -> &C {
        &self.http
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Starts a video generation. Exactly one network call.
    pub async fn submit_video(
        &self,
        payload: &VideoGeneratePayload,
    ) -> Result<VideoGenerateResponse, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        let url = self.url("/api/video/generate");
        debug!(url = %url, "submitting video generation");
        let bytes = self.http.post_json(&url, &body).await?;
        Self::decode(&bytes)
    }

    /// Queries status for a submitted video generation.
    pub async fn poll_video(
        &self,
        video_id: &str,
        task_id: &str,
    ) -> Result<VideoStatusResponse, ApiError> {
        let url = format!(
            "{}?videoId={}&taskId={}",
            self.url("/api/video/generate"),
            video_id,
            task_id
        );
        let bytes = self.http.get(&url).await?;
        Self::decode(&bytes)
    }

    /// Generates an image. One-shot, no polling.
    pub async fn generate_image(
        &self,
        payload: &ImageGeneratePayload,
    ) -> Result<ImageGenerateResponse, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        let url = self.url("/api/creation-hub/generate");
        debug!(url = %url, "submitting image generation");
        let bytes = self.http.post_json(&url, &body).await?;
        Self::decode(&bytes)
    }

    /// Edits an image via a multipart form submission.
    pub async fn edit_image(
        &self,
        request: &EditRequest,
        prompt: &str,
    ) -> Result<ImageEditResponse, ApiError> {
        let parts = vec![
            FormPart::file(
                "image",
                request.image_filename.clone(),
                request.image_mime.clone(),
                request.image.clone(),
            ),
            FormPart::text("prompt", prompt),
            FormPart::text("model", request.model.clone()),
        ];
        let url = self.url("/api/creation-hub/edit");
        debug!(url = %url, model = %request.model, "submitting image edit");
        let bytes = self.http.post_form(&url, parts).await?;
        Self::decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::super::http::tests::MockHttpClient;
    use super::*;
    use crate::request::{ImageRequest, Quality};

    fn image_payload(req: &ImageRequest) -> ImageGeneratePayload {
        ImageGeneratePayload {
            prompt: req.prompt.clone(),
            quality: req.quality,
            size: req.size,
            format: req.format,
            background: req.background,
            compression: req.compression,
            user_id: req.user_id.clone(),
            category: req.category.clone(),
        }
    }

    #[tokio::test]
    async fn test_submit_video_hits_exact_path() {
        let mock = MockHttpClient::from_json(vec![r#"{"videoId":"v1","taskId":"t1"}"#]);
        let api = GenerationApi::new(mock, "https://hub.example");

        let payload = crate::request::VideoRequest::new("a red bicycle")
            .build()
            .unwrap();
        let resp = api.submit_video(&payload).await.unwrap();

        assert_eq!(resp.video_id, "v1");
        assert_eq!(resp.task_id, "t1");
        assert_eq!(
            api.http.requests.lock().unwrap()[0],
            "https://hub.example/api/video/generate"
        );
    }

    #[tokio::test]
    async fn test_poll_video_query_string() {
        let mock = MockHttpClient::from_json(vec![r#"{"status":"PROCESSING","progress":40}"#]);
        let api = GenerationApi::new(mock, "https://hub.example/");

        let resp = api.poll_video("v1", "t1").await.unwrap();
        assert_eq!(resp.status, "PROCESSING");
        assert_eq!(
            api.http.requests.lock().unwrap()[0],
            "https://hub.example/api/video/generate?videoId=v1&taskId=t1"
        );
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_trimmed() {
        let mock = MockHttpClient::from_json(vec![r#"{"videoId":"v1","taskId":"t1"}"#]);
        let api = GenerationApi::new(mock, "https://hub.example///");
        let payload = crate::request::VideoRequest::new("a red bicycle")
            .build()
            .unwrap();
        let _ = api.submit_video(&payload).await.unwrap();
        assert!(api.http.requests.lock().unwrap()[0]
            .starts_with("https://hub.example/api/"));
    }

    #[tokio::test]
    async fn test_error_status_propagates_message() {
        let mock = MockHttpClient::new(vec![Err(ApiError::Status {
            status: 429,
            message: "rate limited".to_string(),
        })]);
        let api = GenerationApi::new(mock, "https://hub.example");
        let payload = crate::request::VideoRequest::new("a red bicycle")
            .build()
            .unwrap();

        let err = api.submit_video(&payload).await.unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_malformed_response_is_decode_error() {
        let mock = MockHttpClient::from_json(vec!["not json"]);
        let api = GenerationApi::new(mock, "https://hub.example");
        let err = api.poll_video("v1", "t1").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_generate_image_path_and_decode() {
        let mock = MockHttpClient::from_json(vec![
            r#"{"data":{"imageUrl":"https://x/i.png","revisedPrompt":"revised"}}"#,
        ]);
        let api = GenerationApi::new(mock, "https://hub.example");

        let mut req = ImageRequest::new("a lighthouse");
        req.quality = Quality::High;
        let resp = api.generate_image(&image_payload(&req)).await.unwrap();

        assert_eq!(resp.data.image_url, "https://x/i.png");
        assert_eq!(
            api.http.requests.lock().unwrap()[0],
            "https://hub.example/api/creation-hub/generate"
        );
    }

    #[tokio::test]
    async fn test_edit_image_path() {
        let mock = MockHttpClient::from_json(vec![
            r#"{"success":true,"data":{"imageUrl":"https://x/e.png"}}"#,
        ]);
        let api = GenerationApi::new(mock, "https://hub.example");

        let req = EditRequest::new(vec![1, 2, 3], "image/png", "add a boat", "hub-edit-1");
        let resp = api.edit_image(&req, "add a boat").await.unwrap();

        assert!(resp.success);
        assert_eq!(
            api.http.requests.lock().unwrap()[0],
            "https://hub.example/api/creation-hub/edit"
        );
    }
}
