//! HTTP client abstraction for testability.
//!
//! The [`AsyncHttpClient`] trait allows dependency injection and mock
//! clients in tests; [`ReqwestClient`] is the production implementation.
//! Implementations return the response body only on success and fold
//! non-success statuses into [`ApiError::Status`] with a tolerant parse
//! of the error body.

use super::error::ApiError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Default timeout for hub requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One part of a multipart form submission.
#[derive(Debug, Clone)]
pub enum FormPart {
    /// A plain text field.
    Text { name: String, value: String },
    /// A file field with raw bytes.
    File {
        name: String,
        filename: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    /// Creates a text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a file field.
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self::File {
            name: name.into(),
            filename: filename.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// Trait for asynchronous HTTP operations against the hub service.
///
/// Futures returned by these methods are cancel-safe: dropping one aborts
/// the underlying request, which is how explicit cancellation discards
/// in-flight polls.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs a GET request and returns the response body.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ApiError>> + Send;

    /// Performs a POST request with a JSON body and returns the response
    /// body.
    fn post_json(
        &self,
        url: &str,
        json_body: &str,
    ) -> impl Future<Output = Result<Vec<u8>, ApiError>> + Send;

    /// Performs a multipart POST request and returns the response body.
    fn post_form(
        &self,
        url: &str,
        parts: Vec<FormPart>,
    ) -> impl Future<Output = Result<Vec<u8>, ApiError>> + Send;
}

/// Production HTTP client backed by reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Http(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn read_body(url: &str, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            warn!(url = url, status = status.as_u16(), "HTTP error status");
            return Err(ApiError::from_status(status.as_u16(), &bytes));
        }
        trace!(url = url, bytes = bytes.len(), "HTTP response body read");
        Ok(bytes.to_vec())
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        trace!(url = url, "HTTP GET starting");
        let response = self.client.get(url).send().await?;
        debug!(
            url = url,
            status = response.status().as_u16(),
            "HTTP response received"
        );
        Self::read_body(url, response).await
    }

    async fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, ApiError> {
        trace!(url = url, "HTTP POST starting");
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(json_body.to_string())
            .send()
            .await?;
        debug!(
            url = url,
            status = response.status().as_u16(),
            "HTTP response received"
        );
        Self::read_body(url, response).await
    }

    async fn post_form(&self, url: &str, parts: Vec<FormPart>) -> Result<Vec<u8>, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    filename,
                    mime,
                    bytes,
                } => {
                    let file = reqwest::multipart::Part::bytes(bytes)
                        .file_name(filename)
                        .mime_str(&mime)
                        .map_err(|e| ApiError::Http(format!("Invalid media type: {}", e)))?;
                    form.part(name, file)
                }
            };
        }

        trace!(url = url, "HTTP multipart POST starting");
        let response = self.client.post(url).multipart(form).send().await?;
        debug!(
            url = url,
            status = response.status().as_u16(),
            "HTTP response received"
        );
        Self::read_body(url, response).await
    }
}
