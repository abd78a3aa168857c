//! Persisted image record and query filter.

use crate::request::{ImageSize, Quality};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static IMAGE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// One row of the `generated_images` collaborator.
///
/// The crate only creates and reads these records; the backing schema and
/// its evolution belong to the storage service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImageRecord {
    pub id: String,
    pub user_id: Option<String>,
    pub prompt: String,
    pub revised_prompt: Option<String>,
    pub image_url: String,
    pub quality: Quality,
    pub size: ImageSize,
    pub style: Option<String>,
    pub model: Option<String>,
    pub status: String,
    pub conversation_id: Option<String>,
    pub parent_image_id: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GeneratedImageRecord {
    /// Creates a completed record with a fresh client-generated id and
    /// current timestamps.
    pub fn completed(prompt: impl Into<String>, image_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("img-{}", IMAGE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)),
            user_id: None,
            prompt: prompt.into(),
            revised_prompt: None,
            image_url: image_url.into(),
            quality: Quality::Auto,
            size: ImageSize::Auto,
            style: None,
            model: None,
            status: "completed".to_string(),
            conversation_id: None,
            parent_image_id: None,
            metadata: serde_json::Value::Null,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Filter for listing stored image records. Empty filter matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFilter {
    pub user_id: Option<String>,
    pub conversation_id: Option<String>,
    pub status: Option<String>,
}

impl ImageFilter {
    /// Returns true if `record` satisfies every set field.
    pub fn matches(&self, record: &GeneratedImageRecord) -> bool {
        if let Some(user_id) = &self.user_id {
            if record.user_id.as_ref() != Some(user_id) {
                return false;
            }
        }
        if let Some(conversation_id) = &self.conversation_id {
            if record.conversation_id.as_ref() != Some(conversation_id) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if &record.status != status {
                return false;
            }
        }
        true
    }
}
