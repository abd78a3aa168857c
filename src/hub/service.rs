//! The Creation Hub service.

use super::record::{GeneratedImageRecord, ImageFilter};
use super::store::{ImageStore, StoreError};
use crate::api::types::ImageGeneratePayload;
use crate::api::{AsyncHttpClient, GenerationApi};
use crate::config::{HubSettings, SettingsStore};
use crate::error::HubError;
use crate::request::{EditRequest, ImageRequest, VideoRequest};
use crate::video::{VideoGenerator, VideoJobHandle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};

/// Dependency-injected Creation Hub service.
///
/// One logical instance per session: construct it with an HTTP client,
/// an image store, and a settings store; pass it to consumers; call
/// [`dispose`](Self::dispose) on teardown. Settings are read once at
/// construction and written back on every update.
pub struct CreationHub<C, S> {
    api: Arc<GenerationApi<C>>,
    store: S,
    settings: Mutex<HubSettings>,
    settings_store: SettingsStore,
    video: VideoGenerator<C>,
}

impl<C: AsyncHttpClient + 'static, S: ImageStore> CreationHub<C, S> {
    /// Constructs the service and loads persisted settings.
    pub fn new(http: C, base_url: impl Into<String>, store: S, settings_store: SettingsStore) -> Self {
        let settings = settings_store.load();
        let api = Arc::new(GenerationApi::new(http, base_url));
        let video = VideoGenerator::with_poll_interval(
            Arc::clone(&api),
            Duration::from_millis(settings.poll_interval_ms),
        );
        info!(auto_save = settings.auto_save, "creation hub initialized");
        Self {
            api,
            store,
            settings: Mutex::new(settings),
            settings_store,
            video,
        }
    }

    /// Returns the current settings.
    pub fn settings(&self) -> HubSettings {
        self.lock_settings().clone()
    }

    /// Applies a settings mutation and persists the document.
    pub fn update_settings(
        &self,
        apply: impl FnOnce(&mut HubSettings),
    ) -> Result<HubSettings, HubError> {
        let updated = {
            let mut settings = self.lock_settings();
            apply(&mut settings);
            settings.clone()
        };
        self.settings_store
            .save(&updated)
            .map_err(|e| HubError::Storage(format!("failed to persist settings: {}", e)))?;
        Ok(updated)
    }

    /// Creates an image request pre-filled with the user's defaults.
    pub fn new_image_request(&self, prompt: impl Into<String>) -> ImageRequest {
        let settings = self.lock_settings();
        let mut request = ImageRequest::new(prompt);
        request.quality = settings.default_quality;
        request.size = settings.default_size;
        request.format = settings.default_format;
        request.background = settings.default_background;
        request
    }

    /// Generates an image. One-shot, no polling.
    ///
    /// When auto-save is on, the record is persisted before returning;
    /// a persistence failure surfaces as a retryable storage error.
    pub async fn generate_image(
        &self,
        request: ImageRequest,
    ) -> Result<GeneratedImageRecord, HubError> {
        let prompt = request.validate()?.to_string();

        let payload = ImageGeneratePayload {
            prompt: prompt.clone(),
            quality: request.quality,
            size: request.size,
            format: request.format,
            background: request.background,
            compression: request.compression,
            user_id: request.user_id.clone(),
            category: request.category.clone(),
        };
        let response = self.api.generate_image(&payload).await?;

        let mut record = GeneratedImageRecord::completed(prompt, response.data.image_url);
        record.revised_prompt = response.data.revised_prompt;
        record.quality = request.quality;
        record.size = request.size;
        record.user_id = request.user_id;
        record.conversation_id = request.conversation_id;
        record.metadata = serde_json::json!({
            "format": request.format,
            "background": request.background,
            "compression": request.compression,
            "category": request.category,
        });

        self.maybe_save(&record).await?;
        info!(record = %record.id, "image generated");
        Ok(record)
    }

    /// Edits an image via the multipart endpoint.
    pub async fn edit_image(&self, request: EditRequest) -> Result<GeneratedImageRecord, HubError> {
        let prompt = request.validate()?.to_string();

        let response = self.api.edit_image(&request, &prompt).await?;
        let data = match (response.success, response.data) {
            (true, Some(data)) => data,
            _ => {
                return Err(HubError::Generation(
                    "Image edit was rejected by the service".to_string(),
                ))
            }
        };

        let mut record = GeneratedImageRecord::completed(prompt, data.image_url);
        record.revised_prompt = data.revised_prompt;
        record.model = Some(request.model.clone());
        record.parent_image_id = request.parent_image_id.clone();

        self.maybe_save(&record).await?;
        info!(record = %record.id, parent = ?record.parent_image_id, "image edited");
        Ok(record)
    }

    /// Starts a video generation, cancelling any active one first.
    pub fn generate_video(&self, request: VideoRequest) -> Result<VideoJobHandle, HubError> {
        self.video.generate(request)
    }

    /// Cancels the active video generation, if any.
    pub fn cancel_video(&self) {
        self.video.cancel()
    }

    /// The video generation slot, for state subscription.
    pub fn video(&self) -> &VideoGenerator<C> {
        &self.video
    }

    /// Fetches a stored image record by id.
    pub async fn image(&self, id: &str) -> Result<Option<GeneratedImageRecord>, HubError> {
        self.store.get(id).await.map_err(store_error)
    }

    /// Lists stored image records matching the filter, newest first.
    pub async fn images(
        &self,
        filter: &ImageFilter,
    ) -> Result<Vec<GeneratedImageRecord>, HubError> {
        self.store.list(filter).await.map_err(store_error)
    }

    /// Tears the service down: cancels any active video generation and
    /// flushes settings.
    pub fn dispose(&self) {
        self.video.cancel();
        let settings = self.lock_settings().clone();
        if let Err(e) = self.settings_store.save(&settings) {
            warn!(error = %e, "failed to flush settings on dispose");
        }
        info!("creation hub disposed");
    }

    async fn maybe_save(&self, record: &GeneratedImageRecord) -> Result<(), HubError> {
        let auto_save = self.lock_settings().auto_save;
        if auto_save {
            self.store
                .create(record.clone())
                .await
                .map_err(store_error)?;
        }
        Ok(())
    }

    fn lock_settings(&self) -> std::sync::MutexGuard<'_, HubSettings> {
        match self.settings.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn store_error(e: StoreError) -> HubError {
    HubError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockHttpClient;
    use crate::hub::MemoryImageStore;
    use crate::request::Quality;

    const IMAGE_OK: &str =
        r#"{"data":{"imageUrl":"https://x/i.png","revisedPrompt":"a tall lighthouse"}}"#;

    fn hub_with(
        script: Vec<&str>,
    ) -> (
        CreationHub<MockHttpClient, MemoryImageStore>,
        tempfile::TempDir,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let hub = CreationHub::new(
            MockHttpClient::from_json(script),
            "https://hub.example",
            MemoryImageStore::new(),
            SettingsStore::new(dir.path()),
        );
        (hub, dir)
    }

    #[tokio::test]
    async fn test_generate_image_saves_record() {
        let (hub, _dir) = hub_with(vec![IMAGE_OK]);

        let record = hub
            .generate_image(hub.new_image_request("a lighthouse"))
            .await
            .unwrap();

        assert_eq!(record.image_url, "https://x/i.png");
        assert_eq!(record.revised_prompt.as_deref(), Some("a tall lighthouse"));
        assert_eq!(record.status, "completed");
        // Auto-save defaults on.
        assert_eq!(hub.store.len(), 1);
        assert_eq!(hub.image(&record.id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_generate_image_respects_auto_save_off() {
        let (hub, _dir) = hub_with(vec![IMAGE_OK]);
        hub.update_settings(|s| s.auto_save = false).unwrap();

        let record = hub
            .generate_image(hub.new_image_request("a lighthouse"))
            .await
            .unwrap();

        assert_eq!(record.image_url, "https://x/i.png");
        assert!(hub.store.is_empty());
    }

    #[tokio::test]
    async fn test_generate_image_validation_makes_no_request() {
        let (hub, _dir) = hub_with(vec![IMAGE_OK]);

        let err = hub
            .generate_image(hub.new_image_request(" "))
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Validation(_)));
        assert_eq!(hub.api.http().request_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_image_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        let hub = CreationHub::new(
            MockHttpClient::new(vec![Err(crate::api::ApiError::Status {
                status: 429,
                message: "rate limited".to_string(),
            })]),
            "https://hub.example",
            MemoryImageStore::new(),
            SettingsStore::new(dir.path()),
        );

        let err = hub
            .generate_image(hub.new_image_request("a lighthouse"))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("rate limited"));
        assert!(hub.store.is_empty());
    }

    #[tokio::test]
    async fn test_new_image_request_applies_defaults() {
        let (hub, _dir) = hub_with(vec![IMAGE_OK]);
        hub.update_settings(|s| s.default_quality = Quality::High)
            .unwrap();

        let request = hub.new_image_request("a lighthouse");
        assert_eq!(request.quality, Quality::High);
    }

    #[tokio::test]
    async fn test_settings_update_persists() {
        let (hub, dir) = hub_with(vec![IMAGE_OK]);
        hub.update_settings(|s| s.auto_save = false).unwrap();

        // A fresh store sees the written document.
        let reloaded = SettingsStore::new(dir.path()).load();
        assert!(!reloaded.auto_save);
    }

    #[tokio::test]
    async fn test_edit_image() {
        let (hub, _dir) = hub_with(vec![
            r#"{"success":true,"data":{"imageUrl":"https://x/e.png"}}"#,
        ]);

        let mut request = EditRequest::new(vec![1, 2, 3], "image/png", "add a boat", "hub-edit-1");
        request.parent_image_id = Some("img-7".to_string());
        let record = hub.edit_image(request).await.unwrap();

        assert_eq!(record.image_url, "https://x/e.png");
        assert_eq!(record.model.as_deref(), Some("hub-edit-1"));
        assert_eq!(record.parent_image_id.as_deref(), Some("img-7"));
    }

    #[tokio::test]
    async fn test_edit_image_rejection_is_generation_error() {
        let (hub, _dir) = hub_with(vec![r#"{"success":false}"#]);

        let request = EditRequest::new(vec![1, 2, 3], "image/png", "add a boat", "hub-edit-1");
        let err = hub.edit_image(request).await.unwrap_err();
        assert!(matches!(err, HubError::Generation(_)));
    }

    #[tokio::test]
    async fn test_images_filtering() {
        let (hub, _dir) = hub_with(vec![IMAGE_OK]);

        let mut request = hub.new_image_request("a lighthouse");
        request.user_id = Some("u1".to_string());
        hub.generate_image(request).await.unwrap();

        let filter = ImageFilter {
            user_id: Some("u1".to_string()),
            ..Default::default()
        };
        assert_eq!(hub.images(&filter).await.unwrap().len(), 1);

        let other = ImageFilter {
            user_id: Some("u2".to_string()),
            ..Default::default()
        };
        assert!(hub.images(&other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_retryable_storage_error() {
        struct FailingStore;
        impl ImageStore for FailingStore {
            async fn create(&self, _record: GeneratedImageRecord) -> Result<(), StoreError> {
                Err(StoreError::Unavailable("connection reset".to_string()))
            }
            async fn get(&self, _id: &str) -> Result<Option<GeneratedImageRecord>, StoreError> {
                Ok(None)
            }
            async fn list(
                &self,
                _filter: &ImageFilter,
            ) -> Result<Vec<GeneratedImageRecord>, StoreError> {
                Ok(Vec::new())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let hub = CreationHub::new(
            MockHttpClient::from_json(vec![IMAGE_OK]),
            "https://hub.example",
            FailingStore,
            SettingsStore::new(dir.path()),
        );

        let err = hub
            .generate_image(hub.new_image_request("a lighthouse"))
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Storage(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_dispose_cancels_video_and_flushes_settings() {
        let (hub, dir) = hub_with(vec![
            r#"{"videoId":"v1","taskId":"t1"}"#,
            r#"{"status":"PROCESSING","progress":10}"#,
        ]);

        let _handle = hub.generate_video(VideoRequest::new("a red bicycle")).unwrap();
        hub.update_settings(|s| s.auto_save = false).unwrap();
        hub.dispose();

        assert!(!hub.video().state().is_generating);
        assert!(!SettingsStore::new(dir.path()).load().auto_save);
    }
}
