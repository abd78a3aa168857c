//! Image record store seam.
//!
//! The hub treats persistence as an opaque create/read/filter
//! collaborator. Production deployments implement [`ImageStore`] against
//! their storage service; [`MemoryImageStore`] backs tests and local use.

use super::record::{GeneratedImageRecord, ImageFilter};
use dashmap::DashMap;
use std::future::Future;
use thiserror::Error;

/// Errors from an image store backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend could not be reached or errored out.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The backend refused the write.
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Create/read/filter collaborator for generated image records.
pub trait ImageStore: Send + Sync {
    /// Persists a new record.
    fn create(
        &self,
        record: GeneratedImageRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fetches a record by id.
    fn get(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<GeneratedImageRecord>, StoreError>> + Send;

    /// Lists records matching the filter, newest first.
    fn list(
        &self,
        filter: &ImageFilter,
    ) -> impl Future<Output = Result<Vec<GeneratedImageRecord>, StoreError>> + Send;
}

/// In-memory image store over a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    records: DashMap<String, GeneratedImageRecord>,
}

impl MemoryImageStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ImageStore for MemoryImageStore {
    async fn create(&self, record: GeneratedImageRecord) -> Result<(), StoreError> {
        if self.records.contains_key(&record.id) {
            return Err(StoreError::Rejected(format!(
                "duplicate record id {}",
                record.id
            )));
        }
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<GeneratedImageRecord>, StoreError> {
        Ok(self.records.get(id).map(|entry| entry.clone()))
    }

    async fn list(&self, filter: &ImageFilter) -> Result<Vec<GeneratedImageRecord>, StoreError> {
        let mut matching: Vec<GeneratedImageRecord> = self
            .records
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}
