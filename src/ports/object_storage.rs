//! Object-storage port.
//!
//! Rendered document payloads are uploaded through [`ObjectStorage`] and
//! addressed by an opaque storage id.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EngineResult;

/// A successfully stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Opaque storage id.
    pub storage_id: String,
    /// URL the blob can be served from.
    pub url: String,
}

/// Port to the blob store.
#[async_trait]
pub trait ObjectStorage: Send + Sync + 'static {
    /// Uploads a blob, returning its storage reference.
    async fn put(&self, bytes: Vec<u8>, content_type: &str) -> EngineResult<StoredObject>;

    /// Fetches a blob by storage id.
    async fn get(&self, storage_id: &str) -> EngineResult<Option<Vec<u8>>>;
}

/// In-memory [`ObjectStorage`] adapter.
#[derive(Debug, Default)]
pub struct MemoryObjectStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStorage {
    /// Creates an empty blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs, for assertions.
    pub fn blob_count(&self) -> usize {
        self.blobs.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn put(&self, bytes: Vec<u8>, _content_type: &str) -> EngineResult<StoredObject> {
        let storage_id = Uuid::new_v4().to_string();
        self.blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(storage_id.clone(), bytes);
        Ok(StoredObject {
            url: format!("/api/storage/{storage_id}"),
            storage_id,
        })
    }

    async fn get(&self, storage_id: &str) -> EngineResult<Option<Vec<u8>>> {
        Ok(self
            .blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(storage_id)
            .cloned())
    }
}
