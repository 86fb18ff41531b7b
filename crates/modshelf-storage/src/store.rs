//! The object store seam

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageResult;

/// A blob read back from the store
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: Option<String>,
}

/// Key-addressed binary blob storage.
///
/// Implementations must be thread-safe; the publish workflow holds the
/// store as `Arc<dyn ObjectStore>`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write a blob under the key, replacing any existing object.
    ///
    /// The write must be complete when this returns Ok: partially written
    /// objects must never become visible under the key.
    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> StorageResult<()>;

    /// Read the blob stored under the key.
    ///
    /// # Returns
    /// * `Err(StorageError::NotFound)` - nothing stored under the key
    async fn get(&self, key: &str) -> StorageResult<StoredObject>;

    /// Check whether a blob exists under the key
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}
