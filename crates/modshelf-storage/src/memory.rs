//! In-memory object store for tests

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{StorageError, StorageResult};
use crate::store::{ObjectStore, StoredObject};

/// In-memory `ObjectStore` implementation.
///
/// Intended for tests; keeps every object in a mutex-guarded map and
/// retains declared content types.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of every stored object, unordered
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> StorageResult<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }

        let object = StoredObject {
            data,
            content_type: content_type.map(|s| s.to_string()),
        };

        self.objects
            .lock()
            .map_err(|_| StorageError::InvalidKey("store poisoned".to_string()))?
            .insert(key.to_string(), object);
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        self.objects
            .lock()
            .map_err(|_| StorageError::InvalidKey("store poisoned".to_string()))?
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self
            .objects
            .lock()
            .map_err(|_| StorageError::InvalidKey("store poisoned".to_string()))?
            .contains_key(key))
    }
}
