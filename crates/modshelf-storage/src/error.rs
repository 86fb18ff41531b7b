//! Object store error types

use thiserror::Error;

/// Result type alias for object store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// No object stored under the key
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Key is empty or escapes the store root
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
