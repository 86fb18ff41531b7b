//! Service-layer error types
//!
//! Validation failures are detected before any side effect and map to
//! client errors; storage and catalog write failures are reported
//! distinctly so operators can tell "nothing happened" from "blob
//! orphaned".

use modshelf_db::DbError;
use modshelf_storage::StorageError;
use thiserror::Error;

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Service-layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A required field is absent or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Slot value is not in the fixed enum
    #[error("Invalid slot: {0}")]
    InvalidSlot(String),

    /// File payload is empty
    #[error("File payload is empty")]
    EmptyFile,

    /// Upload-path creator handle does not resolve to a registered creator
    #[error("Unknown creator: {0}")]
    UnknownCreator(String),

    /// Caller-supplied slug is not URL-safe
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    /// Request parameters are inconsistent (e.g. a cursor under title sort)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Slug uniqueness lost to a concurrent publish; retryable
    #[error("Slug conflict: {0}")]
    SlugConflict(String),

    /// The object-store write failed; no catalog rows were written
    #[error("Storage write failed: {0}")]
    StorageWriteFailed(String),

    /// A catalog write failed after the object-store write completed
    #[error("Catalog write failed: {0}")]
    CatalogWriteFailed(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database error outside the publish write path
    #[error("Database error: {0}")]
    Database(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Machine-readable error kind for API responses
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::MissingField(_) => "missing_field",
            ServiceError::InvalidSlot(_) => "invalid_slot",
            ServiceError::EmptyFile => "empty_file",
            ServiceError::UnknownCreator(_) => "unknown_creator",
            ServiceError::InvalidSlug(_) => "invalid_slug",
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::SlugConflict(_) => "slug_conflict",
            ServiceError::StorageWriteFailed(_) => "storage_write_failed",
            ServiceError::CatalogWriteFailed(_) => "catalog_write_failed",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Database(_) => "database_error",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// Whether this is a validation failure detected before side effects
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::MissingField(_)
                | ServiceError::InvalidSlot(_)
                | ServiceError::EmptyFile
                | ServiceError::UnknownCreator(_)
                | ServiceError::InvalidSlug(_)
                | ServiceError::InvalidInput(_)
        )
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Database(other.to_string()),
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::StorageWriteFailed(err.to_string())
    }
}
