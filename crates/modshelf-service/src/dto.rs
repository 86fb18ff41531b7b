//! Data Transfer Objects for the service boundary
//!
//! Requests carry raw, untrusted strings (slot names, sort tokens) exactly
//! as the transport received them; parsing and clamping happen inside the
//! services so validation errors carry the right kinds.

use bytes::Bytes;
use modshelf_core::{ModId, VersionId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Publish DTOs
// ============================================================================

/// An uploaded file: bytes plus the declared name and media type
#[derive(Debug, Clone)]
pub struct FilePayload {
    /// File name as declared by the uploader
    pub name: String,
    /// Declared media type, if any
    pub content_type: Option<String>,
    /// Raw file bytes
    pub data: Bytes,
}

/// Request for the end-user upload path.
///
/// The creator must already be registered; the slug and the initial
/// version label are derived, never caller-supplied.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub creator: String,
    pub title: String,
    pub description: Option<String>,
    /// Raw slot name; validated against the fixed enum
    pub slot: String,
    pub file: Option<FilePayload>,
}

/// Response from a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Slug assigned to the new mod
    pub slug: String,
    /// Object-store key the file bytes were written under
    pub file_key: String,
    /// Size of the stored file in bytes
    pub size: i64,
    /// Version label of the initial version
    pub version: String,
}

/// Request for the programmatic publish path.
///
/// A trusted integration: the blob is already in the object store under
/// `storage_key`, the slug is caller-chosen, and the creator is
/// provisioned on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub creator: String,
    pub slug: String,
    pub version: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object-store key of the already-written blob; integrations that
    /// predate the storage rename still send `r2_key`
    #[serde(alias = "r2_key")]
    pub storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    /// Hex-encoded sha256 digest, if the integration computed one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    /// Raw slot name; validated against the fixed enum
    pub slot: String,
}

/// Response from a successful publish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    pub mod_id: ModId,
    pub version_id: VersionId,
    pub slug: String,
}

// ============================================================================
// Catalog DTOs
// ============================================================================

/// Raw catalog listing parameters as received from the transport
#[derive(Debug, Clone, Default)]
pub struct ListModsRequest {
    /// Free-text search; blank disables
    pub q: Option<String>,
    /// Sort token: new | title | trending; anything else means new
    pub sort: Option<String>,
    /// Date-window token; unrecognized values disable the filter
    pub date: Option<String>,
    /// Raw slot names; each validated against the fixed enum
    pub slots: Vec<String>,
    /// Requested page size; clamped to [1, 48], default 24
    pub limit: Option<i64>,
    /// Pagination cursor from a previous page
    pub cursor: Option<i64>,
}
