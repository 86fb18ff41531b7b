//! Response body types

use chrono::{DateTime, Utc};
use modshelf_core::{ModId, VersionId};
use serde::{Deserialize, Serialize};

/// One page of catalog results
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    /// Cursor for the next page; explicitly null on the last page
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<i64>,
}

/// Body returned by a successful upload
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadedResponse {
    pub success: bool,
    pub slug: String,
    #[serde(rename = "fileKey")]
    pub file_key: String,
    pub size: i64,
    pub version: String,
}

/// Body returned by a successful publish
#[derive(Debug, Serialize, Deserialize)]
pub struct PublishedResponse {
    pub ok: bool,
    pub mod_id: ModId,
    pub version_id: VersionId,
    pub slug: String,
}

/// Tag listing body
#[derive(Debug, Serialize, Deserialize)]
pub struct TagsResponse {
    pub items: Vec<String>,
}

/// Liveness probe body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
