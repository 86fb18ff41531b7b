//! Catalog domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::slot::Slot;
use crate::types::{CreatorId, ModId, VersionId};

/// A registered creator.
///
/// Created lazily on first publish (programmatic path only) and never
/// deleted by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: CreatorId,
    /// Unique, human-chosen handle
    pub handle: String,
    pub is_verified: bool,
}

/// The logical content entry owning a lifecycle of versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mod {
    pub id: ModId,
    /// Unique, URL-safe identifier; immutable once assigned
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub slot: Slot,
    pub creator_id: CreatorId,
    pub created_at: DateTime<Utc>,
}

/// One published file bundle of a mod.
///
/// Append-only: versions are never mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModVersion {
    pub id: VersionId,
    pub mod_id: ModId,
    /// Version label as supplied by the publisher, e.g. "1.0.0"
    pub version: String,
    /// Key into the object store; unique per version
    pub storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    /// Optional sha256 integrity digest, hex-encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A catalog listing row: a mod annotated with its creator handle,
/// latest-version time, and total version count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModSummary {
    pub id: ModId,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub slot: Slot,
    /// Owning creator's handle
    pub creator: String,
    /// Timestamp of the most recently created version
    pub last_version_at: DateTime<Utc>,
    pub version_count: i64,
}

/// Full mod detail: metadata plus version history ordered newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModDetail {
    pub id: ModId,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub slot: Slot,
    pub creator: String,
    pub created_at: DateTime<Utc>,
    pub versions: Vec<ModVersion>,
}
