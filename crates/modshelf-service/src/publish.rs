//! Publish workflow
//!
//! Orchestrates creator resolution, slug assignment, the object-store
//! write, and the mod + version catalog insert as one logical unit. Not
//! transactional across the two stores: the blob write happens-before any
//! catalog write, so a crash in between leaves an orphaned blob but never
//! a catalog row pointing at a missing file.

use async_trait::async_trait;
use bytes::Bytes;
use modshelf_core::{derive_base_slug, is_valid_slug, resolve_unique_slug, CreatorId, Slot};
use modshelf_db::{CatalogRepository, NewMod, NewVersion};
use modshelf_storage::ObjectStore;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::dto::{PublishRequest, PublishResponse, UploadRequest, UploadResponse};
use crate::error::{ServiceError, ServiceResult};

/// Version label assigned to the first upload of a mod
const INITIAL_VERSION: &str = "1.0.0";

/// Changelog recorded for the first upload of a mod
const INITIAL_CHANGELOG: &str = "Initial upload";

/// Trait for the publish workflow
#[async_trait]
pub trait PublishService: Send + Sync {
    /// End-user upload path: derives a fresh slug from the title, writes
    /// the file bytes, and creates a mod with its initial version. The
    /// creator must already be registered.
    async fn upload(&self, request: UploadRequest) -> ServiceResult<UploadResponse>;

    /// Programmatic publish path: creator provisioned on demand, slug
    /// caller-chosen, blob already written by the integration. Creates the
    /// mod if the slug is new, otherwise updates its metadata in place,
    /// and appends the version either way.
    async fn publish(&self, request: PublishRequest) -> ServiceResult<PublishResponse>;
}

/// Default implementation of PublishService
pub struct DefaultPublishService {
    repository: Arc<dyn CatalogRepository>,
    store: Arc<dyn ObjectStore>,
}

impl DefaultPublishService {
    /// Create a new publish service
    pub fn new(repository: Arc<dyn CatalogRepository>, store: Arc<dyn ObjectStore>) -> Self {
        Self { repository, store }
    }

    /// Resolve a free slug for the title from the current catalog state
    async fn resolve_slug(&self, base: &str) -> ServiceResult<String> {
        let existing: HashSet<String> = self
            .repository
            .slugs_matching(base)
            .await?
            .into_iter()
            .collect();
        Ok(resolve_unique_slug(base, &existing))
    }
}

/// Reject blank required fields
fn require<'a>(value: &'a str, field: &'static str) -> ServiceResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::MissingField(field));
    }
    Ok(trimmed)
}

/// Parse a raw slot name against the fixed enum
fn parse_slot(raw: &str) -> ServiceResult<Slot> {
    Slot::from_str(raw).map_err(|_| ServiceError::InvalidSlot(raw.to_string()))
}

/// Reduce a declared file name to its final path segment.
///
/// Uploaders can declare anything; only the basename participates in the
/// object-store key.
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        "file.bin".to_string()
    } else {
        base.to_string()
    }
}

/// Hex-encoded sha256 of the file bytes
fn content_hash(data: &Bytes) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[async_trait]
impl PublishService for DefaultPublishService {
    #[instrument(skip(self, request), fields(creator = %request.creator, title = %request.title))]
    async fn upload(&self, request: UploadRequest) -> ServiceResult<UploadResponse> {
        // Validation, in order; each failure aborts with no side effect.
        let creator_handle = require(&request.creator, "creator")?.to_string();
        let title = require(&request.title, "title")?.to_string();
        let slot_raw = require(&request.slot, "slot")?.to_string();
        let file = request.file.ok_or(ServiceError::MissingField("file"))?;

        let slot = parse_slot(&slot_raw)?;

        if file.data.is_empty() {
            return Err(ServiceError::EmptyFile);
        }

        // The upload path trusts only pre-registered creators.
        let creator = self
            .repository
            .find_creator_by_handle(&creator_handle)
            .await?
            .ok_or_else(|| ServiceError::UnknownCreator(creator_handle.clone()))?;

        let base = derive_base_slug(&title);
        let file_name = sanitize_file_name(&file.name);
        let size = file.data.len() as i64;
        let hash = content_hash(&file.data);

        // The unique index on mods.slug is the sole arbiter of slug races:
        // if a concurrent publish wins the probe, re-resolve once and try
        // again before reporting the conflict.
        let mut last_slug = String::new();
        for attempt in 0..2 {
            let slug = self.resolve_slug(&base).await?;
            let file_key = format!("{}/{}/{}", slot.key_segment(), slug, file_name);

            // Blob write happens-before any catalog write.
            self.store
                .put(&file_key, file.data.clone(), file.content_type.as_deref())
                .await?;

            let new_mod = NewMod {
                creator_id: creator.id,
                slug: slug.clone(),
                title: title.clone(),
                description: request.description.clone(),
                slot,
            };

            let mod_id = match self.repository.insert_mod(&new_mod).await {
                Ok(id) => id,
                Err(e) if e.is_unique_violation() => {
                    warn!(slug = %slug, attempt, "slug taken by concurrent publish");
                    last_slug = slug;
                    continue;
                }
                Err(e) => return Err(ServiceError::CatalogWriteFailed(e.to_string())),
            };

            let version = NewVersion {
                mod_id,
                version: INITIAL_VERSION.to_string(),
                storage_key: file_key.clone(),
                file_size: Some(size),
                content_hash: Some(hash.clone()),
                changelog: Some(INITIAL_CHANGELOG.to_string()),
            };

            self.repository
                .insert_version(&version)
                .await
                .map_err(|e| ServiceError::CatalogWriteFailed(e.to_string()))?;

            info!(slug = %slug, mod_id = %mod_id, "mod uploaded");

            return Ok(UploadResponse {
                slug,
                file_key,
                size,
                version: INITIAL_VERSION.to_string(),
            });
        }

        Err(ServiceError::SlugConflict(last_slug))
    }

    #[instrument(skip(self, request), fields(slug = %request.slug, version = %request.version))]
    async fn publish(&self, request: PublishRequest) -> ServiceResult<PublishResponse> {
        let creator_handle = require(&request.creator, "creator")?.to_string();
        let slug = require(&request.slug, "slug")?.to_string();
        let version_label = require(&request.version, "version")?.to_string();
        let title = require(&request.title, "title")?.to_string();
        let storage_key = require(&request.storage_key, "storage_key")?.to_string();
        let slot_raw = require(&request.slot, "slot")?.to_string();

        let slot = parse_slot(&slot_raw)?;

        if !is_valid_slug(&slug) {
            return Err(ServiceError::InvalidSlug(slug));
        }

        if request.file_size == Some(0) {
            return Err(ServiceError::EmptyFile);
        }

        // Trusted integration: provision the creator on demand.
        let creator_id: CreatorId = self.repository.ensure_creator(&creator_handle).await?;

        // Republish semantics: metadata mutable, slug immutable.
        let new_mod = NewMod {
            creator_id,
            slug: slug.clone(),
            title,
            description: request.description.clone(),
            slot,
        };

        let mod_id = self
            .repository
            .upsert_mod_by_slug(&new_mod)
            .await
            .map_err(|e| ServiceError::CatalogWriteFailed(e.to_string()))?;

        let version = NewVersion {
            mod_id,
            version: version_label,
            storage_key,
            file_size: request.file_size,
            content_hash: request.sha256.clone(),
            changelog: request.changelog.clone(),
        };

        let version_id = self
            .repository
            .insert_version(&version)
            .await
            .map_err(|e| ServiceError::CatalogWriteFailed(e.to_string()))?;

        info!(slug = %slug, mod_id = %mod_id, "version published");

        Ok(PublishResponse {
            mod_id,
            version_id,
            slug,
        })
    }
}
