//! In-memory fakes for service tests
//!
//! `MemoryCatalog` mirrors the persistence contract closely enough to
//! exercise the services: slug uniqueness, zero-version mods hidden from
//! listings, and all filter and sort dimensions evaluated in memory.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use modshelf_core::{
    Creator, CreatorId, Mod, ModDetail, ModId, ModSummary, ModVersion, Slot, VersionId,
};
use modshelf_db::{
    CatalogQuery, CatalogRepository, DbError, DbResult, NewMod, NewVersion, SortMode,
};
use modshelf_storage::{ObjectStore, StorageResult, StoredObject};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    creators: Vec<Creator>,
    mods: Vec<Mod>,
    versions: Vec<ModVersion>,
    tags: Vec<String>,
    next_creator_id: i64,
    next_mod_id: i64,
    next_version_id: i64,
    /// Remaining insert_mod calls to fail with a unique violation
    pending_conflicts: usize,
}

/// In-memory `CatalogRepository` for service tests
#[derive(Default)]
pub struct MemoryCatalog {
    state: Mutex<State>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a creator directly, bypassing the publish path
    pub fn seed_creator(&self, handle: &str) -> CreatorId {
        let mut state = self.state.lock().unwrap();
        state.next_creator_id += 1;
        let id = CreatorId::new(state.next_creator_id);
        state.creators.push(Creator {
            id,
            handle: handle.to_string(),
            is_verified: false,
        });
        id
    }

    /// Insert a mod with one version whose created_at is `last_version_at`
    pub fn seed_mod(
        &self,
        creator_id: CreatorId,
        slug: &str,
        title: &str,
        slot: Slot,
        last_version_at: DateTime<Utc>,
    ) -> ModId {
        let mut state = self.state.lock().unwrap();
        state.next_mod_id += 1;
        let mod_id = ModId::new(state.next_mod_id);
        state.mods.push(Mod {
            id: mod_id,
            slug: slug.to_string(),
            title: title.to_string(),
            description: None,
            slot,
            creator_id,
            created_at: last_version_at,
        });
        state.next_version_id += 1;
        let version_id = VersionId::new(state.next_version_id);
        state.versions.push(ModVersion {
            id: version_id,
            mod_id,
            version: "1.0.0".to_string(),
            storage_key: format!("{}/{}/seed.zip", slot.key_segment(), slug),
            file_size: Some(1),
            content_hash: None,
            changelog: None,
            created_at: last_version_at,
        });
        mod_id
    }

    pub fn seed_tag(&self, name: &str) {
        self.state.lock().unwrap().tags.push(name.to_string());
    }

    /// Make the next `count` insert_mod calls fail with a unique violation
    pub fn inject_conflicts(&self, count: usize) {
        self.state.lock().unwrap().pending_conflicts = count;
    }

    pub fn creator_count(&self) -> usize {
        self.state.lock().unwrap().creators.len()
    }

    pub fn mod_count(&self) -> usize {
        self.state.lock().unwrap().mods.len()
    }

    pub fn version_count(&self) -> usize {
        self.state.lock().unwrap().versions.len()
    }
}

fn summarize(state: &State, m: &Mod) -> Option<ModSummary> {
    let creator = state.creators.iter().find(|c| c.id == m.creator_id)?;
    let versions: Vec<&ModVersion> = state
        .versions
        .iter()
        .filter(|v| v.mod_id == m.id)
        .collect();
    // zero-version mods never appear in listings
    let last_version_at = versions.iter().map(|v| v.created_at).max()?;
    Some(ModSummary {
        id: m.id,
        slug: m.slug.clone(),
        title: m.title.clone(),
        description: m.description.clone(),
        slot: m.slot,
        creator: creator.handle.clone(),
        last_version_at,
        version_count: versions.len() as i64,
    })
}

fn matches_text(summary: &ModSummary, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    summary.title.to_lowercase().contains(&needle)
        || summary
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        || summary.creator.to_lowercase().contains(&needle)
}

#[async_trait]
impl CatalogRepository for MemoryCatalog {
    async fn find_creator_by_handle(&self, handle: &str) -> DbResult<Option<Creator>> {
        let state = self.state.lock().unwrap();
        Ok(state.creators.iter().find(|c| c.handle == handle).cloned())
    }

    async fn ensure_creator(&self, handle: &str) -> DbResult<CreatorId> {
        if let Some(creator) = self.find_creator_by_handle(handle).await? {
            return Ok(creator.id);
        }
        Ok(self.seed_creator(handle))
    }

    async fn slugs_matching(&self, base: &str) -> DbResult<Vec<String>> {
        let state = self.state.lock().unwrap();
        let prefix = format!("{base}-");
        Ok(state
            .mods
            .iter()
            .map(|m| m.slug.clone())
            .filter(|s| s == base || s.starts_with(&prefix))
            .collect())
    }

    async fn insert_mod(&self, new_mod: &NewMod) -> DbResult<ModId> {
        let mut state = self.state.lock().unwrap();
        if state.pending_conflicts > 0 {
            state.pending_conflicts -= 1;
            return Err(DbError::UniqueViolation(format!(
                "duplicate key value violates unique constraint \"mods_slug_key\": {}",
                new_mod.slug
            )));
        }
        if state.mods.iter().any(|m| m.slug == new_mod.slug) {
            return Err(DbError::UniqueViolation(new_mod.slug.clone()));
        }
        state.next_mod_id += 1;
        let id = ModId::new(state.next_mod_id);
        state.mods.push(Mod {
            id,
            slug: new_mod.slug.clone(),
            title: new_mod.title.clone(),
            description: new_mod.description.clone(),
            slot: new_mod.slot,
            creator_id: new_mod.creator_id,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn upsert_mod_by_slug(&self, new_mod: &NewMod) -> DbResult<ModId> {
        {
            let mut state = self.state.lock().unwrap();
            if let Some(existing) = state.mods.iter_mut().find(|m| m.slug == new_mod.slug) {
                existing.title = new_mod.title.clone();
                existing.description = new_mod.description.clone();
                existing.slot = new_mod.slot;
                return Ok(existing.id);
            }
        }
        self.insert_mod(new_mod).await
    }

    async fn insert_version(&self, version: &NewVersion) -> DbResult<VersionId> {
        let mut state = self.state.lock().unwrap();
        if !state.mods.iter().any(|m| m.id == version.mod_id) {
            return Err(DbError::ForeignKeyViolation(format!(
                "no mod with id {}",
                version.mod_id
            )));
        }
        state.next_version_id += 1;
        let id = VersionId::new(state.next_version_id);
        state.versions.push(ModVersion {
            id,
            mod_id: version.mod_id,
            version: version.version.clone(),
            storage_key: version.storage_key.clone(),
            file_size: version.file_size,
            content_hash: version.content_hash.clone(),
            changelog: version.changelog.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_mods(&self, query: &CatalogQuery) -> DbResult<Vec<ModSummary>> {
        let state = self.state.lock().unwrap();
        let now = Utc::now();

        let mut rows: Vec<ModSummary> = state
            .mods
            .iter()
            .filter_map(|m| summarize(&state, m))
            .filter(|s| {
                query
                    .text
                    .as_deref()
                    .map_or(true, |needle| matches_text(s, needle))
            })
            .filter(|s| query.slots.is_empty() || query.slots.contains(&s.slot))
            .filter(|s| {
                query.date.map_or(true, |window| {
                    s.last_version_at >= now - Duration::days(window.days())
                })
            })
            .filter(|s| query.cursor.map_or(true, |cursor| s.id < cursor))
            .collect();

        match query.sort {
            SortMode::New | SortMode::Trending => {
                rows.sort_by(|a, b| {
                    b.last_version_at
                        .cmp(&a.last_version_at)
                        .then(b.id.cmp(&a.id))
                });
            }
            SortMode::Title => {
                rows.sort_by(|a, b| {
                    a.title
                        .to_lowercase()
                        .cmp(&b.title.to_lowercase())
                        .then(a.id.cmp(&b.id))
                });
            }
        }

        rows.truncate(query.limit.max(0) as usize);
        Ok(rows)
    }

    async fn find_mod_by_slug(&self, slug: &str) -> DbResult<Option<ModDetail>> {
        let state = self.state.lock().unwrap();
        let Some(m) = state.mods.iter().find(|m| m.slug == slug) else {
            return Ok(None);
        };
        let creator = state
            .creators
            .iter()
            .find(|c| c.id == m.creator_id)
            .map(|c| c.handle.clone())
            .unwrap_or_default();
        let mut versions: Vec<ModVersion> = state
            .versions
            .iter()
            .filter(|v| v.mod_id == m.id)
            .cloned()
            .collect();
        versions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(Some(ModDetail {
            id: m.id,
            slug: m.slug.clone(),
            title: m.title.clone(),
            description: m.description.clone(),
            slot: m.slot,
            creator,
            created_at: m.created_at,
            versions,
        }))
    }

    async fn list_tags(&self) -> DbResult<Vec<String>> {
        let mut tags = self.state.lock().unwrap().tags.clone();
        tags.sort_by_key(|t| t.to_lowercase());
        Ok(tags)
    }

    async fn health_check(&self) -> DbResult<()> {
        Ok(())
    }
}

/// Object store whose writes always fail
pub struct FailingObjectStore;

#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn put(&self, _key: &str, _data: Bytes, _content_type: Option<&str>) -> StorageResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        Err(modshelf_storage::StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, _key: &str) -> StorageResult<bool> {
        Ok(false)
    }
}
