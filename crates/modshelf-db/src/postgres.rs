//! PostgreSQL implementation of CatalogRepository
//!
//! The catalog listing is composed dynamically with `sqlx::QueryBuilder`:
//! each active filter dimension contributes one AND clause, and the sort
//! mode picks the ORDER BY expression. Latest-version times come from a
//! grouped join on `mod_versions`, which also hides mods that have no
//! version yet.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use modshelf_core::{Creator, CreatorId, ModDetail, ModId, ModSummary, ModVersion, Slot, VersionId};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::error::{DbError, DbResult};
use crate::repository::{CatalogQuery, CatalogRepository, NewMod, NewVersion, SortMode};

/// PostgreSQL implementation of CatalogRepository
#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Create a new PostgreSQL catalog repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Escape LIKE wildcards so a pattern matches them literally
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Compose the catalog listing query from the active filter dimensions.
///
/// Filters combine with AND only; with no filters active this degenerates
/// to the full catalog in the query's sort order.
fn build_list_query(query: &CatalogQuery, now: DateTime<Utc>) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT m.id, m.slug, m.title, m.description, m.slot, \
         c.handle AS creator, l.last_version_at, \
         (SELECT COUNT(*) FROM mod_versions v WHERE v.mod_id = m.id) AS version_count \
         FROM mods m \
         JOIN creators c ON c.id = m.creator_id \
         JOIN (SELECT mod_id, MAX(created_at) AS last_version_at \
               FROM mod_versions GROUP BY mod_id) l ON l.mod_id = m.id \
         WHERE 1=1",
    );

    if let Some(ref text) = query.text {
        let like = format!("%{}%", escape_like(text.trim()));
        qb.push(" AND (m.title ILIKE ");
        qb.push_bind(like.clone());
        qb.push(" OR m.description ILIKE ");
        qb.push_bind(like.clone());
        qb.push(" OR c.handle ILIKE ");
        qb.push_bind(like);
        qb.push(")");
    }

    if !query.slots.is_empty() {
        let names: Vec<String> = query.slots.iter().map(|s| s.as_str().to_string()).collect();
        qb.push(" AND m.slot = ANY(");
        qb.push_bind(names);
        qb.push(")");
    }

    if let Some(window) = query.date {
        let since = now - Duration::days(window.days());
        qb.push(" AND l.last_version_at >= ");
        qb.push_bind(since);
    }

    if let Some(cursor) = query.cursor {
        qb.push(" AND m.id < ");
        qb.push_bind(cursor.value());
    }

    match query.sort {
        SortMode::New => {
            qb.push(" ORDER BY l.last_version_at DESC, m.id DESC");
        }
        SortMode::Title => {
            qb.push(" ORDER BY LOWER(m.title) ASC, m.id ASC");
        }
        SortMode::Trending => {
            // Placeholder hotness proxy: smallest distance from now first.
            qb.push(" ORDER BY EXTRACT(EPOCH FROM (");
            qb.push_bind(now);
            qb.push(" - l.last_version_at)) ASC, m.id DESC");
        }
    }

    qb.push(" LIMIT ");
    qb.push_bind(query.limit);

    qb
}

/// Map a listing row to a ModSummary
fn row_to_summary(row: &PgRow) -> DbResult<ModSummary> {
    let slot_name: String = row.try_get("slot")?;
    let slot = Slot::from_str(&slot_name).map_err(DbError::InvalidData)?;

    Ok(ModSummary {
        id: ModId::new(row.try_get("id")?),
        slug: row.try_get("slug")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        slot,
        creator: row.try_get("creator")?,
        last_version_at: row.try_get("last_version_at")?,
        version_count: row.try_get("version_count")?,
    })
}

/// Map a version row to a ModVersion
fn row_to_version(row: &PgRow) -> DbResult<ModVersion> {
    Ok(ModVersion {
        id: VersionId::new(row.try_get("id")?),
        mod_id: ModId::new(row.try_get("mod_id")?),
        version: row.try_get("version")?,
        storage_key: row.try_get("storage_key")?,
        file_size: row.try_get("file_size")?,
        content_hash: row.try_get("content_hash")?,
        changelog: row.try_get("changelog")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl CatalogRepository for PostgresCatalog {
    #[instrument(skip(self))]
    async fn find_creator_by_handle(&self, handle: &str) -> DbResult<Option<Creator>> {
        debug!("Finding creator by handle");

        let row = sqlx::query(
            "SELECT id, handle, is_verified FROM creators WHERE handle = $1",
        )
        .bind(handle)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            Ok::<_, DbError>(Creator {
                id: CreatorId::new(row.try_get("id")?),
                handle: row.try_get("handle")?,
                is_verified: row.try_get("is_verified")?,
            })
        })
        .transpose()?)
    }

    #[instrument(skip(self))]
    async fn ensure_creator(&self, handle: &str) -> DbResult<CreatorId> {
        debug!("Ensuring creator exists");

        sqlx::query(
            "INSERT INTO creators (handle, is_verified) VALUES ($1, FALSE) \
             ON CONFLICT (handle) DO NOTHING",
        )
        .bind(handle)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query("SELECT id FROM creators WHERE handle = $1")
            .bind(handle)
            .fetch_one(&self.pool)
            .await?;

        Ok(CreatorId::new(row.try_get("id")?))
    }

    #[instrument(skip(self))]
    async fn slugs_matching(&self, base: &str) -> DbResult<Vec<String>> {
        let pattern = format!("{}-%", escape_like(base));

        let rows = sqlx::query("SELECT slug FROM mods WHERE slug = $1 OR slug LIKE $2")
            .bind(base)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("slug").map_err(DbError::from))
            .collect()
    }

    #[instrument(skip(self, new_mod), fields(slug = %new_mod.slug))]
    async fn insert_mod(&self, new_mod: &NewMod) -> DbResult<ModId> {
        debug!("Inserting mod");

        let row = sqlx::query(
            "INSERT INTO mods (creator_id, slug, title, description, slot) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(new_mod.creator_id.value())
        .bind(&new_mod.slug)
        .bind(&new_mod.title)
        .bind(&new_mod.description)
        .bind(new_mod.slot.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(ModId::new(row.try_get("id")?))
    }

    #[instrument(skip(self, new_mod), fields(slug = %new_mod.slug))]
    async fn upsert_mod_by_slug(&self, new_mod: &NewMod) -> DbResult<ModId> {
        debug!("Upserting mod by slug");

        // Republish semantics: metadata is mutable, the slug and the
        // original creator binding are not.
        let row = sqlx::query(
            "INSERT INTO mods (creator_id, slug, title, description, slot) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (slug) DO UPDATE SET \
               title = EXCLUDED.title, \
               description = EXCLUDED.description, \
               slot = EXCLUDED.slot \
             RETURNING id",
        )
        .bind(new_mod.creator_id.value())
        .bind(&new_mod.slug)
        .bind(&new_mod.title)
        .bind(&new_mod.description)
        .bind(new_mod.slot.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(ModId::new(row.try_get("id")?))
    }

    #[instrument(skip(self, version), fields(mod_id = %version.mod_id, version = %version.version))]
    async fn insert_version(&self, version: &NewVersion) -> DbResult<VersionId> {
        debug!("Appending mod version");

        let row = sqlx::query(
            "INSERT INTO mod_versions \
             (mod_id, version, storage_key, file_size, content_hash, changelog) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(version.mod_id.value())
        .bind(&version.version)
        .bind(&version.storage_key)
        .bind(version.file_size)
        .bind(&version.content_hash)
        .bind(&version.changelog)
        .fetch_one(&self.pool)
        .await?;

        Ok(VersionId::new(row.try_get("id")?))
    }

    #[instrument(skip(self, query))]
    async fn list_mods(&self, query: &CatalogQuery) -> DbResult<Vec<ModSummary>> {
        debug!("Listing mods with filters");

        let mut qb = build_list_query(query, Utc::now());
        let rows = qb.build().fetch_all(&self.pool).await?;

        rows.iter().map(row_to_summary).collect()
    }

    #[instrument(skip(self))]
    async fn find_mod_by_slug(&self, slug: &str) -> DbResult<Option<ModDetail>> {
        debug!("Fetching mod detail");

        let row = sqlx::query(
            "SELECT m.id, m.slug, m.title, m.description, m.slot, m.created_at, \
             c.handle AS creator \
             FROM mods m \
             JOIN creators c ON c.id = m.creator_id \
             WHERE m.slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let slot_name: String = row.try_get("slot")?;
        let slot = Slot::from_str(&slot_name).map_err(DbError::InvalidData)?;
        let id = ModId::new(row.try_get("id")?);

        let version_rows = sqlx::query(
            "SELECT id, mod_id, version, storage_key, file_size, content_hash, \
             changelog, created_at \
             FROM mod_versions \
             WHERE mod_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(id.value())
        .fetch_all(&self.pool)
        .await?;

        let versions = version_rows
            .iter()
            .map(row_to_version)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Some(ModDetail {
            id,
            slug: row.try_get("slug")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            slot,
            creator: row.try_get("creator")?,
            created_at: row.try_get("created_at")?,
            versions,
        }))
    }

    #[instrument(skip(self))]
    async fn list_tags(&self) -> DbResult<Vec<String>> {
        let rows = sqlx::query("SELECT name FROM tags ORDER BY LOWER(name) ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(DbError::from))
            .collect()
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
