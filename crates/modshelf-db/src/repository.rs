//! Repository trait abstraction for catalog persistence
//!
//! Defines the `CatalogRepository` trait plus the `CatalogQuery` parameter
//! set the catalog listing is composed from. Every filter dimension is
//! independently optional; active dimensions combine with logical AND only.

use async_trait::async_trait;
use modshelf_core::{Creator, CreatorId, ModDetail, ModId, ModSummary, Slot, VersionId};

use crate::error::DbResult;

/// A mod row to insert or upsert
#[derive(Debug, Clone)]
pub struct NewMod {
    pub creator_id: CreatorId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub slot: Slot,
}

/// A version row to append to a mod's history
#[derive(Debug, Clone)]
pub struct NewVersion {
    pub mod_id: ModId,
    pub version: String,
    pub storage_key: String,
    pub file_size: Option<i64>,
    pub content_hash: Option<String>,
    pub changelog: Option<String>,
}

/// Named date windows for latest-version recency filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    LastDay,
    LastWeek,
    LastMonth,
    Last3Months,
    LastYear,
}

impl DateWindow {
    /// Window size in days
    pub fn days(&self) -> i64 {
        match self {
            DateWindow::LastDay => 1,
            DateWindow::LastWeek => 7,
            DateWindow::LastMonth => 30,
            DateWindow::Last3Months => 90,
            DateWindow::LastYear => 365,
        }
    }

    /// Parse a query-string token; unrecognized tokens disable the filter
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "last_day" => Some(DateWindow::LastDay),
            "last_week" => Some(DateWindow::LastWeek),
            "last_month" => Some(DateWindow::LastMonth),
            "last_3_months" => Some(DateWindow::Last3Months),
            "last_year" => Some(DateWindow::LastYear),
            _ => None,
        }
    }
}

/// Catalog sort modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Latest-version time descending (default)
    #[default]
    New,
    /// Title ascending, case-insensitive
    Title,
    /// Ascending distance from now. A placeholder proxy for a real
    /// hotness score, kept deliberately.
    Trending,
}

impl SortMode {
    /// Parse a query-string token, falling back to the default sort
    pub fn from_token(token: &str) -> Self {
        match token {
            "title" => SortMode::Title,
            "trending" => SortMode::Trending,
            _ => SortMode::New,
        }
    }
}

/// Query parameters for the catalog listing.
///
/// `limit` here is the raw fetch bound; the paginator above this layer asks
/// for one extra row to detect whether a next page exists.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    /// Case-insensitive substring match over title, description, and
    /// creator handle. Blank disables the filter.
    pub text: Option<String>,

    /// Restrict to these slots; empty means no restriction
    pub slots: Vec<Slot>,

    /// Latest-version recency window
    pub date: Option<DateWindow>,

    /// Active sort mode
    pub sort: SortMode,

    /// Maximum number of rows to fetch
    pub limit: i64,

    /// Return only rows with id strictly before this one
    pub cursor: Option<ModId>,
}

impl CatalogQuery {
    /// Create a query with no filters and the given fetch bound
    pub fn new(limit: i64) -> Self {
        Self {
            text: None,
            slots: Vec::new(),
            date: None,
            sort: SortMode::default(),
            limit,
            cursor: None,
        }
    }

    /// Set text search filter
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.text = Some(text);
        }
        self
    }

    /// Add a slot filter
    pub fn slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Add several slot filters
    pub fn slots(mut self, slots: impl IntoIterator<Item = Slot>) -> Self {
        self.slots.extend(slots);
        self
    }

    /// Set date window filter
    pub fn date(mut self, window: DateWindow) -> Self {
        self.date = Some(window);
        self
    }

    /// Set sort mode
    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Set the cursor boundary
    pub fn cursor(mut self, cursor: ModId) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

/// Repository trait for catalog persistence operations
///
/// Implementations must be thread-safe (Send + Sync) for use in async
/// contexts.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Find a creator by handle
    async fn find_creator_by_handle(&self, handle: &str) -> DbResult<Option<Creator>>;

    /// Insert a creator if absent and return its id (idempotent upsert)
    async fn ensure_creator(&self, handle: &str) -> DbResult<CreatorId>;

    /// All stored slugs equal to `base` or of the form `base-<suffix>`.
    ///
    /// Input to the collision probe; the caller narrows suffixes itself.
    async fn slugs_matching(&self, base: &str) -> DbResult<Vec<String>>;

    /// Insert a new mod row.
    ///
    /// # Returns
    /// * `Ok(ModId)` - id of the inserted row
    /// * `Err(DbError::UniqueViolation)` - the slug is already taken
    async fn insert_mod(&self, new_mod: &NewMod) -> DbResult<ModId>;

    /// Insert a mod, or update title/description/slot in place when a row
    /// with the same slug already exists. The slug itself never changes.
    async fn upsert_mod_by_slug(&self, new_mod: &NewMod) -> DbResult<ModId>;

    /// Append a version to a mod's history
    async fn insert_version(&self, version: &NewVersion) -> DbResult<VersionId>;

    /// List catalog rows matching the query, ordered per its sort mode and
    /// bounded by its limit. Mods without any version are not listed.
    async fn list_mods(&self, query: &CatalogQuery) -> DbResult<Vec<ModSummary>>;

    /// Fetch a mod with its full version history, newest version first
    async fn find_mod_by_slug(&self, slug: &str) -> DbResult<Option<ModDetail>>;

    /// All known tag names, ordered case-insensitively ascending
    async fn list_tags(&self) -> DbResult<Vec<String>>;

    /// Health check - verify the repository is operational
    async fn health_check(&self) -> DbResult<()>;
}
