//! Catalog read services
//!
//! Translates raw transport parameters into a typed `CatalogQuery`, runs
//! the lookahead fetch, and folds the extra row into a pagination cursor.

use async_trait::async_trait;
use modshelf_core::{ModDetail, ModId, ModSummary, Slot};
use modshelf_db::{CatalogQuery, CatalogRepository, DateWindow, SortMode};
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

use crate::dto::ListModsRequest;
use crate::error::{ServiceError, ServiceResult};
use crate::pagination::{clamp_limit, Page};

/// Trait for catalog read operations
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List catalog entries matching the raw request parameters
    async fn list(&self, request: ListModsRequest) -> ServiceResult<Page<ModSummary>>;

    /// Fetch one mod with its full version history
    async fn detail(&self, slug: &str) -> ServiceResult<ModDetail>;

    /// All known tag names
    async fn tags(&self) -> ServiceResult<Vec<String>>;

    /// Verify the backing catalog store is reachable
    async fn health(&self) -> ServiceResult<()>;
}

/// Default implementation of CatalogService
pub struct DefaultCatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl DefaultCatalogService {
    /// Create a new catalog service
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CatalogService for DefaultCatalogService {
    #[instrument(skip(self, request))]
    async fn list(&self, request: ListModsRequest) -> ServiceResult<Page<ModSummary>> {
        let limit = clamp_limit(request.limit);

        let sort = request
            .sort
            .as_deref()
            .map(|token| SortMode::from_token(&token.to_ascii_lowercase()))
            .unwrap_or_default();

        // Title order does not follow id order, so a cursor cannot mean
        // "strictly before" under it.
        if sort == SortMode::Title && request.cursor.is_some() {
            return Err(ServiceError::InvalidInput(
                "cursor pagination is not supported under title sort".to_string(),
            ));
        }

        let date = request.date.as_deref().and_then(DateWindow::from_token);

        let mut slots = Vec::with_capacity(request.slots.len());
        for raw in &request.slots {
            let slot = Slot::from_str(raw)
                .map_err(|_| ServiceError::InvalidSlot(raw.clone()))?;
            slots.push(slot);
        }

        // Fetch one extra row so the paginator can tell last page from not.
        let mut query = CatalogQuery::new(limit + 1).sort(sort).slots(slots);
        if let Some(q) = request.q {
            query = query.text(q);
        }
        if let Some(window) = date {
            query = query.date(window);
        }
        if let Some(cursor) = request.cursor {
            query = query.cursor(ModId::new(cursor));
        }

        let rows = self.repository.list_mods(&query).await?;
        let page = Page::from_lookahead(rows, limit, |summary| summary.id.value());

        if sort == SortMode::Title {
            Ok(page.without_cursor())
        } else {
            Ok(page)
        }
    }

    #[instrument(skip(self))]
    async fn detail(&self, slug: &str) -> ServiceResult<ModDetail> {
        self.repository
            .find_mod_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::NotFound(slug.to_string()))
    }

    #[instrument(skip(self))]
    async fn tags(&self) -> ServiceResult<Vec<String>> {
        Ok(self.repository.list_tags().await?)
    }

    async fn health(&self) -> ServiceResult<()> {
        Ok(self.repository.health_check().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryCatalog;
    use chrono::{Duration, Utc};

    fn service_with_fixtures() -> (DefaultCatalogService, Arc<MemoryCatalog>) {
        let repo = Arc::new(MemoryCatalog::new());
        let creator = repo.seed_creator("rowe");

        // ids ascend in creation order, so the most recent mod gets the
        // highest id and the recency sorts agree with the id order
        let now = Utc::now();
        repo.seed_mod(creator, "older-hair", "Banana Hair", Slot::Hair, now - Duration::days(40));
        repo.seed_mod(creator, "old-top", "apple Top", Slot::Top, now - Duration::days(2));
        repo.seed_mod(creator, "fresh-hat", "Zebra Hat", Slot::Hat, now - Duration::hours(2));

        (DefaultCatalogService::new(repo.clone()), repo)
    }

    fn slugs(page: &Page<ModSummary>) -> Vec<&str> {
        page.items.iter().map(|m| m.slug.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_without_filters_returns_all_slots() {
        let (service, _) = service_with_fixtures();

        let page = service.list(ListModsRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.next_cursor, None);
        // default sort: latest version first
        assert_eq!(slugs(&page), vec!["fresh-hat", "old-top", "older-hair"]);
    }

    #[tokio::test]
    async fn test_slot_filter_restricts_results() {
        let (service, _) = service_with_fixtures();

        let request = ListModsRequest {
            slots: vec!["Hat".to_string()],
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        assert_eq!(slugs(&page), vec!["fresh-hat"]);

        let request = ListModsRequest {
            slots: vec!["Hat".to_string(), "Hair".to_string()],
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_slot_rejected() {
        let (service, _) = service_with_fixtures();

        let request = ListModsRequest {
            slots: vec!["Cape".to_string()],
            ..Default::default()
        };
        let err = service.list(request).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidSlot(ref s) if s == "Cape"));
    }

    #[tokio::test]
    async fn test_limit_two_of_three_yields_cursor() {
        let (service, _) = service_with_fixtures();

        let request = ListModsRequest {
            limit: Some(2),
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        assert_eq!(page.items.len(), 2);
        let cursor = page.next_cursor.expect("next page exists");
        assert_eq!(cursor, page.items[1].id.value());

        // second page picks up strictly after the boundary
        let request = ListModsRequest {
            limit: Some(2),
            cursor: Some(cursor),
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        assert_eq!(slugs(&page), vec!["older-hair"]);
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn test_limit_matching_total_is_final_page() {
        let (service, _) = service_with_fixtures();

        let request = ListModsRequest {
            limit: Some(3),
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn test_title_sort_is_case_insensitive_and_cursorless() {
        let (service, _) = service_with_fixtures();

        let request = ListModsRequest {
            sort: Some("title".to_string()),
            limit: Some(2),
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        // "apple Top" sorts before "Banana Hair" despite the lowercase a
        assert_eq!(slugs(&page), vec!["old-top", "older-hair"]);
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn test_cursor_under_title_sort_rejected() {
        let (service, _) = service_with_fixtures();

        let request = ListModsRequest {
            sort: Some("title".to_string()),
            cursor: Some(10),
            ..Default::default()
        };
        let err = service.list(request).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unknown_sort_falls_back_to_new() {
        let (service, _) = service_with_fixtures();

        let request = ListModsRequest {
            sort: Some("hotness".to_string()),
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        assert_eq!(slugs(&page), vec!["fresh-hat", "old-top", "older-hair"]);
    }

    #[tokio::test]
    async fn test_last_day_window_filters_on_latest_version() {
        let (service, _) = service_with_fixtures();

        let request = ListModsRequest {
            date: Some("last_day".to_string()),
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        // the 2-hour-old mod passes, the 2-day-old one does not
        assert_eq!(slugs(&page), vec!["fresh-hat"]);
    }

    #[tokio::test]
    async fn test_unrecognized_date_token_disables_filter() {
        let (service, _) = service_with_fixtures();

        let request = ListModsRequest {
            date: Some("yesterday".to_string()),
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        assert_eq!(page.items.len(), 3);
    }

    #[tokio::test]
    async fn test_text_search_matches_creator_handle() {
        let (service, _) = service_with_fixtures();

        let request = ListModsRequest {
            q: Some("rowe".to_string()),
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        assert_eq!(page.items.len(), 3);

        let request = ListModsRequest {
            q: Some("zebra".to_string()),
            ..Default::default()
        };
        let page = service.list(request).await.unwrap();
        assert_eq!(slugs(&page), vec!["fresh-hat"]);
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let (service, _) = service_with_fixtures();

        let err = service.detail("no-such-mod").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref s) if s == "no-such-mod"));

        let detail = service.detail("fresh-hat").await.unwrap();
        assert_eq!(detail.title, "Zebra Hat");
        assert_eq!(detail.versions.len(), 1);
    }

    #[tokio::test]
    async fn test_tags_pass_through() {
        let (service, repo) = service_with_fixtures();
        repo.seed_tag("cute");
        repo.seed_tag("Armor");

        let tags = service.tags().await.unwrap();
        assert_eq!(tags, vec!["Armor".to_string(), "cute".to_string()]);
    }
}
