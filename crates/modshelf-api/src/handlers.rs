//! API request handlers
//!
//! This module implements HTTP request handlers for all API endpoints.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use modshelf_core::{ModDetail, ModSummary};
use modshelf_service::{
    FilePayload, ListModsRequest, Page, PublishRequest, ServiceRegistry, UploadRequest,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    error::{ApiError, ApiResult},
    responses::{HealthResponse, ListResponse, PublishedResponse, TagsResponse, UploadedResponse},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Service registry
    pub services: Arc<ServiceRegistry>,
}

impl AppState {
    /// Create new application state
    pub fn new(services: ServiceRegistry) -> Self {
        Self {
            services: Arc::new(services),
        }
    }
}

/// Fold raw query-string pairs into a listing request.
///
/// `slot` may repeat, which rules out deserializing straight into a
/// struct; everything else is last-value-wins.
pub fn parse_list_params(pairs: &[(String, String)]) -> ApiResult<ListModsRequest> {
    let mut request = ListModsRequest::default();

    for (key, value) in pairs {
        match key.as_str() {
            "q" => request.q = Some(value.clone()),
            "sort" => request.sort = Some(value.clone()),
            "date" => request.date = Some(value.clone()),
            "slot" => request.slots.push(value.clone()),
            "limit" => {
                let limit = value
                    .parse::<i64>()
                    .map_err(|_| ApiError::bad_request(format!("Invalid limit: {}", value)))?;
                request.limit = Some(limit);
            }
            "cursor" => {
                let cursor = value
                    .parse::<i64>()
                    .map_err(|_| ApiError::bad_request(format!("Invalid cursor: {}", value)))?;
                request.cursor = Some(cursor);
            }
            _ => {}
        }
    }

    Ok(request)
}

// ============================================================================
// Catalog handlers
// ============================================================================

/// List catalog entries
#[instrument(skip(state))]
pub async fn list_mods(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<ListResponse<ModSummary>>> {
    debug!("Listing mods with {} raw parameters", params.len());

    let request = parse_list_params(&params)?;
    let page: Page<ModSummary> = state.services.catalog.list(request).await?;

    Ok(Json(ListResponse {
        items: page.items,
        next_cursor: page.next_cursor,
    }))
}

/// Get one mod with its version history
#[instrument(skip(state))]
pub async fn get_mod(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<ModDetail>> {
    debug!("Getting mod: {}", slug);

    let detail = state.services.catalog.detail(&slug).await?;
    Ok(Json(detail))
}

/// List all known tags
#[instrument(skip(state))]
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<TagsResponse>> {
    let items = state.services.catalog.tags().await?;
    Ok(Json(TagsResponse { items }))
}

// ============================================================================
// Publish handlers
// ============================================================================

/// End-user upload: multipart form with creator, title, slot, optional
/// description, and the file itself
#[instrument(skip(state, multipart))]
pub async fn upload_mod(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadedResponse>)> {
    let mut request = UploadRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or("").to_string();
            let content_type = field.content_type().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?;
            request.file = Some(FilePayload {
                name: file_name,
                content_type,
                data,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read field {}: {}", name, e)))?;

        match name.as_str() {
            "creator" => request.creator = value,
            "title" => request.title = value,
            "description" => request.description = Some(value),
            "slot" => request.slot = value,
            _ => {}
        }
    }

    info!(creator = %request.creator, title = %request.title, "Upload received");

    let response = state.services.publish.upload(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadedResponse {
            success: true,
            slug: response.slug,
            file_key: response.file_key,
            size: response.size,
            version: response.version,
        }),
    ))
}

/// Programmatic publish of an already-stored bundle
#[instrument(skip(state, request), fields(slug = %request.slug, version = %request.version))]
pub async fn publish_mod(
    State(state): State<AppState>,
    Json(request): Json<PublishRequest>,
) -> ApiResult<Json<PublishedResponse>> {
    info!("Publishing {}@{}", request.slug, request.version);

    let response = state.services.publish.publish(request).await?;

    Ok(Json(PublishedResponse {
        ok: true,
        mod_id: response.mod_id,
        version_id: response.version_id,
        slug: response.slug,
    }))
}

// ============================================================================
// Health
// ============================================================================

/// Liveness probe with a catalog-store reachability check
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.services.catalog.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                timestamp: chrono::Utc::now(),
            }),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    timestamp: chrono::Utc::now(),
                }),
            )
        }
    }
}
