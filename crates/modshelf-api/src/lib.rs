//! Modshelf API Layer
//!
//! This crate provides the REST API layer for the Modshelf catalog using
//! Axum. It includes request handlers, error handling, and response types.
//!
//! # Architecture
//!
//! The API layer is organized into:
//!
//! - **Handlers**: Request handlers for all API endpoints
//! - **Routes**: Route definitions and router configuration
//! - **Error Handling**: Conversion of service errors to HTTP responses
//! - **Responses**: Response body types

pub mod error;
pub mod handlers;
pub mod responses;
pub mod routes;

// Re-export main types for convenience
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::AppState;
pub use responses::{
    HealthResponse, ListResponse, PublishedResponse, TagsResponse, UploadedResponse,
};
pub use routes::build_router;

use axum::Router;
use modshelf_service::ServiceRegistry;

/// Build a complete API server with middleware
///
/// Convenience function that builds the router with CORS and request
/// tracing layers configured with default settings.
pub fn build_api_server(services: ServiceRegistry) -> Router {
    let state = AppState::new(services);
    let router = build_router(state);

    router
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
