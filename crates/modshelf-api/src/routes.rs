//! API route definitions
//!
//! This module defines all API routes and builds the router.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    get_mod, health_check, list_mods, list_tags, publish_mod, upload_mod, AppState,
};

/// Build the API router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/mods", get(list_mods))
        .route("/mods/{slug}", get(get_mod))
        .route("/tags", get(list_tags))
        .route("/upload", post(upload_mod))
        .route("/publish", post(publish_mod))
        .with_state(state)
}
