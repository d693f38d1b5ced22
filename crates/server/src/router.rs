//! Route registration.

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api;
use crate::state::AppState;

/// Build the application router: the JSON API plus the static query UI as
/// the fallback.
pub fn router(state: Arc<AppState>, site_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/logs", post(api::ingest))
        .route("/api/search", post(api::search))
        .fallback_service(ServeDir::new(site_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
