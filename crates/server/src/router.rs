//! HTTP router construction.
//!
//! Assembles the API routes, the static chat UI, and middleware into a
//! single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    // Multipart bodies carry some framing overhead on top of the file
    // itself; the precise per-file ceiling is enforced in UploadStore.
    let body_limit = (state.config.uploads.max_bytes as usize).saturating_add(64 * 1024);

    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(&static_dir))
        .route("/uploads/{filename}", get(api::uploaded_file))
        .route("/api/health", get(api::health))
        .route("/api/upload", post(api::upload))
        .route("/api/chat", post(api::chat))
        .route("/api/clear-file", post(api::clear_file))
        .route("/api/get-file-status", get(api::get_file_status))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
