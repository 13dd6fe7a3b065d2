//! API endpoint modules.
//!
//! Handlers translate typed component errors into HTTP status codes
//! here; nothing below this layer knows about status codes.

mod chat;
mod files;
mod health;
mod upload;


use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::uploads::UploadError;

// ── Shared types ─────────────────────────────────────────────────

/// Error body shape shared by every endpoint: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

// ── Helpers ──────────────────────────────────────────────────────

pub(crate) fn bad_request(msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: msg.into() }))
}

pub(crate) fn not_found(msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: msg.into() }))
}

pub(crate) fn internal_error(e: impl std::fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: e.to_string() }),
    )
}

pub(crate) fn service_unavailable(msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse { error: msg.into() }),
    )
}

/// Map an upload-store rejection to its status code.
pub(crate) fn upload_error(e: UploadError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match e {
        UploadError::NoFileSelected | UploadError::InvalidFileType => StatusCode::BAD_REQUEST,
        UploadError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        UploadError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse { error: e.to_string() }))
}

// ── Re-exports ───────────────────────────────────────────────────
// Preserves flat `api::foo` import paths used by router.rs.

pub use chat::chat;
pub use files::{clear_file, get_file_status, uploaded_file};
pub use health::health;
pub use upload::upload;
