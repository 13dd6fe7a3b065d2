//! Multipart document upload.
//!
//! Validates, stores, extracts, and caches the document in the
//! caller's session, minting a session cookie when none exists yet.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;

use medchat_core::{FileKind, UploadedFile};

use crate::cookie;
use crate::state::AppState;

use super::{bad_request, internal_error, upload_error, ApiResult, ErrorResponse};

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Stored (uuid-prefixed) name; also the session's status filename.
    pub filename: String,
    pub file_url: String,
    /// Full extracted text, echoed so the client can preview it.
    pub content: String,
    pub file_type: FileKind,
}

/// POST /api/upload, multipart/form-data with a `file` field.
///
/// A file that stores fine but fails extraction is rolled back: the
/// stored bytes are deleted and the session keeps its previous file.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let mut file_field: Option<(String, axum::body::Bytes)> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            file_field = Some((original_name, bytes));
            break;
        }
    }
    let Some((original_name, bytes)) = file_field else {
        return Err(bad_request("No file part"));
    };

    let stored = state
        .uploads
        .save(&original_name, &bytes)
        .await
        .map_err(upload_error)?;

    let content = match medchat_extract::extract(stored.kind, &stored.stored_name, &bytes) {
        Ok(text) => text,
        Err(e) => {
            // Roll back the stored file so failed uploads leave no trace.
            state.uploads.remove(&stored.stored_name).await;
            return Err(internal_error(e));
        }
    };

    // Reuse the caller's session when the cookie verifies; mint a new
    // one otherwise. Upload is the only place sessions are created.
    let secret = &state.config.session.secret;
    let (session_id, set_cookie) = match cookie::session_id(secret, &headers) {
        Some(id) => (id, None),
        None => {
            let (id, set_cookie) = cookie::issue(secret);
            (id, Some(set_cookie))
        }
    };

    state.sessions.set_active_file(
        &session_id,
        UploadedFile {
            stored_name: stored.stored_name.clone(),
            original_name,
            url: stored.url.clone(),
            content: content.clone(),
            kind: stored.kind,
        },
    );

    info!(
        "Stored upload '{}' ({} bytes, {})",
        stored.stored_name,
        bytes.len(),
        stored.kind
    );

    let body = Json(UploadResponse {
        success: true,
        filename: stored.stored_name,
        file_url: stored.url,
        content,
        file_type: stored.kind,
    });

    Ok(match set_cookie {
        Some(cookie) => (AppendHeaders([(header::SET_COOKIE, cookie)]), body).into_response(),
        None => body.into_response(),
    })
}

/// Multipart read failures keep their own status: an oversized body
/// surfaces as 413 from the body limit, everything else as 400.
fn multipart_error(
    e: axum::extract::multipart::MultipartError,
) -> (axum::http::StatusCode, Json<ErrorResponse>) {
    (
        e.status(),
        Json(ErrorResponse {
            error: format!("Upload failed: {}", e.body_text()),
        }),
    )
}
