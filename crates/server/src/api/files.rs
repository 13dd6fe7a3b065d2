//! Active-file management and stored-file retrieval.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::cookie;
use crate::session::FileStatus;
use crate::state::AppState;

use super::{internal_error, not_found, ApiResult};

#[derive(Serialize)]
pub struct ClearFileResponse {
    pub success: bool,
}

/// POST /api/clear-file. Always succeeds, with or without a session
/// or an active file; the outcome is the same either way.
pub async fn clear_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<ClearFileResponse> {
    if let Some(session_id) = cookie::session_id(&state.config.session.secret, &headers) {
        state.sessions.clear_active_file(&session_id);
    }
    Json(ClearFileResponse { success: true })
}

/// GET /api/get-file-status. Metadata only; extracted content never
/// leaves the session through this endpoint.
pub async fn get_file_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<FileStatus> {
    let status = match cookie::session_id(&state.config.session.secret, &headers) {
        Some(session_id) => state.sessions.file_status(&session_id),
        None => FileStatus::none(),
    };
    Json(status)
}

/// GET /uploads/{filename}. Serves a stored file by its exact stored
/// name, with the content type guessed from the extension.
pub async fn uploaded_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    // Stored names never contain separators or dot-dot; anything else
    // is not a name we handed out.
    if filename.contains(['/', '\\']) || filename.contains("..") {
        return Err(not_found("File not found"));
    }

    let path = state.uploads.dir().join(&filename);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(not_found("File not found"));
        }
        Err(e) => return Err(internal_error(e)),
    };

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes))
}
