//! Chat endpoint: joins the request with the session's document
//! context and forwards the exchange to the completion provider.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use medchat_llm::ChatError;

use crate::cookie;
use crate::state::AppState;

use super::{bad_request, internal_error, service_unavailable, ApiResult};

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Inline document text; overrides the session's active file.
    #[serde(default)]
    pub file_content: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/chat.
///
/// File context resolves in order: request body, then the session's
/// active file, then none. Empty strings count as absent throughout.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let message = req.message.filter(|s| !s.is_empty());

    let file_content = match req.file_content.filter(|s| !s.is_empty()) {
        Some(inline) => Some(inline),
        None => cookie::session_id(&state.config.session.secret, &headers)
            .and_then(|session_id| state.sessions.active_file(&session_id))
            .map(|file| file.content)
            .filter(|s| !s.is_empty()),
    };

    // Validate before touching the provider, so an empty request is a
    // client error even when no provider is configured.
    if message.is_none() && file_content.is_none() {
        return Err(bad_request(ChatError::NoContentProvided.to_string()));
    }

    let gateway = state
        .chat
        .as_ref()
        .ok_or_else(|| service_unavailable("LLM provider not configured"))?;

    info!(
        "Chat request (message: {}, file context: {})",
        message.is_some(),
        file_content.is_some()
    );

    let reply = gateway
        .reply(message.as_deref(), file_content.as_deref())
        .await
        .map_err(|e| match e {
            ChatError::NoContentProvided => bad_request(e.to_string()),
            ChatError::Llm(err) => internal_error(err),
        })?;

    Ok(Json(ChatResponse { response: reply }))
}
