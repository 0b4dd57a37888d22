//! `GET /api/conversations/:session_id` — ordered message history.

use axum::extract::{Path, State};
use axum::response::Json;
use sprig_core::Message;

use crate::state::AppState;

/// Messages for a session in chronological order. Store errors are logged
/// and surfaced to the caller as an empty list, never as an HTTP error.
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Vec<Message>> {
    match state.store.session_messages(&session_id).await {
        Ok(messages) => Json(messages),
        Err(e) => {
            tracing::warn!(session_id, error = %e, "failed to load conversation");
            Json(Vec::new())
        }
    }
}
