//! `GET /api/sessions` — list all known sessions.

use axum::extract::State;
use axum::response::Json;
use sprig_store::SessionSummary;

use crate::state::AppState;

/// All sessions, order unspecified; empty list on any store error.
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    match state.store.list_sessions().await {
        Ok(sessions) => Json(sessions),
        Err(e) => {
            tracing::warn!(error = %e, "failed to list sessions");
            Json(Vec::new())
        }
    }
}
