//! `POST /api/chat` — the main chat flow.
//!
//! Matches the question against the documentation set, asks the generator to
//! answer from the matched document and recent history, and persists the
//! whole exchange in one transaction after the reply text is known. Every
//! non-400 branch writes exactly one user and one assistant row.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::prompt::build_prompt;
use crate::state::AppState;

/// Reply used when no document matches or the generation call fails. The
/// caller cannot distinguish the two cases; that is intentional.
pub const FALLBACK_REPLY: &str = "Sorry, I don’t have information about that.";

/// Number of stored messages included in the prompt.
const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub tokens_used: u32,
}

/// Both fields are required non-empty strings; anything else is a 400
/// before any database write.
fn validate(req: &ChatRequest) -> Result<(&str, &str), &'static str> {
    let session_id = req
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let message = req
        .message
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    match (session_id, message) {
        (Some(session_id), Some(message)) => Ok((session_id, message)),
        _ => Err("Missing sessionId or message"),
    }
}

pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    let (session_id, message) = match validate(&req) {
        Ok(fields) => fields,
        Err(error) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response();
        }
    };

    tracing::info!(session_id, "chat request");

    let (reply, tokens_used) = match state.docs.find_relevant(message) {
        None => {
            tracing::debug!(session_id, "no matching document");
            (FALLBACK_REPLY.to_string(), 0)
        }
        Some(doc) => {
            // Read errors are swallowed: a failed history load degrades the
            // prompt, it does not fail the request.
            let history = match state.store.recent_messages(session_id, HISTORY_LIMIT).await {
                Ok(history) => history,
                Err(e) => {
                    tracing::warn!(session_id, error = %e, "failed to load history");
                    Vec::new()
                }
            };

            let prompt = build_prompt(doc, &history, message);
            match state.generator.generate(&prompt).await {
                Ok(generation) => (generation.text, generation.tokens_used),
                Err(e) => {
                    tracing::warn!(session_id, error = %e, "generation failed, using fallback");
                    (FALLBACK_REPLY.to_string(), 0)
                }
            }
        }
    };

    if let Err(e) = state
        .store
        .record_exchange(session_id, message, &reply)
        .await
    {
        tracing::error!(session_id, error = %e, "failed to persist exchange");
    }

    Json(ChatReply { reply, tokens_used }).into_response()
}
