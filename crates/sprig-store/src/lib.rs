//! Conversation persistence for Sprig.
//!
//! Two tables in an embedded SQLite database: `sessions` and an append-only
//! `messages` log keyed by session id. All rows belonging to one chat
//! exchange are committed in a single transaction.

mod error;
mod schema;
mod sqlite;
mod types;

pub use error::{StoreError, StoreResult};
pub use sqlite::SqliteStore;
pub use types::SessionSummary;

use async_trait::async_trait;
use sprig_core::Message;

/// Conversation storage interface.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Persist one complete exchange: ensure the session row exists, append
    /// the user message and the assistant reply, and touch the session's
    /// `updated_at`. Atomic — either all rows land or none do.
    async fn record_exchange(
        &self,
        session_id: &str,
        user_content: &str,
        assistant_content: &str,
    ) -> StoreResult<()>;

    /// All messages for a session in chronological order.
    async fn session_messages(&self, session_id: &str) -> StoreResult<Vec<Message>>;

    /// The most recent `limit` messages for a session, oldest first.
    async fn recent_messages(&self, session_id: &str, limit: usize) -> StoreResult<Vec<Message>>;

    /// All known sessions, order unspecified.
    async fn list_sessions(&self) -> StoreResult<Vec<SessionSummary>>;
}
