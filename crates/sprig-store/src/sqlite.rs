//! SQLite-backed conversation store.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::Connection;
use sprig_core::{Message, Role};

use crate::error::{StoreError, StoreResult};
use crate::schema;
use crate::types::SessionSummary;
use crate::ConversationStore;

/// Conversation store over a single SQLite connection.
///
/// Queries are short and never await while the connection is locked, so a
/// plain mutex is enough to serialize access across request handlers.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file and initialize the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(schema::CREATE_SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn query_messages(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> StoreResult<Vec<Message>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut messages = Vec::new();
        for row in rows {
            let (role, content, created_at) = row?;
            messages.push(Message {
                role: role
                    .parse::<Role>()
                    .map_err(|e| StoreError::corrupt(e.to_string()))?,
                content,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(messages)
    }
}

fn parse_timestamp(raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::corrupt(format!("bad timestamp {raw:?}: {e}")))
}

#[async_trait]
impl ConversationStore for SqliteStore {
    async fn record_exchange(
        &self,
        session_id: &str,
        user_content: &str,
        assistant_content: &str,
    ) -> StoreResult<()> {
        let conn = self.conn.lock();
        let now = Utc::now().to_rfc3339();

        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT OR IGNORE INTO sessions (id, created_at, updated_at) VALUES (?1, ?2, ?2)",
            (session_id, &now),
        )?;
        tx.execute(
            "INSERT INTO messages (session_id, role, content, created_at) VALUES (?1, ?2, ?3, ?4)",
            (session_id, Role::User.to_string(), user_content, &now),
        )?;
        tx.execute(
            "INSERT INTO messages (session_id, role, content, created_at) VALUES (?1, ?2, ?3, ?4)",
            (session_id, Role::Assistant.to_string(), assistant_content, &now),
        )?;
        tx.execute(
            "UPDATE sessions SET updated_at = ?2 WHERE id = ?1",
            (session_id, &now),
        )?;
        tx.commit()?;

        tracing::debug!(session_id, "exchange recorded");
        Ok(())
    }

    async fn session_messages(&self, session_id: &str) -> StoreResult<Vec<Message>> {
        let conn = self.conn.lock();
        Self::query_messages(
            &conn,
            "SELECT role, content, created_at FROM messages
             WHERE session_id = ?1 ORDER BY id ASC",
            [session_id],
        )
    }

    async fn recent_messages(&self, session_id: &str, limit: usize) -> StoreResult<Vec<Message>> {
        let conn = self.conn.lock();
        let mut messages = Self::query_messages(
            &conn,
            "SELECT role, content, created_at FROM messages
             WHERE session_id = ?1 ORDER BY id DESC LIMIT ?2",
            (session_id, limit as i64),
        )?;
        messages.reverse();
        Ok(messages)
    }

    async fn list_sessions(&self) -> StoreResult<Vec<SessionSummary>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, updated_at FROM sessions")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, updated_at) = row?;
            sessions.push(SessionSummary {
                id,
                updated_at: parse_timestamp(&updated_at)?,
            });
        }
        Ok(sessions)
    }
}
