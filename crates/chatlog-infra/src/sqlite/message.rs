//! SQLite message repository implementation.
//!
//! Implements `MessageRepository` from `chatlog-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, metadata stored as a
//! JSON column (never evaluated, only deserialized).

use chatlog_core::repository::{MessageQuery, MessageRepository};
use chatlog_types::error::RepositoryError;
use chatlog_types::message::{Message, MessageMetadata};
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row type
// ---------------------------------------------------------------------------

struct MessageRow {
    message_id: String,
    session_id: String,
    content: String,
    sender: String,
    timestamp: String,
    metadata: Option<String>,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            message_id: row.try_get("message_id")?,
            session_id: row.try_get("session_id")?,
            content: row.try_get("content")?,
            sender: row.try_get("sender")?,
            timestamp: row.try_get("timestamp")?,
            metadata: row.try_get("metadata")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let message_id = self
            .message_id
            .parse::<Uuid>()
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let timestamp = parse_datetime(&self.timestamp)?;

        let metadata: Option<MessageMetadata> = self
            .metadata
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| RepositoryError::Query(format!("invalid metadata JSON: {e}")))?;

        Ok(Message {
            message_id,
            session_id: self.session_id,
            content: self.content,
            sender: self.sender,
            timestamp,
            metadata,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// MessageRepository impl
// ---------------------------------------------------------------------------

impl MessageRepository for SqliteMessageRepository {
    async fn insert(&self, message: &Message) -> Result<(), RepositoryError> {
        let metadata_json = message
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::Query(format!("serialize metadata: {e}")))?;

        sqlx::query(
            r#"INSERT INTO messages (message_id, session_id, content, sender, timestamp, metadata)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.message_id.to_string())
        .bind(&message.session_id)
        .bind(&message.content)
        .bind(&message.sender)
        .bind(format_datetime(&message.timestamp))
        .bind(&metadata_json)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn query(
        &self,
        session_id: &str,
        query: &MessageQuery,
    ) -> Result<Vec<Message>, RepositoryError> {
        let limit = query.limit.max(1);
        let offset = query.offset.max(0);

        // Two statements instead of dynamic SQL; the sender filter only
        // changes one WHERE clause.
        let rows = match query.sender.as_deref() {
            Some(sender) => {
                sqlx::query(
                    r#"SELECT * FROM messages
                       WHERE session_id = ? AND sender = ?
                       ORDER BY timestamp ASC, message_id ASC
                       LIMIT ? OFFSET ?"#,
                )
                .bind(session_id)
                .bind(sender)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool.reader)
                .await
            }
            None => {
                sqlx::query(
                    r#"SELECT * FROM messages
                       WHERE session_id = ?
                       ORDER BY timestamp ASC, message_id ASC
                       LIMIT ? OFFSET ?"#,
                )
                .bind(session_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool.reader)
                .await
            }
        }
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let r = MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(r.into_message()?);
        }
        Ok(messages)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use chatlog_core::validate::build_message;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_message(session_id: &str, content: &str, sender: &str) -> Message {
        build_message(
            session_id.to_string(),
            content.to_string(),
            sender.to_string(),
        )
        .unwrap()
    }

    fn default_query() -> MessageQuery {
        MessageQuery {
            limit: 10,
            offset: 0,
            sender: None,
        }
    }

    #[tokio::test]
    async fn test_insert_then_query_roundtrip() {
        let repo = SqliteMessageRepository::new(test_pool().await);

        let msg = make_message("session-1", "Hola mundo", "user");
        repo.insert(&msg).await.unwrap();

        let messages = repo.query("session-1", &default_query()).await.unwrap();
        assert_eq!(messages.len(), 1);
        let stored = &messages[0];
        assert_eq!(stored.message_id, msg.message_id);
        assert_eq!(stored.content, "Hola mundo");
        assert_eq!(stored.sender, "user");
        assert_eq!(stored.timestamp, msg.timestamp);
    }

    #[tokio::test]
    async fn test_metadata_roundtrips_as_json() {
        let repo = SqliteMessageRepository::new(test_pool().await);

        let msg = make_message("session-1", "Hola mundo", "user");
        repo.insert(&msg).await.unwrap();

        let messages = repo.query("session-1", &default_query()).await.unwrap();
        let meta = messages[0].metadata.as_ref().unwrap();
        assert_eq!(meta.word_count, 2);
        assert_eq!(meta.char_count, 10);
    }

    #[tokio::test]
    async fn test_query_empty_session_returns_empty_vec() {
        let repo = SqliteMessageRepository::new(test_pool().await);

        let messages = repo.query("no-such-session", &default_query()).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let repo = SqliteMessageRepository::new(test_pool().await);

        repo.insert(&make_message("session-a", "mensaje a", "user"))
            .await
            .unwrap();
        repo.insert(&make_message("session-b", "mensaje b", "user"))
            .await
            .unwrap();

        let a = repo.query("session-a", &default_query()).await.unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].content, "mensaje a");
    }

    #[tokio::test]
    async fn test_sender_filter_exact_match() {
        let repo = SqliteMessageRepository::new(test_pool().await);

        repo.insert(&make_message("session-1", "del usuario", "user"))
            .await
            .unwrap();
        repo.insert(&make_message("session-1", "del bot", "bot"))
            .await
            .unwrap();

        let query = MessageQuery {
            limit: 10,
            offset: 0,
            sender: Some("bot".to_string()),
        };
        let messages = repo.query("session-1", &query).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "bot");
    }

    #[tokio::test]
    async fn test_pagination_window() {
        let repo = SqliteMessageRepository::new(test_pool().await);

        let mut ids = Vec::new();
        for i in 0..5 {
            let msg = make_message("session-1", &format!("mensaje {i}"), "user");
            ids.push(msg.message_id);
            repo.insert(&msg).await.unwrap();
        }

        let first_page = repo
            .query(
                "session-1",
                &MessageQuery {
                    limit: 2,
                    offset: 0,
                    sender: None,
                },
            )
            .await
            .unwrap();
        let second_page = repo
            .query(
                "session-1",
                &MessageQuery {
                    limit: 2,
                    offset: 2,
                    sender: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(first_page.len(), 2);
        assert_eq!(second_page.len(), 2);
        for msg in &second_page {
            assert!(!first_page.iter().any(|m| m.message_id == msg.message_id));
        }
    }

    #[tokio::test]
    async fn test_messages_ordered_by_timestamp() {
        let repo = SqliteMessageRepository::new(test_pool().await);

        for i in 0..3 {
            repo.insert(&make_message("session-1", &format!("mensaje {i}"), "user"))
                .await
                .unwrap();
        }

        let messages = repo.query("session-1", &default_query()).await.unwrap();
        assert_eq!(messages.len(), 3);
        for pair in messages.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        assert_eq!(messages[0].content, "mensaje 0");
        assert_eq!(messages[2].content, "mensaje 2");
    }

    #[tokio::test]
    async fn test_limit_clamped_to_one() {
        let repo = SqliteMessageRepository::new(test_pool().await);

        repo.insert(&make_message("session-1", "uno", "user"))
            .await
            .unwrap();
        repo.insert(&make_message("session-1", "dos", "user"))
            .await
            .unwrap();

        let messages = repo
            .query(
                "session-1",
                &MessageQuery {
                    limit: 0,
                    offset: 0,
                    sender: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn test_null_metadata_reads_as_none() {
        let pool = test_pool().await;
        let repo = SqliteMessageRepository::new(pool.clone());

        // Simulate a row written without metadata.
        sqlx::query(
            r#"INSERT INTO messages (message_id, session_id, content, sender, timestamp, metadata)
               VALUES (?, 'session-1', 'legacy', 'user', ?, NULL)"#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&pool.writer)
        .await
        .unwrap();

        let messages = repo.query("session-1", &default_query()).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].metadata.is_none());
    }
}
