//! MessageRepository trait definition.
//!
//! Implementations live in chatlog-infra (e.g. `SqliteMessageRepository`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use chatlog_types::error::RepositoryError;
use chatlog_types::message::Message;

/// Filter and pagination parameters for a message query.
///
/// `limit` below 1 is clamped to 1 by implementations; a negative `offset`
/// is treated as 0.
#[derive(Debug, Clone)]
pub struct MessageQuery {
    pub limit: i64,
    pub offset: i64,
    /// Optional exact-match filter on the sender field.
    pub sender: Option<String>,
}

/// Repository trait for message persistence.
pub trait MessageRepository: Send + Sync {
    /// Insert one message. The write must be committed before this returns,
    /// so a read issued afterwards in program order observes it.
    fn insert(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List messages for a session, ordered by timestamp ascending
    /// (message_id as tiebreak), applying the query's filter and pagination.
    ///
    /// A session with no matching rows yields `Ok(vec![])`.
    fn query(
        &self,
        session_id: &str,
        query: &MessageQuery,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;
}
