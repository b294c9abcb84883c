//! Message service orchestrating validation and persistence.
//!
//! An inbound create flows validate -> insert -> response; an inbound read
//! goes straight to the repository. No retries: failures surface to the
//! caller immediately.

use chatlog_types::error::MessageError;
use chatlog_types::message::Message;
use tracing::debug;

use crate::repository::{MessageQuery, MessageRepository};
use crate::validate::build_message;

/// Default page size for message reads.
pub const DEFAULT_LIMIT: i64 = 10;

/// Orchestrates message creation and retrieval.
///
/// Generic over `MessageRepository` so chatlog-core never depends on
/// chatlog-infra.
pub struct MessageService<R: MessageRepository> {
    repo: R,
}

impl<R: MessageRepository> MessageService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate, augment, and persist a message, returning the stored value.
    pub async fn create_message(
        &self,
        session_id: String,
        content: String,
        sender: String,
    ) -> Result<Message, MessageError> {
        let message = build_message(session_id, content, sender)?;
        self.repo.insert(&message).await?;
        debug!(message_id = %message.message_id, session_id = %message.session_id, "message stored");
        Ok(message)
    }

    /// List messages for a session with pagination and optional sender filter.
    pub async fn get_messages(
        &self,
        session_id: &str,
        limit: i64,
        offset: i64,
        sender: Option<String>,
    ) -> Result<Vec<Message>, MessageError> {
        let query = MessageQuery {
            limit,
            offset,
            sender,
        };
        Ok(self.repo.query(session_id, &query).await?)
    }
}
