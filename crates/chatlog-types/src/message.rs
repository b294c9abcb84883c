//! Message and metadata types for chatlog.
//!
//! A `Message` is created once at POST time and is immutable thereafter:
//! the service exposes no update or delete operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged chat message.
///
/// `message_id`, `timestamp`, and `metadata` are generated server-side;
/// the rest is caller-supplied. Messages within a session are ordered by
/// `timestamp` (with `message_id` as tiebreak -- v7 UUIDs are time-sortable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: Uuid,
    /// Caller-chosen string grouping a sequence of messages.
    pub session_id: String,
    pub content: String,
    /// Free-text label identifying who authored the message (e.g. "user", "bot").
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    /// Server-computed statistics. Always `Some` on messages created through
    /// the validator; never client-supplied.
    pub metadata: Option<MessageMetadata>,
}

/// Descriptive statistics attached to a message at creation time.
///
/// Persisted as a JSON column, so the shape must stay serde-compatible
/// with previously written rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Number of whitespace-separated tokens in the trimmed content.
    pub word_count: u64,
    /// Character count of the original, untrimmed content.
    pub char_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serialize_includes_metadata() {
        let msg = Message {
            message_id: Uuid::now_v7(),
            session_id: "session-1".to_string(),
            content: "Hola mundo".to_string(),
            sender: "user".to_string(),
            timestamp: Utc::now(),
            metadata: Some(MessageMetadata {
                word_count: 2,
                char_count: 10,
            }),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"word_count\":2"));
        assert!(json.contains("\"char_count\":10"));
    }

    #[test]
    fn test_metadata_json_roundtrip() {
        let meta = MessageMetadata {
            word_count: 7,
            char_count: 42,
        };
        let json = serde_json::to_string(&meta).unwrap();
        let parsed: MessageMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, meta);
    }

    #[test]
    fn test_message_deserialize_without_metadata() {
        // Rows written before metadata existed deserialize with None.
        let json = r#"{
            "message_id": "0191f6a0-5f2c-7b34-8000-7f3e12ab34cd",
            "session_id": "s",
            "content": "hi",
            "sender": "user",
            "timestamp": "2025-01-01T00:00:00Z",
            "metadata": null
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(msg.metadata.is_none());
    }
}
