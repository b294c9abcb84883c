//! Message validation and augmentation.
//!
//! Given the caller-supplied fields, rejects empty or forbidden content and
//! returns a fully-populated `Message` with generated id, timestamp, and
//! computed metadata. Pure function: nothing here touches storage.

use chatlog_types::error::ValidationError;
use chatlog_types::message::{Message, MessageMetadata};
use chrono::Utc;
use uuid::Uuid;

/// Substrings rejected in message content, matched case-insensitively
/// against the trimmed content.
const FORBIDDEN_WORDS: &[&str] = &["malo", "ofensivo"];

/// Validate the caller-supplied fields and build a complete `Message`.
///
/// # Errors
///
/// - [`ValidationError::EmptyContent`] if the trimmed content is empty.
/// - [`ValidationError::ForbiddenWord`] if the lower-cased trimmed content
///   contains any entry of [`FORBIDDEN_WORDS`].
pub fn build_message(
    session_id: String,
    content: String,
    sender: String,
) -> Result<Message, ValidationError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyContent);
    }

    let lowered = trimmed.to_lowercase();
    for word in FORBIDDEN_WORDS {
        if lowered.contains(word) {
            return Err(ValidationError::ForbiddenWord((*word).to_string()));
        }
    }

    let metadata = MessageMetadata {
        word_count: trimmed.split_whitespace().count() as u64,
        // Count of the original content, not the trimmed form.
        char_count: content.chars().count() as u64,
    };

    Ok(Message {
        message_id: Uuid::now_v7(),
        session_id,
        content,
        sender,
        timestamp: Utc::now(),
        metadata: Some(metadata),
    })
}
