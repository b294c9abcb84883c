//! Message HTTP handlers.
//!
//! Endpoints:
//! - POST /api/messages               - Log a new message
//! - GET  /api/messages/{session_id}  - List messages for a session

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::info;

use chatlog_core::service::DEFAULT_LIMIT;
use chatlog_types::message::Message;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for logging a message.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub session_id: String,
    pub content: String,
    pub sender: String,
}

/// Query parameters for message listing with pagination.
#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    /// Maximum messages to return (default 10, clamped to >= 1).
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Optional exact-match filter on the sender field.
    #[serde(default)]
    pub sender: Option<String>,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// POST /api/messages - Validate, augment, and persist a message.
///
/// Returns 201 with the full stored message (including the generated id,
/// timestamp, and metadata) on success; 400 with `{"detail": ...}` when
/// validation fails.
pub async fn create_message(
    State(state): State<AppState>,
    Json(body): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let message = state
        .message_service
        .create_message(body.session_id, body.content, body.sender)
        .await?;

    info!(message_id = %message.message_id, session_id = %message.session_id, "message logged");

    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/messages/{session_id} - List messages for a session.
///
/// Always 200; an unknown session yields an empty array.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state
        .message_service
        .get_messages(&session_id, query.limit, query.offset, query.sender)
        .await?;

    Ok(Json(messages))
}
