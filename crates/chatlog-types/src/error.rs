use thiserror::Error;

/// Errors from message validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("message content is empty")]
    EmptyContent,

    #[error("message content contains forbidden word '{0}'")]
    ForbiddenWord(String),
}

/// Errors from repository operations (used by trait definitions in chatlog-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Combined error for message service operations.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
