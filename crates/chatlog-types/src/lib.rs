//! Shared domain types for chatlog.
//!
//! This crate contains the core domain types used across the service:
//! Message, MessageMetadata, the server configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
