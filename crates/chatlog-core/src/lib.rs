//! Core logic for chatlog: message validation/augmentation, the repository
//! trait, and the service orchestrating the two.
//!
//! This crate never depends on chatlog-infra; storage is reached through
//! the `MessageRepository` trait.

pub mod repository;
pub mod service;
pub mod validate;
