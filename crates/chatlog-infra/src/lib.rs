//! Infrastructure implementations for chatlog: SQLite persistence and
//! configuration loading.

pub mod config;
pub mod sqlite;
