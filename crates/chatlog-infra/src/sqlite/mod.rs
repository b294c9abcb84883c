//! SQLite-backed storage.

pub mod message;
pub mod pool;
