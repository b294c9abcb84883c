//! Application state wiring the service to its concrete infrastructure.
//!
//! `MessageService` is generic over the repository trait, but AppState pins
//! it to the SQLite implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chatlog_core::service::MessageService;
use chatlog_infra::config::{database_url, resolve_data_dir};
use chatlog_infra::sqlite::message::SqliteMessageRepository;
use chatlog_infra::sqlite::pool::DatabasePool;

/// Concrete type alias for the service generic pinned to the SQLite repository.
pub type ConcreteMessageService = MessageService<SqliteMessageRepository>;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub message_service: Arc<ConcreteMessageService>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state from the default data directory.
    pub async fn init() -> anyhow::Result<Self> {
        Self::init_with_dir(resolve_data_dir()).await
    }

    /// Initialize the application state against a specific data directory:
    /// create the directory, open the database, wire the service.
    pub async fn init_with_dir(data_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        let repo = SqliteMessageRepository::new(db_pool.clone());
        let message_service = MessageService::new(repo);

        Ok(Self {
            message_service: Arc::new(message_service),
            data_dir,
            db_pool,
        })
    }
}
