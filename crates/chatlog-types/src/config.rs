//! Server configuration type, deserialized from `config.toml`.

use serde::{Deserialize, Serialize};

/// Global server configuration.
///
/// Loaded from `{data_dir}/config.toml` by chatlog-infra; every field has
/// a default so a missing or partial file still yields a usable config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server listens on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}
