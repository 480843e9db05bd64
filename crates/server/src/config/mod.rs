//! Configuration management for EveryCheese
//!
//! Settings are stored in RON. Every section has defaults, so an empty or
//! missing config file yields a runnable development setup.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the database directory.
pub const DB_PATH_ENV: &str = "EVERYCHEESE_DB_PATH";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerSettings {
    /// Address the HTTP server binds to (e.g., "0.0.0.0:8000")
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// SQLite database settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DatabaseSettings {
    /// Directory holding the database file
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Upper bound on pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseSettings {
    /// Apply the `EVERYCHEESE_DB_PATH` override, if set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            if !path.trim().is_empty() {
                self.path = PathBuf::from(path);
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("database.max_connections must be at least 1".to_string());
        }
        if self.path.as_os_str().is_empty() {
            return Err("database.path cannot be empty".to_string());
        }
        Ok(())
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_db_path() -> PathBuf {
    PathBuf::from(".everycheese/db")
}

fn default_max_connections() -> u32 {
    5
}
