//! Configuration file loading and parsing
//!
//! Loads EveryCheese configuration from RON files, looking in the standard
//! locations when no explicit path is given.

use super::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "EVERYCHEESE_CONFIG_PATH";

/// Standard config file names to search for
const CONFIG_FILENAMES: &[&str] = &["everycheese.ron", ".everycheese/config.ron"];

/// Load configuration from a specific file path
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_ron(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration with automatic file discovery
///
/// Searches for config files in the following locations (in order):
/// 1. Path specified in EVERYCHEESE_CONFIG_PATH environment variable
/// 2. everycheese.ron in current directory
/// 3. .everycheese/config.ron relative to current directory
///
/// If no config file is found, returns a default configuration.
pub fn load_with_discovery() -> Result<Config> {
    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            tracing::info!("Loading config from {}: {}", CONFIG_PATH_ENV, path.display());
            return load_from_file(&path);
        } else {
            tracing::warn!(
                "{} specified but file not found: {}",
                CONFIG_PATH_ENV,
                path.display()
            );
        }
    }

    for filename in CONFIG_FILENAMES {
        let path = PathBuf::from(filename);
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            return load_from_file(&path);
        }
    }

    tracing::info!("No config file found, using defaults");
    Ok(Config::default())
}

fn parse_ron(content: &str) -> Result<Config> {
    ron::from_str(content).context("Failed to parse RON configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_ron("Config()").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let ron = r#"
Config(
    server: ServerSettings(
        bind_addr: "127.0.0.1:9000",
    ),
    database: DatabaseSettings(
        path: "/var/lib/everycheese",
        max_connections: 2,
    ),
)
        "#;

        let config = parse_ron(ron).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.database.path, PathBuf::from("/var/lib/everycheese"));
        assert_eq!(config.database.max_connections, 2);
    }

    #[test]
    fn test_parse_partial_section_keeps_defaults() {
        let ron = r#"Config(database: DatabaseSettings(max_connections: 1))"#;

        let config = parse_ron(ron).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.database.path, PathBuf::from(".everycheese/db"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("everycheese.ron");
        std::fs::write(
            &config_path,
            r#"Config(server: ServerSettings(bind_addr: "127.0.0.1:8080"))"#,
        )
        .unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let result = load_from_file("/nonexistent/path/config.ron");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_invalid_ron() {
        let result = parse_ron("This is not valid RON");
        assert!(result.is_err());
    }
}
