use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::config::DatabaseSettings;

const DB_FILENAME: &str = "everycheese.db";

/// Open the catalogue database, running migrations as needed.
pub async fn init_pool(settings: &DatabaseSettings) -> Result<(SqlitePool, PathBuf)> {
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid database settings: {e}"))?;

    let db_root_path = normalize_path(settings.path.clone())?;
    std::fs::create_dir_all(&db_root_path)
        .with_context(|| format!("failed to create DB path: {}", db_root_path.display()))?;

    let db_path = db_root_path.join(DB_FILENAME);
    let db_uri = format!("sqlite://{}", db_path.to_string_lossy());

    let connect_options = SqliteConnectOptions::from_str(&db_uri)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(connect_options)
        .await
        .with_context(|| format!("failed to open database: {}", db_path.display()))?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database ready at {}", db_path.display());

    Ok((pool, db_root_path))
}

pub(crate) fn normalize_path<P: Into<PathBuf>>(path: P) -> Result<PathBuf> {
    let path = path.into();
    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = std::env::current_dir().context("failed to read current working directory")?;
    Ok(cwd.join(path))
}
