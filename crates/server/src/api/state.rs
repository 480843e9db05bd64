use sqlx::SqlitePool;

use crate::auth::SessionStore;

/// Shared handles passed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            sessions: SessionStore::new(pool.clone()),
            pool,
        }
    }
}
