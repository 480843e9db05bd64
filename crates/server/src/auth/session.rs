//! Session tokens for signed-in users.
//!
//! Sessions are rows in the `sessions` table so that tokens issued by the
//! CLI are visible to a running server.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::User;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sessionid";

#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new session for `user_id` and return its token.
    pub async fn create_session(&self, user_id: &str) -> Result<String> {
        let session_id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO sessions (id, user_id) VALUES (?, ?)")
            .bind(&session_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to create session for user {user_id}"))?;

        Ok(session_id)
    }

    /// Get the user owning a session token.
    pub async fn get_user(&self, session_id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email, u.is_staff, u.created \
             FROM sessions s JOIN users u ON u.id = s.user_id \
             WHERE s.id = ?",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to look up session")?;

        Ok(user)
    }

    /// Delete a specific session (logout).
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .context("failed to delete session")?;
        Ok(())
    }

    pub async fn session_count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Pull the session token out of a `Cookie` header value.
pub fn session_token_from_cookies(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}
