//! Caller identity for the cheese views.
//!
//! Users and sessions live in the same SQLite database as the catalogue. A
//! session token travels in the `sessionid` cookie; the login page that hands
//! tokens out is not part of this crate.

pub mod db;
pub mod extract;
pub mod session;

pub use extract::{CurrentUser, LoginRequired};
pub use session::SessionStore;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub is_staff: bool,
    pub created: String,
}
