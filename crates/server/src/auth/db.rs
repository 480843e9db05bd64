use sqlx::SqlitePool;

use super::User;

pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: Option<&str>,
    is_staff: bool,
) -> Result<User, sqlx::Error> {
    let id = cuid2::create_id();
    sqlx::query_as::<_, User>(
        "INSERT INTO users (id, username, email, is_staff) VALUES (?, ?, ?, ?) \
         RETURNING id, username, email, is_staff, created",
    )
    .bind(&id)
    .bind(username)
    .bind(email)
    .bind(is_staff)
    .fetch_one(pool)
    .await
}

pub async fn fetch_user_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, email, is_staff, created FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, email, is_staff, created FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_pool;

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let pool = create_test_pool().await.unwrap();

        let user = create_user(&pool, "fromager", Some("f@example.com"), true)
            .await
            .unwrap();
        assert_eq!(user.username, "fromager");
        assert_eq!(user.email.as_deref(), Some("f@example.com"));
        assert!(user.is_staff);

        let by_id = fetch_user_by_id(&pool, &user.id).await.unwrap();
        assert_eq!(by_id.as_ref(), Some(&user));

        let by_name = fetch_user_by_username(&pool, "fromager").await.unwrap();
        assert_eq!(by_name, Some(user));

        assert!(fetch_user_by_username(&pool, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_usernames_are_unique() {
        let pool = create_test_pool().await.unwrap();

        create_user(&pool, "twin", None, false).await.unwrap();
        let err = create_user(&pool, "twin", None, false).await.unwrap_err();
        match err {
            sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
