use anyhow::{Context, Result};
use sqlx::SqlitePool;

use super::models::{Cheese, CheeseChanges, NewCheese};
use crate::validation::slug::slugify;

/// Path segments under `/cheeses/` that belong to routes, not cheeses.
pub const RESERVED_SLUGS: &[&str] = &["add"];

/// Slug used when a name has no sluggable characters at all.
const FALLBACK_SLUG: &str = "cheese";

/// Attempts before giving up on an insert that keeps losing slug races.
const INSERT_ATTEMPTS: usize = 5;

pub async fn list_cheeses(pool: &SqlitePool) -> Result<Vec<Cheese>, sqlx::Error> {
    sqlx::query_as::<_, Cheese>(
        "SELECT id, name, slug, description, firmness, country_of_origin, creator, created, modified \
         FROM cheeses ORDER BY name, created, id",
    )
    .fetch_all(pool)
    .await
}

pub async fn count_cheeses(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM cheeses")
        .fetch_one(pool)
        .await
}

pub async fn fetch_cheese_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<Cheese>, sqlx::Error> {
    sqlx::query_as::<_, Cheese>(
        "SELECT id, name, slug, description, firmness, country_of_origin, creator, created, modified \
         FROM cheeses WHERE slug = ?",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_cheese_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Cheese>, sqlx::Error> {
    sqlx::query_as::<_, Cheese>(
        "SELECT id, name, slug, description, firmness, country_of_origin, creator, created, modified \
         FROM cheeses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn slug_exists(pool: &SqlitePool, slug: &str) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM cheeses WHERE slug = ? LIMIT 1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(exists.is_some())
}

/// Pick a free slug for `name`: the plain slug when available, otherwise the
/// first of `slug-2`, `slug-3`, ... that is neither taken nor reserved.
pub async fn unique_slug(pool: &SqlitePool, name: &str) -> Result<String, sqlx::Error> {
    let mut base = slugify(name);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_string();
    }

    let mut candidate = base.clone();
    let mut suffix = 2;
    loop {
        if !RESERVED_SLUGS.contains(&candidate.as_str()) && !slug_exists(pool, &candidate).await? {
            return Ok(candidate);
        }
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
}

pub async fn insert_cheese(pool: &SqlitePool, new: NewCheese) -> Result<Cheese> {
    for _ in 0..INSERT_ATTEMPTS {
        let slug = unique_slug(pool, &new.name).await?;
        let id = cuid2::create_id();

        let inserted = sqlx::query_as::<_, Cheese>(
            "INSERT INTO cheeses (id, name, slug, description, firmness, country_of_origin, creator) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, name, slug, description, firmness, country_of_origin, creator, created, modified",
        )
        .bind(&id)
        .bind(&new.name)
        .bind(&slug)
        .bind(&new.description)
        .bind(new.firmness)
        .bind(new.country_of_origin.as_deref())
        .bind(new.creator.as_deref())
        .fetch_one(pool)
        .await;

        match inserted {
            Ok(cheese) => {
                tracing::debug!(slug = %cheese.slug, id = %cheese.id, "inserted cheese");
                return Ok(cheese);
            }
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                tracing::debug!(%slug, "slug taken concurrently, retrying");
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to insert cheese `{}`", new.name));
            }
        }
    }

    anyhow::bail!(
        "could not allocate a unique slug for `{}` after {INSERT_ATTEMPTS} attempts",
        new.name
    )
}

/// Apply `changes` to the cheese at `slug`. The slug and creator stay as they
/// were. Returns `None` when no cheese has that slug.
pub async fn update_cheese(
    pool: &SqlitePool,
    slug: &str,
    changes: CheeseChanges,
) -> Result<Option<Cheese>, sqlx::Error> {
    sqlx::query_as::<_, Cheese>(
        "UPDATE cheeses \
         SET name = ?, description = ?, firmness = ?, country_of_origin = ?, \
             modified = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
         WHERE slug = ? \
         RETURNING id, name, slug, description, firmness, country_of_origin, creator, created, modified",
    )
    .bind(&changes.name)
    .bind(&changes.description)
    .bind(changes.firmness)
    .bind(changes.country_of_origin.as_deref())
    .bind(slug)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::db::create_user;
    use crate::cheese::models::Firmness;
    use crate::test_helpers::create_test_pool;

    fn new_cheese(name: &str) -> NewCheese {
        NewCheese {
            name: name.to_string(),
            description: "A salty hard cheese".to_string(),
            firmness: Firmness::Hard,
            country_of_origin: Some("HR".to_string()),
            creator: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch_by_slug() {
        let pool = create_test_pool().await.unwrap();

        let cheese = insert_cheese(&pool, new_cheese("Paski Sir")).await.unwrap();
        assert_eq!(cheese.slug, "paski-sir");
        assert!(!cheese.id.is_empty());
        assert!(!cheese.created.is_empty());

        let fetched = fetch_cheese_by_slug(&pool, "paski-sir").await.unwrap().unwrap();
        assert_eq!(fetched, cheese);
        assert_eq!(fetched.firmness, Firmness::Hard);
        assert_eq!(fetched.country_of_origin.as_deref(), Some("HR"));

        let by_id = fetch_cheese_by_id(&pool, &cheese.id).await.unwrap();
        assert_eq!(by_id, Some(cheese));
    }

    #[tokio::test]
    async fn test_colliding_names_get_suffixes() {
        let pool = create_test_pool().await.unwrap();

        let first = insert_cheese(&pool, new_cheese("Brie")).await.unwrap();
        let second = insert_cheese(&pool, new_cheese("brie")).await.unwrap();
        let third = insert_cheese(&pool, new_cheese("BRIE!")).await.unwrap();

        assert_eq!(first.slug, "brie");
        assert_eq!(second.slug, "brie-2");
        assert_eq!(third.slug, "brie-3");
        assert_eq!(count_cheeses(&pool).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_reserved_and_empty_slugs() {
        let pool = create_test_pool().await.unwrap();

        let add = insert_cheese(&pool, new_cheese("Add")).await.unwrap();
        assert_eq!(add.slug, "add-2");

        let symbols = insert_cheese(&pool, new_cheese("???")).await.unwrap();
        assert_eq!(symbols.slug, "cheese");
        assert_eq!(symbols.name, "???");
    }

    #[tokio::test]
    async fn test_update_keeps_slug_and_creator() {
        let pool = create_test_pool().await.unwrap();
        let user = create_user(&pool, "maker", None, false).await.unwrap();

        let mut new = new_cheese("Gouda");
        new.creator = Some(user.id.clone());
        let cheese = insert_cheese(&pool, new).await.unwrap();

        let updated = update_cheese(
            &pool,
            &cheese.slug,
            CheeseChanges {
                name: "Aged Gouda".to_string(),
                description: "Crystalline".to_string(),
                firmness: Firmness::SemiHard,
                country_of_origin: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.id, cheese.id);
        assert_eq!(updated.slug, "gouda");
        assert_eq!(updated.name, "Aged Gouda");
        assert_eq!(updated.description, "Crystalline");
        assert_eq!(updated.firmness, Firmness::SemiHard);
        assert_eq!(updated.country_of_origin, None);
        assert_eq!(updated.creator, Some(user.id));
        assert_eq!(updated.created, cheese.created);
    }

    #[tokio::test]
    async fn test_update_missing_slug() {
        let pool = create_test_pool().await.unwrap();

        let result = update_cheese(
            &pool,
            "nope",
            CheeseChanges {
                name: "Nope".to_string(),
                description: String::new(),
                firmness: Firmness::Soft,
                country_of_origin: None,
            },
        )
        .await
        .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let pool = create_test_pool().await.unwrap();
        assert!(list_cheeses(&pool).await.unwrap().is_empty());

        insert_cheese(&pool, new_cheese("Taleggio")).await.unwrap();
        insert_cheese(&pool, new_cheese("Asiago")).await.unwrap();

        let names: Vec<String> = list_cheeses(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Asiago", "Taleggio"]);
    }
}
