//! Factories producing randomized users and cheeses straight into the store.

use anyhow::Result;
use fake::Fake;
use fake::faker::address::en::CountryCode;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::Paragraph;
use rand::Rng;
use rand::seq::SliceRandom;
use sqlx::SqlitePool;

use crate::auth::User;
use crate::auth::db::create_user;
use crate::cheese::db::insert_cheese;
use crate::cheese::{Cheese, Firmness, NewCheese};

const FUZZY_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const FUZZY_LENGTH: usize = 12;

/// Random ASCII letters.
pub fn fuzzy_text(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| FUZZY_CHARS[rng.gen_range(0..FUZZY_CHARS.len())] as char)
        .collect()
}

pub fn fuzzy_firmness() -> Firmness {
    Firmness::ALL
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}

/// Builds cheeses with random values for every field not set explicitly.
#[derive(Clone, Debug, Default)]
pub struct CheeseFactory {
    name: Option<String>,
    description: Option<String>,
    firmness: Option<Firmness>,
    country_of_origin: Option<Option<String>>,
    creator: Option<String>,
}

impl CheeseFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn firmness(mut self, firmness: Firmness) -> Self {
        self.firmness = Some(firmness);
        self
    }

    pub fn country_of_origin(mut self, country: Option<&str>) -> Self {
        self.country_of_origin = Some(country.map(str::to_string));
        self
    }

    pub fn creator(mut self, user: &User) -> Self {
        self.creator = Some(user.id.clone());
        self
    }

    /// Unsaved field values.
    pub fn build(&self) -> NewCheese {
        NewCheese {
            name: self
                .name
                .clone()
                .unwrap_or_else(|| fuzzy_text(FUZZY_LENGTH)),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| Paragraph(3..6).fake()),
            firmness: self.firmness.unwrap_or_else(fuzzy_firmness),
            country_of_origin: self
                .country_of_origin
                .clone()
                .unwrap_or_else(|| Some(CountryCode().fake())),
            creator: self.creator.clone(),
        }
    }

    pub async fn create(&self, pool: &SqlitePool) -> Result<Cheese> {
        insert_cheese(pool, self.build()).await
    }

    pub async fn create_batch(&self, pool: &SqlitePool, count: usize) -> Result<Vec<Cheese>> {
        let mut cheeses = Vec::with_capacity(count);
        for _ in 0..count {
            cheeses.push(self.create(pool).await?);
        }
        Ok(cheeses)
    }
}

/// Builds users with random usernames and emails.
#[derive(Clone, Debug, Default)]
pub struct UserFactory {
    username: Option<String>,
    is_staff: bool,
}

impl UserFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A staff user named `admin`.
    pub fn admin() -> Self {
        Self {
            username: Some("admin".to_string()),
            is_staff: true,
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    pub async fn create(&self, pool: &SqlitePool) -> Result<User> {
        let username = match &self.username {
            Some(username) => username.clone(),
            // Suffix keeps generated names unique within a test database.
            None => format!("{}-{}", Username().fake::<String>(), fuzzy_text(6)),
        };
        let email: String = SafeEmail().fake();

        let user = create_user(pool, &username, Some(&email), self.is_staff).await?;
        Ok(user)
    }
}
