use std::fmt;
use std::str::FromStr;

use crate::api::urls::Route;

/// Texture category of a cheese. Stored as its kebab-case value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "kebab-case")]
pub enum Firmness {
    #[default]
    Unspecified,
    Soft,
    SemiSoft,
    SemiHard,
    Hard,
}

impl Firmness {
    pub const ALL: [Firmness; 5] = [
        Firmness::Unspecified,
        Firmness::Soft,
        Firmness::SemiSoft,
        Firmness::SemiHard,
        Firmness::Hard,
    ];

    /// Value submitted by forms and stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Firmness::Unspecified => "unspecified",
            Firmness::Soft => "soft",
            Firmness::SemiSoft => "semi-soft",
            Firmness::SemiHard => "semi-hard",
            Firmness::Hard => "hard",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Firmness::Unspecified => "Unspecified",
            Firmness::Soft => "Soft",
            Firmness::SemiSoft => "Semi-Soft",
            Firmness::SemiHard => "Semi-Hard",
            Firmness::Hard => "Hard",
        }
    }
}

impl fmt::Display for Firmness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Firmness {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Firmness::ALL
            .into_iter()
            .find(|firmness| firmness.as_str() == value)
            .ok_or_else(|| {
                format!("Select a valid choice. {value} is not one of the available choices.")
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Cheese {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub firmness: Firmness,
    pub country_of_origin: Option<String>,
    /// Id of the user who added the cheese. Never changed after creation.
    pub creator: Option<String>,
    pub created: String,
    pub modified: String,
}

impl Cheese {
    pub fn detail_url(&self) -> String {
        Route::Detail {
            slug: self.slug.clone(),
        }
        .reverse()
    }

    pub fn update_url(&self) -> String {
        Route::Update {
            slug: self.slug.clone(),
        }
        .reverse()
    }
}

impl fmt::Display for Cheese {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Fields for a cheese that has not been stored yet. The slug is derived by
/// the store on insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCheese {
    pub name: String,
    pub description: String,
    pub firmness: Firmness,
    pub country_of_origin: Option<String>,
    pub creator: Option<String>,
}

/// Editable fields of a stored cheese.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheeseChanges {
    pub name: String,
    pub description: String,
    pub firmness: Firmness,
    pub country_of_origin: Option<String>,
}
