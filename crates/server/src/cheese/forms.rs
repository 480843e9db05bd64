use std::collections::BTreeMap;

use serde::Deserialize;

use super::models::{Cheese, CheeseChanges, Firmness, NewCheese};
use crate::auth::User;
use crate::validation::country::normalize_country_code;

pub const NAME_MAX_CHARS: usize = 255;

const REQUIRED: &str = "This field is required.";

/// Raw fields as submitted by the create and update forms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CheeseForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub firmness: String,
    #[serde(default)]
    pub country_of_origin: String,
}

/// Field-level validation messages keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

/// Validated form contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheeseInput {
    pub name: String,
    pub description: String,
    pub firmness: Firmness,
    pub country_of_origin: Option<String>,
}

impl CheeseForm {
    /// Pre-fill the form from a stored cheese.
    pub fn from_cheese(cheese: &Cheese) -> Self {
        Self {
            name: cheese.name.clone(),
            description: cheese.description.clone(),
            firmness: cheese.firmness.as_str().to_string(),
            country_of_origin: cheese.country_of_origin.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<CheeseInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        let name_chars = name.chars().count();
        if name.is_empty() {
            errors.add("name", REQUIRED);
        } else if name_chars > NAME_MAX_CHARS {
            errors.add(
                "name",
                format!(
                    "Ensure this value has at most {NAME_MAX_CHARS} characters (it has {name_chars})."
                ),
            );
        }

        let firmness = match self.firmness.trim() {
            "" => {
                errors.add("firmness", REQUIRED);
                None
            }
            value => match value.parse::<Firmness>() {
                Ok(firmness) => Some(firmness),
                Err(message) => {
                    errors.add("firmness", message);
                    None
                }
            },
        };

        let country_of_origin = match normalize_country_code(&self.country_of_origin) {
            Ok(code) => code,
            Err(message) => {
                errors.add("country_of_origin", message);
                None
            }
        };

        match firmness {
            Some(firmness) if errors.is_empty() => Ok(CheeseInput {
                name: name.to_string(),
                description: self.description.trim().to_string(),
                firmness,
                country_of_origin,
            }),
            _ => Err(errors),
        }
    }
}

impl CheeseInput {
    /// The creator always comes from the signed-in caller, never from
    /// submitted data.
    pub fn into_new_cheese(self, creator: &User) -> NewCheese {
        NewCheese {
            name: self.name,
            description: self.description,
            firmness: self.firmness,
            country_of_origin: self.country_of_origin,
            creator: Some(creator.id.clone()),
        }
    }

    pub fn into_changes(self) -> CheeseChanges {
        CheeseChanges {
            name: self.name,
            description: self.description,
            firmness: self.firmness,
            country_of_origin: self.country_of_origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paski_sir() -> CheeseForm {
        CheeseForm {
            name: "Paski Sir".to_string(),
            description: "A salty hard cheese".to_string(),
            firmness: "hard".to_string(),
            country_of_origin: String::new(),
        }
    }

    #[test]
    fn test_valid_form() {
        let input = paski_sir().validate().unwrap();
        assert_eq!(input.name, "Paski Sir");
        assert_eq!(input.description, "A salty hard cheese");
        assert_eq!(input.firmness, Firmness::Hard);
        assert_eq!(input.country_of_origin, None);
    }

    #[test]
    fn test_fields_are_trimmed_and_country_normalized() {
        let form = CheeseForm {
            name: "  Paski Sir ".to_string(),
            description: " salty\n".to_string(),
            country_of_origin: "hr".to_string(),
            ..paski_sir()
        };

        let input = form.validate().unwrap();
        assert_eq!(input.name, "Paski Sir");
        assert_eq!(input.description, "salty");
        assert_eq!(input.country_of_origin.as_deref(), Some("HR"));
    }

    #[test]
    fn test_missing_fields() {
        let errors = CheeseForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), [REQUIRED.to_string()]);
        assert_eq!(errors.get("firmness"), [REQUIRED.to_string()]);
        assert!(errors.get("description").is_empty());
        assert!(errors.get("country_of_origin").is_empty());
    }

    #[test]
    fn test_firmness_outside_choices() {
        let form = CheeseForm {
            firmness: "HARD".to_string(),
            ..paski_sir()
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["firmness"]);
        assert_eq!(
            errors.get("firmness"),
            ["Select a valid choice. HARD is not one of the available choices.".to_string()]
        );
    }

    #[test]
    fn test_name_too_long() {
        let form = CheeseForm {
            name: "x".repeat(NAME_MAX_CHARS + 1),
            ..paski_sir()
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("name"),
            ["Ensure this value has at most 255 characters (it has 256).".to_string()]
        );
    }

    #[test]
    fn test_bad_country_code() {
        let form = CheeseForm {
            country_of_origin: "Croatia".to_string(),
            ..paski_sir()
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["country_of_origin"]);
    }

    #[test]
    fn test_creator_comes_from_caller() {
        let user = User {
            id: "user-1".to_string(),
            username: "admin".to_string(),
            email: None,
            is_staff: true,
            created: String::new(),
        };

        let new = paski_sir().validate().unwrap().into_new_cheese(&user);
        assert_eq!(new.creator.as_deref(), Some("user-1"));
        assert_eq!(new.firmness, Firmness::Hard);
    }

    #[test]
    fn test_from_cheese_prefills() {
        let cheese = Cheese {
            id: "c1".to_string(),
            name: "Brie".to_string(),
            slug: "brie".to_string(),
            description: "Soft".to_string(),
            firmness: Firmness::SemiSoft,
            country_of_origin: Some("FR".to_string()),
            creator: None,
            created: String::new(),
            modified: String::new(),
        };

        let form = CheeseForm::from_cheese(&cheese);
        assert_eq!(form.firmness, "semi-soft");
        assert_eq!(form.country_of_origin, "FR");
        assert_eq!(form.validate().unwrap().into_changes().name, "Brie");
    }
}
