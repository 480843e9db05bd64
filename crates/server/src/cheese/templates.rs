use askama::Template;

use super::forms::{CheeseForm, FieldErrors};
use super::models::{Cheese, Firmness};
use crate::api::urls::{ADD_PATH, LIST_PATH};
use crate::auth::User;

#[derive(Template)]
#[template(path = "cheeses/cheese_list.html")]
pub struct CheeseListPage {
    pub cheeses: Vec<Cheese>,
    pub add_url: &'static str,
}

impl CheeseListPage {
    pub fn new(cheeses: Vec<Cheese>) -> Self {
        Self {
            cheeses,
            add_url: ADD_PATH,
        }
    }
}

#[derive(Template)]
#[template(path = "cheeses/cheese_detail.html")]
pub struct CheeseDetailPage {
    pub cheese: Cheese,
    pub creator: Option<User>,
    pub list_url: &'static str,
}

impl CheeseDetailPage {
    pub fn new(cheese: Cheese, creator: Option<User>) -> Self {
        Self {
            cheese,
            creator,
            list_url: LIST_PATH,
        }
    }
}

/// A form input with its current value and any validation messages.
pub struct FormField {
    pub value: String,
    pub errors: Vec<String>,
}

impl FormField {
    fn new(value: &str, errors: &FieldErrors, field: &str) -> Self {
        Self {
            value: value.to_string(),
            errors: errors.get(field).to_vec(),
        }
    }
}

pub struct FirmnessChoice {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "cheeses/cheese_form.html")]
pub struct CheeseFormPage {
    pub title: &'static str,
    pub action: String,
    pub cancel_url: String,
    pub name: FormField,
    pub description: FormField,
    pub firmness_errors: Vec<String>,
    pub country_of_origin: FormField,
    pub firmness_choices: Vec<FirmnessChoice>,
}

impl CheeseFormPage {
    pub fn new(
        title: &'static str,
        action: String,
        cancel_url: String,
        form: &CheeseForm,
        errors: &FieldErrors,
    ) -> Self {
        let firmness_choices = Firmness::ALL
            .into_iter()
            .map(|firmness| FirmnessChoice {
                value: firmness.as_str(),
                label: firmness.label(),
                selected: firmness.as_str() == form.firmness,
            })
            .collect();

        Self {
            title,
            action,
            cancel_url,
            name: FormField::new(&form.name, errors, "name"),
            description: FormField::new(&form.description, errors, "description"),
            firmness_errors: errors.get("firmness").to_vec(),
            country_of_origin: FormField::new(
                &form.country_of_origin,
                errors,
                "country_of_origin",
            ),
            firmness_choices,
        }
    }
}
