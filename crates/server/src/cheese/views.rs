//! Request handlers for the cheese pages.
//!
//! Each handler takes the store handle from [`AppState`]. Create and update
//! have one handler for GET (render the form) and one for POST (submit it).

use askama::Template;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use metrics::counter;

use super::db::{fetch_cheese_by_slug, insert_cheese, list_cheeses, update_cheese};
use super::forms::{CheeseForm, FieldErrors};
use super::models::Cheese;
use super::templates::{CheeseDetailPage, CheeseFormPage, CheeseListPage};
use crate::api::errors::ViewError;
use crate::api::redirect::found;
use crate::api::state::AppState;
use crate::api::urls::{ADD_PATH, LIST_PATH};
use crate::auth::LoginRequired;
use crate::auth::db::fetch_user_by_id;
use crate::validation::slug::validate_slug;

const ADD_TITLE: &str = "Add Cheese";
const UPDATE_TITLE: &str = "Update Cheese";

pub async fn cheese_list(State(state): State<AppState>) -> Result<Html<String>, ViewError> {
    let cheeses = list_cheeses(&state.pool).await?;
    Ok(Html(CheeseListPage::new(cheeses).render()?))
}

pub async fn cheese_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, ViewError> {
    let cheese = find_cheese(&state, &slug).await?;
    let creator = match cheese.creator.as_deref() {
        Some(user_id) => fetch_user_by_id(&state.pool, user_id).await?,
        None => None,
    };

    Ok(Html(CheeseDetailPage::new(cheese, creator).render()?))
}

pub async fn cheese_create_form(LoginRequired(_user): LoginRequired) -> Result<Html<String>, ViewError> {
    render_create_form(&CheeseForm::default(), &FieldErrors::default())
}

pub async fn cheese_create(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Form(form): Form<CheeseForm>,
) -> Result<Response, ViewError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            counter!("cheeses.form_invalid", "view" => "create").increment(1);
            return Ok(render_create_form(&form, &errors)?.into_response());
        }
    };

    let cheese = insert_cheese(&state.pool, input.into_new_cheese(&user)).await?;
    counter!("cheeses.created").increment(1);
    tracing::info!(slug = %cheese.slug, creator = %user.username, "cheese created");

    Ok(found(&cheese.detail_url()))
}

pub async fn cheese_update_form(
    State(state): State<AppState>,
    LoginRequired(_user): LoginRequired,
    Path(slug): Path<String>,
) -> Result<Html<String>, ViewError> {
    let cheese = find_cheese(&state, &slug).await?;
    render_update_form(&cheese, &CheeseForm::from_cheese(&cheese), &FieldErrors::default())
}

pub async fn cheese_update(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Path(slug): Path<String>,
    Form(form): Form<CheeseForm>,
) -> Result<Response, ViewError> {
    let cheese = find_cheese(&state, &slug).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            counter!("cheeses.form_invalid", "view" => "update").increment(1);
            return Ok(render_update_form(&cheese, &form, &errors)?.into_response());
        }
    };

    let updated = update_cheese(&state.pool, &cheese.slug, input.into_changes())
        .await?
        .ok_or(ViewError::NotFound)?;
    counter!("cheeses.updated").increment(1);
    tracing::info!(slug = %updated.slug, editor = %user.username, "cheese updated");

    Ok(found(&updated.detail_url()))
}

async fn find_cheese(state: &AppState, slug: &str) -> Result<Cheese, ViewError> {
    if validate_slug(slug).is_err() {
        return Err(ViewError::NotFound);
    }

    fetch_cheese_by_slug(&state.pool, slug)
        .await?
        .ok_or(ViewError::NotFound)
}

fn render_create_form(form: &CheeseForm, errors: &FieldErrors) -> Result<Html<String>, ViewError> {
    let page = CheeseFormPage::new(
        ADD_TITLE,
        ADD_PATH.to_string(),
        LIST_PATH.to_string(),
        form,
        errors,
    );
    Ok(Html(page.render()?))
}

fn render_update_form(
    cheese: &Cheese,
    form: &CheeseForm,
    errors: &FieldErrors,
) -> Result<Html<String>, ViewError> {
    let page = CheeseFormPage::new(
        UPDATE_TITLE,
        cheese.update_url(),
        cheese.detail_url(),
        form,
        errors,
    );
    Ok(Html(page.render()?))
}
