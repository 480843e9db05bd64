use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use super::User;
use super::session::session_token_from_cookies;
use crate::api::errors::ViewError;
use crate::api::redirect::found;
use crate::api::state::AppState;
use crate::api::urls::login_url;

/// The signed-in user, if the request carries a live session cookie.
pub struct CurrentUser(pub Option<User>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ViewError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_token_from_cookies)
            .map(str::to_owned);

        let Some(token) = token else {
            return Ok(CurrentUser(None));
        };

        let user = state.sessions.get_user(&token).await?;
        Ok(CurrentUser(user))
    }
}

/// A signed-in user. Anonymous requests are redirected to the login page
/// with a `next` parameter pointing back at the requested path.
pub struct LoginRequired(pub User);

impl FromRequestParts<AppState> for LoginRequired {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match user {
            Some(user) => Ok(LoginRequired(user)),
            None => {
                let path = parts.uri.path();
                tracing::debug!(%path, "redirecting anonymous request to login");
                Err(found(&login_url(path)))
            }
        }
    }
}
