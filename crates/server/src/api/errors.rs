use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::urls::LIST_PATH;

#[derive(Template)]
#[template(path = "404.html")]
struct NotFoundPage {
    list_url: &'static str,
}

#[derive(Template)]
#[template(path = "500.html")]
struct ServerErrorPage {
    list_url: &'static str,
}

/// Failures a view can end in. Validation problems are not errors; views
/// re-render their form for those.
#[derive(Debug)]
pub enum ViewError {
    NotFound,
    Internal(String),
}

impl ViewError {
    pub fn status(&self) -> StatusCode {
        match self {
            ViewError::NotFound => StatusCode::NOT_FOUND,
            ViewError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match self {
            ViewError::NotFound => NotFoundPage {
                list_url: LIST_PATH,
            }
            .render(),
            ViewError::Internal(message) => {
                tracing::error!("request failed: {}", message);
                ServerErrorPage {
                    list_url: LIST_PATH,
                }
                .render()
            }
        };

        match page {
            Ok(body) => (status, Html(body)).into_response(),
            Err(err) => {
                tracing::error!("failed to render error page: {}", err);
                (status, status.canonical_reason().unwrap_or_default()).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for ViewError {
    fn from(err: sqlx::Error) -> Self {
        ViewError::Internal(format!("database error: {err}"))
    }
}

impl From<anyhow::Error> for ViewError {
    fn from(err: anyhow::Error) -> Self {
        ViewError::Internal(format!("{err:#}"))
    }
}

impl From<askama::Error> for ViewError {
    fn from(err: askama::Error) -> Self {
        ViewError::Internal(format!("template error: {err}"))
    }
}
