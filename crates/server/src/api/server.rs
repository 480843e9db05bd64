use anyhow::{Context, Result};
use axum::Router;
use axum::response::Response;
use axum::routing::get;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use super::errors::ViewError;
use super::redirect::found;
use super::state::AppState;
use super::urls::{ADD_PATH, DETAIL_PATH, LIST_PATH, UPDATE_PATH};
use crate::cheese::views;

async fn index() -> Response {
    found(LIST_PATH)
}

async fn not_found() -> ViewError {
    ViewError::NotFound
}

pub fn build_app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(LIST_PATH, get(views::cheese_list))
        .route(
            ADD_PATH,
            get(views::cheese_create_form).post(views::cheese_create),
        )
        .route(DETAIL_PATH, get(views::cheese_detail))
        .route(
            UPDATE_PATH,
            get(views::cheese_update_form).post(views::cheese_update),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api(state: AppState, bind_addr: &str, shutdown: CancellationToken) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_app_router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
