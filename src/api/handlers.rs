use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{debug, info, instrument};

use crate::catalog::{Catalog, MovieDetails};
use crate::controller::ViewSnapshot;

use super::state::AppState;
use super::types::{ApiError, QueryBody, ThemeBody};

pub async fn healthz() -> &'static str {
    "ok"
}

#[instrument(skip_all)]
pub async fn get_view<C: Catalog>(State(state): State<AppState<C>>) -> Json<ViewSnapshot> {
    Json(state.session.view())
}

#[instrument(skip_all)]
pub async fn update_query<C: Catalog>(
    State(state): State<AppState<C>>,
    Json(body): Json<QueryBody>,
) -> Result<StatusCode, ApiError> {
    debug!(len = body.text.len(), "query changed");
    state.session.on_query_change(body.text).await?;
    Ok(StatusCode::ACCEPTED)
}

#[instrument(skip_all)]
pub async fn load_more<C: Catalog>(
    State(state): State<AppState<C>>,
) -> Result<StatusCode, ApiError> {
    state.session.on_load_more().await?;
    Ok(StatusCode::ACCEPTED)
}

#[instrument(skip_all)]
pub async fn get_title_by_id<C: Catalog>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<MovieDetails>, ApiError> {
    info!(%id, "title lookup");
    let details = state.catalog.get_by_id(&id).await?;
    Ok(Json(details))
}

pub async fn get_theme<C: Catalog>(State(state): State<AppState<C>>) -> Json<ThemeBody> {
    let theme = *state.theme.read().await;
    Json(ThemeBody { theme })
}

#[instrument(skip_all)]
pub async fn put_theme<C: Catalog>(
    State(state): State<AppState<C>>,
    Json(body): Json<ThemeBody>,
) -> Json<ThemeBody> {
    *state.theme.write().await = body.theme;
    info!(theme = %body.theme, "theme updated");
    Json(body)
}
