use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::session::SessionHandle;

use super::handlers::{get_theme, get_title_by_id, get_view, healthz, load_more, put_theme, update_query};
use super::types::Theme;

pub struct AppState<C> {
    pub(crate) session: SessionHandle,
    pub(crate) catalog: Arc<C>,
    pub(crate) theme: Arc<RwLock<Theme>>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            catalog: Arc::clone(&self.catalog),
            theme: Arc::clone(&self.theme),
        }
    }
}

impl<C: Catalog> AppState<C> {
    pub fn new(session: SessionHandle, catalog: Arc<C>, theme: Theme) -> Self {
        Self {
            session,
            catalog,
            theme: Arc::new(RwLock::new(theme)),
        }
    }
}

pub fn router<C: Catalog>(state: AppState<C>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/view", get(get_view::<C>))
        .route("/query", post(update_query::<C>))
        .route("/load-more", post(load_more::<C>))
        .route("/titles/{id}", get(get_title_by_id::<C>))
        .route("/theme", get(get_theme::<C>).put(put_theme::<C>))
        .with_state(state)
}
