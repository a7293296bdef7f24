use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;

use super::client::Catalog;
use super::error::CatalogError;
use super::types::{DetailResponse, SearchResponse};

/// Bounds every call of the wrapped catalog. An elapsed deadline completes
/// as a transport failure so no loading flag can stay set forever.
#[derive(Debug)]
pub struct TimedCatalog<C> {
    inner: Arc<C>,
    limit: Duration,
}

impl<C> TimedCatalog<C> {
    pub fn new(inner: Arc<C>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

impl<C: Catalog> Catalog for TimedCatalog<C> {
    async fn search(&self, query: &str, page: u32) -> SearchResponse {
        match timeout(self.limit, self.inner.search(query, page)).await {
            Ok(response) => response,
            Err(_) => {
                warn!(query, page, limit_ms = self.limit.as_millis() as u64, "catalog search timed out");
                Err(CatalogError::transport("request timed out"))
            }
        }
    }

    async fn get_by_id(&self, id: &str) -> DetailResponse {
        match timeout(self.limit, self.inner.get_by_id(id)).await {
            Ok(response) => response,
            Err(_) => {
                warn!(id, limit_ms = self.limit.as_millis() as u64, "title lookup timed out");
                Err(CatalogError::transport("request timed out"))
            }
        }
    }
}
