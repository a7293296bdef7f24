use std::future::Future;

use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::AppConfig;

use super::error::CatalogError;
use super::types::{
    DetailResponse, MovieDetails, OmdbDetails, OmdbSearchEnvelope, SearchPage, SearchResponse,
    is_provider_success,
};

/// Read-only access to the remote movie catalog.
///
/// Implementations never fail by panicking or with foreign error types:
/// every expected failure comes back as a [`CatalogError`].
pub trait Catalog: Send + Sync + 'static {
    fn search(&self, query: &str, page: u32) -> impl Future<Output = SearchResponse> + Send;

    fn get_by_id(&self, id: &str) -> impl Future<Output = DetailResponse> + Send;
}

/// Catalog backed by the OMDb HTTP API.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building http client")?;
        Ok(Self::new(client, &config.api_key, &config.base_url))
    }

    async fn fetch<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, CatalogError> {
        let mut query: Vec<(&str, &str)> = vec![("apikey", self.api_key.as_str())];
        query.extend_from_slice(params);

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::transport(format!("status {status}")));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|err| CatalogError::transport(format!("decoding response: {err}")))
    }
}

impl Catalog for OmdbClient {
    async fn search(&self, query: &str, page: u32) -> SearchResponse {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }

        let page_param = page.max(1).to_string();
        debug!(query, page = %page_param, "searching catalog");

        let envelope: OmdbSearchEnvelope = self
            .fetch(&[
                ("s", query),
                ("page", page_param.as_str()),
                ("type", "movie"),
            ])
            .await
            .inspect_err(|err| warn!(query, error = %err, "catalog search failed"))?;

        if !is_provider_success(&envelope.response) {
            let message = envelope.error.unwrap_or_default();
            debug!(query, message = %message, "provider found nothing");
            return Err(CatalogError::ProviderEmpty(message));
        }

        Ok(SearchPage {
            results: envelope.search.into_iter().map(Into::into).collect(),
            total_available: envelope.total_results,
        })
    }

    async fn get_by_id(&self, id: &str) -> DetailResponse {
        let id = id.trim();
        if id.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }

        debug!(id, "fetching title details");
        let raw: OmdbDetails = self
            .fetch(&[("i", id), ("plot", "full")])
            .await
            .inspect_err(|err| warn!(id, error = %err, "title lookup failed"))?;

        if !is_provider_success(&raw.response) {
            return Err(CatalogError::ProviderEmpty(raw.error.unwrap_or_default()));
        }

        Ok(MovieDetails::from(raw))
    }
}
