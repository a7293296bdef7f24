use thiserror::Error;

/// Message shown for any transport failure; the detail only goes to logs.
pub const TRANSPORT_MESSAGE: &str = "We couldn't fetch the movies. Please try again later.";
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search term";
pub const NOT_FOUND_MESSAGE: &str = "No movies found";

/// The single failure shape returned by every catalog call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("empty query")]
    EmptyQuery,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider returned no result: {0}")]
    ProviderEmpty(String),
}

impl CatalogError {
    pub fn transport(detail: impl std::fmt::Display) -> Self {
        Self::Transport(detail.to_string())
    }

    /// Reason suitable for the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::EmptyQuery => EMPTY_QUERY_MESSAGE.to_string(),
            CatalogError::Transport(_) => TRANSPORT_MESSAGE.to_string(),
            CatalogError::ProviderEmpty(message) if message.trim().is_empty() => {
                NOT_FOUND_MESSAGE.to_string()
            }
            CatalogError::ProviderEmpty(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::transport(err)
    }
}
