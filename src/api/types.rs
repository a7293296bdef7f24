use std::fmt;
use std::str::FromStr;

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    #[serde(default)]
    pub text: String,
}

/// Process-wide presentation setting. Never consulted by the search logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Error)]
#[error("unknown theme {0:?}, expected \"light\" or \"dark\"")]
pub struct UnknownTheme(String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(value.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<anyhow::Error>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            detail: None,
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
            detail: Some(err),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            detail: None,
        }
    }

    pub fn bad_gateway(message: impl Into<String>, err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
            detail: Some(err),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let Some(detail) = &self.detail {
            tracing::error!(error = %detail);
        }
        let body = Json(ErrorBody {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        ApiError::internal(value)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let message = err.user_message();
        match err {
            CatalogError::EmptyQuery => ApiError::bad_request(message),
            CatalogError::ProviderEmpty(_) => ApiError::not_found(message),
            CatalogError::Transport(_) => ApiError::bad_gateway(message, err.into()),
        }
    }
}
