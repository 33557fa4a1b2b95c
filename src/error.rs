use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Upstream request failed: {0}")]
    TransportError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("GraphQL Error: {0}")]
    UpstreamGraphQLError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Tool chain unavailable: {0}")]
    ToolChainUnavailable(String),

    #[error("Tool call failed: {0}")]
    ToolCallError(String),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::NotFound(_) | DashboardError::UpstreamGraphQLError(_) => {
                StatusCode::NOT_FOUND
            }
            DashboardError::ToolChainUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for failures that happened before or while reaching an upstream,
    /// as opposed to the upstream answering with an application-level error.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DashboardError::TransportError(_)
                | DashboardError::NetworkError(_)
                | DashboardError::JsonError(_)
        )
    }

    /// Prefix transport failures with what was being fetched; other kinds pass through
    pub fn fetching(self, what: &str) -> Self {
        match self {
            DashboardError::TransportError(detail) => {
                DashboardError::TransportError(format!("Failed to fetch {}: {}", what, detail))
            }
            e if e.is_transport() => {
                DashboardError::TransportError(format!("Failed to fetch {}: {}", what, e))
            }
            e => e,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Body of every failed API response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
