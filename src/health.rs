use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub github_credential: CheckResult,
    pub tool_chain: CheckResult,
}

/// Result of an individual check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness probe response (minimal, just indicates the process is running)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

pub fn create_health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/livez", get(liveness_check))
        .with_state(state)
}

/// Reports configuration problems without calling any upstream
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let github_credential = if state.stats.has_credential() {
        CheckResult {
            status: HealthStatus::Healthy,
            message: None,
        }
    } else {
        CheckResult {
            status: HealthStatus::Degraded,
            message: Some("No GitHub token configured; GitHub endpoints will fail".to_string()),
        }
    };

    let tool_chain = if !state.tools.is_enabled() {
        CheckResult {
            status: HealthStatus::Degraded,
            message: Some("Documentation tool chain disabled".to_string()),
        }
    } else if state.tools.is_connected() {
        CheckResult {
            status: HealthStatus::Healthy,
            message: None,
        }
    } else {
        CheckResult {
            status: HealthStatus::Healthy,
            message: Some("Not connected".to_string()),
        }
    };

    let status = if github_credential.status == HealthStatus::Degraded
        || tool_chain.status == HealthStatus::Degraded
    {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        started_at: state.started_at,
        checks: HealthChecks {
            github_credential,
            tool_chain,
        },
    };

    // Degraded still serves requests
    (StatusCode::OK, Json(response))
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}
