use crate::config::DashboardConfig;
use crate::credentials::Credential;
use crate::error::{DashboardError, ErrorResponse, Result};
use crate::health;
use crate::llm::ChatModel;
use crate::mcp::ToolChain;
use crate::models::{DashboardStats, GitHubStats, LeetCodeStats};
use crate::stats::StatsService;
use crate::upstream::UpstreamClient;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared, request-independent application state
#[derive(Clone)]
pub struct AppState {
    pub stats: StatsService,
    pub tools: Arc<ToolChain>,
    pub chat: ChatModel,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build the state from settings and the credential resolved at startup
    pub fn new(config: &DashboardConfig, credential: Option<Credential>) -> Result<Self> {
        let upstream = UpstreamClient::new(config.upstream_timeout)?;
        let stats = StatsService::new(
            upstream,
            config.endpoints.clone(),
            config.queries.clone(),
            credential,
        );
        let chat = ChatModel::new(
            config.ollama_url.clone(),
            config.ollama_model.clone(),
            config.chat_timeout,
        )?;

        Ok(Self {
            stats,
            tools: Arc::new(ToolChain::new(
                config.mcp_command.clone(),
                config.mcp_timeout,
            )),
            chat,
            start_time: Instant::now(),
            started_at: Utc::now(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub args: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Create the API router, serving the UI from `static_dir` for every other path
pub fn create_router(state: AppState, static_dir: &std::path::Path) -> Router {
    let api = Router::new()
        .route("/api/user", get(get_user))
        .route("/api/stats/:username", get(get_github_stats))
        .route("/api/leetcode/:username", get(get_leetcode_stats))
        .route("/api/dashboard/:username", get(get_dashboard))
        .route("/api/mcp/tools", get(list_tools))
        .route("/api/mcp/call", post(call_tool))
        .route("/api/llm/chat", post(chat))
        .with_state(state.clone());

    api.merge(health::create_health_router(state))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl+C
pub async fn start_server(state: AppState, config: &DashboardConfig) -> Result<()> {
    let app = create_router(state, &config.static_dir);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Dashboard server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down server...");
}

fn logged(route: &'static str) -> impl Fn(DashboardError) -> DashboardError {
    move |e| {
        error!(route, status = e.status_code().as_u16(), "Request failed: {}", e);
        e
    }
}

/// Error text for routes that relay upstream GraphQL messages unprefixed
fn relayed_message(e: &DashboardError) -> String {
    match e {
        DashboardError::UpstreamGraphQLError(message) => message.clone(),
        other => other.to_string(),
    }
}

/// Token owner. Every failure is reported as a server error.
async fn get_user(State(state): State<AppState>) -> Response {
    match state.stats.viewer_login().await {
        Ok(username) => (StatusCode::OK, Json(UserResponse { username })).into_response(),
        Err(e) => {
            error!("Auth check error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: relayed_message(&e),
                }),
            )
                .into_response()
        }
    }
}

async fn get_github_stats(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> std::result::Result<Json<GitHubStats>, DashboardError> {
    let stats = state
        .stats
        .github_stats(&username)
        .await
        .map_err(logged("stats"))?;
    Ok(Json(stats))
}

async fn get_leetcode_stats(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Response {
    match state.stats.leetcode_stats(&username).await {
        Ok(stats) => Json::<LeetCodeStats>(stats).into_response(),
        Err(e) => {
            let e = logged("leetcode")(e);
            (
                e.status_code(),
                Json(ErrorResponse {
                    error: relayed_message(&e),
                }),
            )
                .into_response()
        }
    }
}

async fn get_dashboard(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> std::result::Result<Json<DashboardStats>, DashboardError> {
    let dashboard = state
        .stats
        .dashboard(&username)
        .await
        .map_err(logged("dashboard"))?;
    Ok(Json(dashboard))
}

async fn list_tools(
    State(state): State<AppState>,
) -> std::result::Result<Json<Value>, DashboardError> {
    let tools = state.tools.list_tools().await.map_err(logged("mcp/tools"))?;
    Ok(Json(tools))
}

async fn call_tool(
    State(state): State<AppState>,
    Json(request): Json<ToolCallRequest>,
) -> std::result::Result<Json<Value>, DashboardError> {
    let args = request
        .args
        .unwrap_or_else(|| Value::Object(Default::default()));
    let result = state
        .tools
        .call_tool(&request.name, args)
        .await
        .map_err(logged("mcp/call"))?;
    Ok(Json(result))
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    match state
        .chat
        .chat(&request.prompt, request.context.as_deref())
        .await
    {
        Ok(response) => (StatusCode::OK, Json(ChatResponse { response })).into_response(),
        Err(e) => {
            error!("Chat error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
