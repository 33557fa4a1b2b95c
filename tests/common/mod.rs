#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use dev_dashboard::config::DashboardConfig;
use dev_dashboard::credentials::Credential;
use dev_dashboard::queries::QueryDocuments;
use dev_dashboard::server::{create_router, AppState};
use dev_dashboard::stats::Endpoints;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use url::Url;

pub const TEST_TOKEN: &str = "test-token";

/// Nothing listens here; connections are refused
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1/graphql";

/// What a stub upstream saw for one request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: Value,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Local HTTP server answering every request with a canned JSON body
pub struct StubUpstream {
    pub base: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubUpstream {
    pub async fn start(status: StatusCode, body: Value) -> anyhow::Result<Self> {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            body,
            requests: requests.clone(),
        };

        let app = Router::new().fallback(respond).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base: Url::parse(&format!("http://{}/", addr))?,
            requests,
        })
    }

    pub async fn ok(body: Value) -> Self {
        Self::start(StatusCode::OK, body)
            .await
            .expect("Failed to start stub upstream")
    }

    pub fn graphql_url(&self) -> Url {
        self.base.join("graphql").expect("valid stub URL")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("stub lock poisoned").clone()
    }
}

async fn respond(
    State(state): State<StubState>,
    request_headers: HeaderMap,
    uri: axum::http::Uri,
    body: Bytes,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        request_headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state
        .requests
        .lock()
        .expect("stub lock poisoned")
        .push(RecordedRequest {
            path: uri.path().to_string(),
            authorization: header_value(header::AUTHORIZATION),
            user_agent: header_value(header::USER_AGENT),
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        });

    (state.status, Json(state.body.clone()))
}

pub fn manifest_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Config pointing both upstreams at the given URLs, tool chain disabled
pub fn test_config(github: &Url, leetcode: &Url) -> DashboardConfig {
    let mut config = DashboardConfig::with_defaults().expect("default config");
    config.endpoints = Endpoints {
        github: github.clone(),
        leetcode: leetcode.clone(),
    };
    config.queries = QueryDocuments {
        github_user: manifest_path("queries/github_user.graphql"),
        leetcode_user: manifest_path("queries/leetcode_user.graphql"),
    };
    config.static_dir = manifest_path("public");
    config.mcp_command = None;
    config.upstream_timeout = Duration::from_secs(5);
    config.chat_timeout = Duration::from_secs(5);
    config
}

pub fn unreachable() -> Url {
    Url::parse(UNREACHABLE_URL).expect("valid URL")
}

pub fn app(config: &DashboardConfig, token: Option<&str>) -> Router {
    let state = AppState::new(config, token.and_then(Credential::new)).expect("app state");
    create_router(state, &config.static_dir)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn octocat_response() -> Value {
    json!({
        "data": {
            "user": {
                "login": "octocat",
                "name": "The Octocat",
                "avatarUrl": "https://avatars.githubusercontent.com/u/583231",
                "bio": null,
                "followers": { "totalCount": 10 },
                "following": { "totalCount": 2 },
                "repositories": {
                    "totalCount": 1,
                    "nodes": [{
                        "name": "Hello-World",
                        "description": "My first repository on GitHub!",
                        "url": "https://github.com/octocat/Hello-World",
                        "stargazerCount": 3,
                        "forkCount": 1,
                        "primaryLanguage": null
                    }]
                },
                "contributionsCollection": {
                    "contributionCalendar": {
                        "totalContributions": 5,
                        "weeks": [{
                            "contributionDays": [
                                { "date": "2026-01-04", "contributionCount": 0 },
                                { "date": "2026-01-05", "contributionCount": 5 }
                            ]
                        }]
                    }
                }
            }
        }
    })
}

pub fn leetcode_response() -> Value {
    json!({
        "data": {
            "allQuestionsCount": [
                { "difficulty": "All", "count": 3300 },
                { "difficulty": "Easy", "count": 830 },
                { "difficulty": "Medium", "count": 1730 },
                { "difficulty": "Hard", "count": 740 }
            ],
            "matchedUser": {
                "username": "octocat",
                "profile": { "ranking": 123456 },
                "submitStats": {
                    "acSubmissionNum": [
                        { "difficulty": "Hard", "count": 12 },
                        { "difficulty": "All", "count": 250 },
                        { "difficulty": "Medium", "count": 140 },
                        { "difficulty": "Easy", "count": 98 }
                    ]
                }
            }
        }
    })
}
