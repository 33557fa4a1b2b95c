use crate::credentials::Credential;
use crate::error::{DashboardError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const LEETCODE_GRAPHQL_URL: &str = "https://leetcode.com/graphql";

const CLIENT_USER_AGENT: &str = "Dev Dashboard Server/0.1.0";
// LeetCode rejects requests that do not look like they come from a browser
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// One GraphQL POST to an upstream endpoint
#[derive(Debug)]
pub struct GraphQLRequest<'a> {
    pub endpoint: &'a Url,
    pub query: &'a str,
    pub variables: Value,
    pub headers: HeaderMap,
}

/// Thin GraphQL transport shared by the GitHub and LeetCode paths.
///
/// Issues exactly one request per call: no retries, no caching.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(CLIENT_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(UpstreamClient { client })
    }

    pub async fn call(&self, request: GraphQLRequest<'_>) -> Result<Value> {
        debug!(endpoint = %request.endpoint, "Sending GraphQL request");

        let response = self
            .client
            .post(request.endpoint.clone())
            .headers(request.headers)
            .json(&json!({
                "query": request.query,
                "variables": request.variables,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::TransportError(format!(
                "{} responded with {} {}",
                request.endpoint.host_str().unwrap_or("upstream"),
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )));
        }

        let body: Value = response.json().await?;
        Ok(body)
    }
}

/// Headers for the GitHub endpoint. Fails before any request is made when no
/// token is configured.
pub fn github_headers(credential: Option<&Credential>) -> Result<HeaderMap> {
    let credential = credential.ok_or_else(|| {
        DashboardError::AuthError(
            "No GitHub token available. Please run `gh auth login` or set GITHUB_TOKEN environment variable."
                .to_string(),
        )
    })?;

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", credential.secret()))
        .map_err(|_| DashboardError::AuthError("GitHub token contains invalid characters".to_string()))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Headers for the LeetCode endpoint
pub fn leetcode_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
