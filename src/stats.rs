use crate::credentials::Credential;
use crate::error::Result;
use crate::models::{DashboardStats, Enrichment, GitHubStats, LeetCodeStats};
use crate::normalizer::{normalize_github, normalize_leetcode, normalize_viewer};
use crate::queries::{QueryDocuments, VIEWER_QUERY};
use crate::upstream::{github_headers, leetcode_headers, GraphQLRequest, UpstreamClient};
use serde_json::json;
use tracing::{info, warn};
use url::Url;

/// GraphQL endpoints of the two upstreams
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub github: Url,
    pub leetcode: Url,
}

/// Fetches upstream data and normalizes it. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct StatsService {
    upstream: UpstreamClient,
    endpoints: Endpoints,
    queries: QueryDocuments,
    credential: Option<Credential>,
}

impl StatsService {
    pub fn new(
        upstream: UpstreamClient,
        endpoints: Endpoints,
        queries: QueryDocuments,
        credential: Option<Credential>,
    ) -> Self {
        Self {
            upstream,
            endpoints,
            queries,
            credential,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Login of the identity the GitHub token belongs to
    pub async fn viewer_login(&self) -> Result<String> {
        let headers = github_headers(self.credential.as_ref())?;
        let raw = self
            .upstream
            .call(GraphQLRequest {
                endpoint: &self.endpoints.github,
                query: VIEWER_QUERY,
                variables: json!({}),
                headers,
            })
            .await?;

        normalize_viewer(raw)
    }

    pub async fn github_stats(&self, username: &str) -> Result<GitHubStats> {
        let query = self.queries.github_user().await?;
        let headers = github_headers(self.credential.as_ref())?;

        let raw = self
            .upstream
            .call(GraphQLRequest {
                endpoint: &self.endpoints.github,
                query: &query,
                variables: json!({ "login": username }),
                headers,
            })
            .await
            .map_err(|e| e.fetching("GitHub data"))?;

        let stats = normalize_github(raw).map_err(|e| e.fetching("GitHub data"))?;
        info!(
            username = %stats.username,
            repos = stats.top_repos.len(),
            total_stars = stats.total_stars,
            "Fetched GitHub stats"
        );
        Ok(stats)
    }

    pub async fn leetcode_stats(&self, username: &str) -> Result<LeetCodeStats> {
        let query = self.queries.leetcode_user().await?;

        let raw = self
            .upstream
            .call(GraphQLRequest {
                endpoint: &self.endpoints.leetcode,
                query: &query,
                variables: json!({ "username": username }),
                headers: leetcode_headers(),
            })
            .await
            .map_err(|e| e.fetching("LeetCode data"))?;

        let stats = normalize_leetcode(raw).map_err(|e| e.fetching("LeetCode data"))?;
        info!(
            username = %stats.username,
            solved = stats.total_solved,
            "Fetched LeetCode stats"
        );
        Ok(stats)
    }

    /// GitHub stats enriched with LeetCode progress.
    ///
    /// The LeetCode fetch runs only after GitHub succeeded, and its failure is
    /// reported as `Enrichment::Absent` instead of failing the whole response.
    pub async fn dashboard(&self, username: &str) -> Result<DashboardStats> {
        let github = self.github_stats(username).await?;

        let leetcode = match self.leetcode_stats(username).await {
            Ok(data) => Enrichment::Present { data },
            Err(e) => {
                warn!(username = %username, error = %e, "LeetCode enrichment skipped");
                Enrichment::Absent {
                    reason: e.to_string(),
                }
            }
        };

        Ok(DashboardStats { github, leetcode })
    }
}
