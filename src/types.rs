use serde::Deserialize;
use serde_json::Value;

use crate::models::ContributionCalendar;

// GraphQL response envelope shared by both upstreams. `data` stays untyped so
// the error list can be inspected before any shape validation happens.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TotalCount {
    #[serde(rename = "totalCount", default)]
    pub total_count: u64,
}

// GitHub API response structures
#[derive(Debug, Deserialize)]
pub struct GitHubViewer {
    pub login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubUserNode {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: TotalCount,
    #[serde(default)]
    pub following: TotalCount,
    #[serde(default)]
    pub repositories: GitHubRepositoryConnection,
    #[serde(default)]
    pub contributions_collection: Option<GitHubContributionsCollection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubRepositoryConnection {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Vec<GitHubRepoNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubRepoNode {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazer_count: u64,
    #[serde(default)]
    pub fork_count: u64,
    #[serde(default)]
    pub primary_language: Option<GitHubLanguage>,
}

#[derive(Debug, Deserialize)]
pub struct GitHubLanguage {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubContributionsCollection {
    #[serde(default)]
    pub contribution_calendar: Option<ContributionCalendar>,
}

// LeetCode API response structures
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeMatchedUser {
    pub username: String,
    #[serde(default)]
    pub profile: Option<LeetCodeProfile>,
    #[serde(default)]
    pub submit_stats: Option<LeetCodeSubmitStats>,
}

#[derive(Debug, Deserialize)]
pub struct LeetCodeProfile {
    #[serde(default)]
    pub ranking: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeSubmitStats {
    #[serde(default)]
    pub ac_submission_num: Vec<DifficultyCount>,
}

/// One `{difficulty, count}` entry from either LeetCode list
#[derive(Debug, Deserialize)]
pub struct DifficultyCount {
    pub difficulty: String,
    #[serde(default)]
    pub count: u64,
}
