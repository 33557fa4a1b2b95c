use crate::error::{DashboardError, Result};
use std::path::{Path, PathBuf};
use tracing::error;

/// Built-in query for the token owner's login
pub const VIEWER_QUERY: &str = "query { viewer { login } }";

pub const DEFAULT_GITHUB_QUERY_PATH: &str = "queries/github_user.graphql";
pub const DEFAULT_LEETCODE_QUERY_PATH: &str = "queries/leetcode_user.graphql";

/// Locations of the GraphQL documents sent upstream.
///
/// Files are read on every request so they can be edited without a restart.
#[derive(Debug, Clone)]
pub struct QueryDocuments {
    pub github_user: PathBuf,
    pub leetcode_user: PathBuf,
}

impl Default for QueryDocuments {
    fn default() -> Self {
        Self {
            github_user: PathBuf::from(DEFAULT_GITHUB_QUERY_PATH),
            leetcode_user: PathBuf::from(DEFAULT_LEETCODE_QUERY_PATH),
        }
    }
}

impl QueryDocuments {
    pub async fn github_user(&self) -> Result<String> {
        load(&self.github_user, "Failed to read query file").await
    }

    pub async fn leetcode_user(&self) -> Result<String> {
        load(&self.leetcode_user, "Failed to read LeetCode query file").await
    }
}

async fn load(path: &Path, message: &str) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        error!(path = %path.display(), "{}: {}", message, e);
        DashboardError::ConfigError(message.to_string())
    })
}
