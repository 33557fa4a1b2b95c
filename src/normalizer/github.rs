use serde_json::Value;
use tracing::warn;

use crate::error::{DashboardError, Result};
use crate::models::{ContributionCalendar, GitHubStats, RepoSummary};
use crate::types::{GitHubRepoNode, GitHubUserNode, GitHubViewer};

use super::{response_data, take_field};

/// Normalize the body of the per-user GitHub query
pub fn normalize_github(raw: Value) -> Result<GitHubStats> {
    let data = response_data(raw)?;
    let user = take_field(data, "user")
        .ok_or_else(|| DashboardError::NotFound("User not found".to_string()))?;
    let user: GitHubUserNode = serde_json::from_value(user)?;

    let calendar = user
        .contributions_collection
        .and_then(|collection| collection.contribution_calendar);
    let contribution_calendar = match calendar {
        Some(calendar) => calendar,
        None => {
            warn!(username = %user.login, "Contribution calendar missing");
            ContributionCalendar::empty()
        }
    };

    let nodes = user.repositories.nodes;
    let total_stars: u64 = nodes.iter().map(|repo| repo.stargazer_count).sum();
    let top_repos = nodes.into_iter().map(repo_summary).collect();

    Ok(GitHubStats {
        username: user.login,
        name: user.name,
        avatar_url: user.avatar_url.unwrap_or_default(),
        bio: user.bio,
        followers: user.followers.total_count,
        following: user.following.total_count,
        public_repos: user.repositories.total_count,
        total_stars,
        top_repos,
        contribution_calendar,
    })
}

fn repo_summary(repo: GitHubRepoNode) -> RepoSummary {
    let (language, language_color) = match repo.primary_language {
        Some(lang) => (Some(lang.name), lang.color),
        None => (None, None),
    };

    RepoSummary {
        name: repo.name,
        html_url: repo.url,
        description: repo.description,
        stars: repo.stargazer_count,
        forks: repo.fork_count,
        language,
        language_color,
    }
}

/// Extract the login of the token owner from a `viewer { login }` response
pub fn normalize_viewer(raw: Value) -> Result<String> {
    let data = response_data(raw)?;
    let viewer = take_field(data, "viewer")
        .ok_or_else(|| DashboardError::NotFound("Authenticated user not found".to_string()))?;
    let viewer: GitHubViewer = serde_json::from_value(viewer)?;
    Ok(viewer.login)
}
