use serde_json::Value;

use crate::error::{DashboardError, Result};
use crate::models::{DifficultyCounts, LeetCodeStats};
use crate::types::{DifficultyCount, LeetCodeMatchedUser};

use super::{response_data, take_field};

/// Normalize the body of the LeetCode profile query
pub fn normalize_leetcode(raw: Value) -> Result<LeetCodeStats> {
    let mut data = response_data(raw)?;

    let all_questions = data
        .as_mut()
        .and_then(|d| d.as_object_mut())
        .and_then(|d| d.remove("allQuestionsCount"));

    let user = take_field(data, "matchedUser")
        .ok_or_else(|| DashboardError::NotFound("LeetCode user not found".to_string()))?;
    let user: LeetCodeMatchedUser = serde_json::from_value(user)?;

    let totals: Vec<DifficultyCount> = match all_questions {
        Some(Value::Null) | None => Vec::new(),
        Some(list) => serde_json::from_value(list)?,
    };
    let solved = user
        .submit_stats
        .map(|stats| stats.ac_submission_num)
        .unwrap_or_default();

    let solved = counts_by_difficulty(&solved);
    let totals = counts_by_difficulty(&totals);
    let ranking = user.profile.and_then(|p| p.ranking).unwrap_or(0);

    Ok(LeetCodeStats::from_counts(
        user.username,
        ranking,
        &solved,
        &totals,
    ))
}

fn counts_by_difficulty(entries: &[DifficultyCount]) -> DifficultyCounts {
    DifficultyCounts::from_labeled(entries.iter().map(|e| (e.difficulty.as_str(), e.count)))
}
