use serde::{Deserialize, Serialize};

/// Normalized GitHub profile, as served by `/api/stats/:username`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubStats {
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    /// Sum over `top_repos` only, not every repository the user owns
    pub total_stars: u64,
    pub top_repos: Vec<RepoSummary>,
    pub contribution_calendar: ContributionCalendar,
}

/// Repository card data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(rename = "stargazerCount")]
    pub stars: u64,
    #[serde(rename = "forksCount")]
    pub forks: u64,
    pub language: Option<String>,
    #[serde(rename = "languageColor")]
    pub language_color: Option<String>,
}

/// Per-day contribution counts grouped into weeks.
///
/// The same shape is read from GitHub and written to clients, so field names
/// keep GitHub's casing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionCalendar {
    #[serde(
        rename = "totalContributions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_contributions: Option<u64>,
    #[serde(default)]
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionWeek {
    #[serde(rename = "contributionDays", default)]
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: String,
    #[serde(rename = "contributionCount", default)]
    pub contribution_count: u64,
}

impl ContributionDay {
    pub fn level(&self) -> u8 {
        contribution_level(self.contribution_count)
    }
}

impl ContributionCalendar {
    /// Fallback used when GitHub omits the calendar
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|w| w.contribution_days.iter())
    }
}

/// Heatmap intensity bucket for a daily contribution count
pub fn contribution_level(count: u64) -> u8 {
    match count {
        0 => 0,
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        _ => 4,
    }
}

/// Fraction of a difficulty bucket solved; an empty bucket reads as 0
pub fn progress_fraction(solved: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        solved as f64 / total as f64
    }
}

/// LeetCode difficulty buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    All,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::All,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "All" => Some(Difficulty::All),
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Count per difficulty; buckets never seen stay at zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyCounts([u64; 4]);

impl DifficultyCounts {
    /// Builds the table from `(label, count)` pairs in any order.
    /// Unknown labels are ignored; a repeated label keeps its first count.
    pub fn from_labeled<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut counts = [0u64; 4];
        let mut seen = [false; 4];
        for (label, count) in entries {
            if let Some(difficulty) = Difficulty::from_label(label) {
                let idx = difficulty.index();
                if !seen[idx] {
                    counts[idx] = count;
                    seen[idx] = true;
                }
            }
        }
        Self(counts)
    }

    pub fn get(&self, difficulty: Difficulty) -> u64 {
        self.0[difficulty.index()]
    }
}

/// Normalized LeetCode progress, as served by `/api/leetcode/:username`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeStats {
    pub username: String,
    pub ranking: u64,
    pub total_solved: u64,
    pub total_questions: u64,
    pub easy_solved: u64,
    pub easy_total: u64,
    pub medium_solved: u64,
    pub medium_total: u64,
    pub hard_solved: u64,
    pub hard_total: u64,
}

impl LeetCodeStats {
    pub fn from_counts(
        username: String,
        ranking: u64,
        solved: &DifficultyCounts,
        totals: &DifficultyCounts,
    ) -> Self {
        Self {
            username,
            ranking,
            total_solved: solved.get(Difficulty::All),
            total_questions: totals.get(Difficulty::All),
            easy_solved: solved.get(Difficulty::Easy),
            easy_total: totals.get(Difficulty::Easy),
            medium_solved: solved.get(Difficulty::Medium),
            medium_total: totals.get(Difficulty::Medium),
            hard_solved: solved.get(Difficulty::Hard),
            hard_total: totals.get(Difficulty::Hard),
        }
    }

    /// `(solved, total)` for one bucket
    pub fn bucket(&self, difficulty: Difficulty) -> (u64, u64) {
        match difficulty {
            Difficulty::All => (self.total_solved, self.total_questions),
            Difficulty::Easy => (self.easy_solved, self.easy_total),
            Difficulty::Medium => (self.medium_solved, self.medium_total),
            Difficulty::Hard => (self.hard_solved, self.hard_total),
        }
    }

    pub fn progress(&self, difficulty: Difficulty) -> f64 {
        let (solved, total) = self.bucket(difficulty);
        progress_fraction(solved, total)
    }
}

/// Outcome of a secondary fetch that must not fail the primary response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Enrichment<T> {
    Present { data: T },
    Absent { reason: String },
}

impl<T> Enrichment<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Enrichment::Present { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Enrichment::Present { data } => Some(data),
            Enrichment::Absent { .. } => None,
        }
    }
}

/// Combined response of `/api/dashboard/:username`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub github: GitHubStats,
    pub leetcode: Enrichment<LeetCodeStats>,
}
