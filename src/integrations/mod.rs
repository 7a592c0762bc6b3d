//! Read-only stats from third-party coding platforms.
//!
//! Provides:
//! - GitHub REST client (profile, repositories, public push events)
//! - LeetCode GraphQL client (solved counts, ranking, badges)
//! - A poller that refreshes both on an interval and falls back to the last
//!   good snapshot, or a mock one, whenever a fetch fails
//!
//! Integration data is display-only; it never feeds the XP engine.

pub mod github;
pub mod leetcode;
pub mod poller;

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use github::GitHubClient;
pub use leetcode::LeetCodeClient;
pub use poller::{IntegrationPoller, IntegrationSnapshot};

/// Where a snapshot's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fetched on the latest refresh
    Live,
    /// Kept from an earlier refresh after a failed fetch
    Cached,
    /// Placeholder data; no fetch has succeeded yet
    Mock,
}

/// A repository as shown in the top-repositories list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: String,
    pub language: String,
    pub stars: u32,
    pub forks: u32,
    pub url: String,
    pub last_updated: Option<DateTime<Utc>>,
}

/// One day of the contribution graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
    /// Intensity bucket 0-4
    pub level: u8,
}

/// GitHub profile statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubStats {
    pub username: String,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub total_stars: u32,
    pub total_forks: u32,
    /// Commits in recent public push events
    pub total_commits: u32,
    /// Consecutive days with a push, counting back from today
    pub contribution_streak: u32,
    /// Repository count per primary language
    pub language_stats: BTreeMap<String, u32>,
    pub top_repositories: Vec<Repository>,
    pub contribution_graph: Vec<ContributionDay>,
    pub last_updated: DateTime<Utc>,
    pub source: DataSource,
}

/// LeetCode profile statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeetCodeStats {
    pub username: String,
    pub total_solved: u32,
    pub ranking: u32,
    /// Percentage, rounded to two decimals
    pub acceptance_rate: f64,
    pub easy_count: u32,
    pub medium_count: u32,
    pub hard_count: u32,
    pub contest_rating: u32,
    pub badges: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub source: DataSource,
}

/// Integration errors. The poller swallows these after logging.
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("HTTP client error: {0}")]
    ClientError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("API returned status {0}")]
    BadStatus(u16),

    #[error("Failed to decode response: {0}")]
    DecodeError(String),
}

impl From<reqwest::Error> for IntegrationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            IntegrationError::DecodeError(e.to_string())
        } else {
            IntegrationError::RequestFailed(e.to_string())
        }
    }
}

/// Build the shared HTTP client.
pub(crate) fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, IntegrationError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("careerquest/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| IntegrationError::ClientError(e.to_string()))
}
