//! LeetCode GraphQL client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::{http_client, DataSource, IntegrationError, LeetCodeStats};

const DEFAULT_API_URL: &str = "https://leetcode.com/graphql";

const PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!) {
  matchedUser(username: $username) {
    username
    profile { ranking }
    submitStats {
      acSubmissionNum { difficulty count submissions }
      totalSubmissionNum { difficulty count submissions }
    }
    badges { id displayName }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    username: String,
    profile: Option<Profile>,
    submit_stats: SubmitStats,
    #[serde(default)]
    badges: Vec<LeetCodeBadge>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    ranking: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    ac_submission_num: Vec<SubmissionCount>,
    total_submission_num: Vec<SubmissionCount>,
}

#[derive(Debug, Deserialize)]
struct SubmissionCount {
    difficulty: String,
    count: u32,
    submissions: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeetCodeBadge {
    display_name: String,
}

/// LeetCode API client.
#[derive(Debug, Clone)]
pub struct LeetCodeClient {
    http: reqwest::Client,
    endpoint: String,
}

impl LeetCodeClient {
    pub fn new(timeout: Duration) -> Result<Self, IntegrationError> {
        Self::with_endpoint(timeout, DEFAULT_API_URL.to_string())
    }

    pub fn with_endpoint(timeout: Duration, endpoint: String) -> Result<Self, IntegrationError> {
        Ok(Self {
            http: http_client(timeout)?,
            endpoint,
        })
    }

    /// Fetch solved counts and ranking for a user.
    pub async fn fetch_stats(&self, username: &str) -> Result<LeetCodeStats, IntegrationError> {
        let body = json!({
            "query": PROFILE_QUERY,
            "variables": { "username": username },
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("Referer", "https://leetcode.com")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IntegrationError::BadStatus(status.as_u16()));
        }

        let text = response.text().await?;
        parse_profile(&text, username, Utc::now())
    }
}

/// Turn a GraphQL response body into stats.
pub fn parse_profile(body: &str, username: &str, now: DateTime<Utc>) -> Result<LeetCodeStats, IntegrationError> {
    let response: GraphQlResponse =
        serde_json::from_str(body).map_err(|e| IntegrationError::DecodeError(e.to_string()))?;

    let user = response
        .data
        .and_then(|d| d.matched_user)
        .ok_or_else(|| IntegrationError::UserNotFound(username.to_string()))?;

    let solved = |difficulty: &str| {
        user.submit_stats
            .ac_submission_num
            .iter()
            .find(|s| s.difficulty == difficulty)
            .map(|s| s.count)
            .unwrap_or(0)
    };
    let easy_count = solved("Easy");
    let medium_count = solved("Medium");
    let hard_count = solved("Hard");
    let total_solved = easy_count + medium_count + hard_count;

    // Skip the "All" aggregate row
    let total_submissions: u32 = user
        .submit_stats
        .total_submission_num
        .iter()
        .filter(|s| s.difficulty != "All")
        .map(|s| s.submissions)
        .sum();

    Ok(LeetCodeStats {
        username: user.username,
        total_solved,
        ranking: user.profile.and_then(|p| p.ranking).unwrap_or(0),
        acceptance_rate: acceptance_rate(total_solved, total_submissions),
        easy_count,
        medium_count,
        hard_count,
        contest_rating: 0,
        badges: user.badges.into_iter().map(|b| b.display_name).collect(),
        last_updated: now,
        source: DataSource::Live,
    })
}

/// Solved over submitted, as a percentage rounded to two decimals.
pub fn acceptance_rate(solved: u32, submissions: u32) -> f64 {
    if submissions == 0 {
        return 0.0;
    }
    let rate = solved as f64 / submissions as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Placeholder shown until the first successful fetch.
pub fn mock_stats(username: &str, now: DateTime<Utc>) -> LeetCodeStats {
    LeetCodeStats {
        username: username.to_string(),
        total_solved: 0,
        ranking: 0,
        acceptance_rate: 0.0,
        easy_count: 0,
        medium_count: 0,
        hard_count: 0,
        contest_rating: 0,
        badges: Vec::new(),
        last_updated: now,
        source: DataSource::Mock,
    }
}
