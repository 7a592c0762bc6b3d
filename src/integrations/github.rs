//! GitHub REST client.
//!
//! Three unauthenticated calls per refresh: the user profile, the ten
//! most-starred repositories and the last hundred public events.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::{http_client, ContributionDay, DataSource, GitHubStats, IntegrationError, Repository};

const DEFAULT_API_URL: &str = "https://api.github.com";

/// Days covered by the contribution graph (a year plus today).
pub const CONTRIBUTION_DAYS: i64 = 366;

/// Repositories kept in the top list.
const TOP_REPOSITORIES: usize = 5;

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
    #[serde(default)]
    public_repos: u32,
    #[serde(default)]
    followers: u32,
    #[serde(default)]
    following: u32,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u32,
    #[serde(default)]
    forks_count: u32,
    html_url: String,
    updated_at: Option<DateTime<Utc>>,
}

/// A public event; only push events matter here.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Vec<serde_json::Value>,
}

impl PushEvent {
    fn is_push(&self) -> bool {
        self.kind == "PushEvent"
    }

    fn commit_count(&self) -> u32 {
        self.payload.commits.len() as u32
    }
}

/// GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(timeout: Duration) -> Result<Self, IntegrationError> {
        Self::with_base_url(timeout, DEFAULT_API_URL.to_string())
    }

    /// Client against a custom API root.
    pub fn with_base_url(timeout: Duration, base_url: String) -> Result<Self, IntegrationError> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url,
        })
    }

    /// Fetch and summarize a user's public activity.
    pub async fn fetch_stats(&self, username: &str) -> Result<GitHubStats, IntegrationError> {
        let user_url = format!("{}/users/{}", self.base_url, username);
        let repos_url = format!("{}/users/{}/repos?sort=stars&per_page=10", self.base_url, username);
        let events_url = format!("{}/users/{}/events/public?per_page=100", self.base_url, username);

        let (user, repos, events) = futures::try_join!(
            self.get_json::<UserResponse>(&user_url, username),
            self.get_json::<Vec<RepoResponse>>(&repos_url, username),
            self.get_json::<Vec<PushEvent>>(&events_url, username),
        )?;

        tracing::debug!("Fetched GitHub stats for {}", user.login);
        Ok(summarize(user, repos, events, Utc::now()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        username: &str,
    ) -> Result<T, IntegrationError> {
        let response = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(IntegrationError::UserNotFound(username.to_string()));
        }
        if !status.is_success() {
            return Err(IntegrationError::BadStatus(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

fn summarize(
    user: UserResponse,
    repos: Vec<RepoResponse>,
    events: Vec<PushEvent>,
    now: DateTime<Utc>,
) -> GitHubStats {
    let pushes: Vec<PushEvent> = events.into_iter().filter(PushEvent::is_push).collect();
    let today = now.date_naive();

    let language_stats = language_histogram(repos.iter().map(|r| r.language.as_deref()));
    let total_stars = repos.iter().map(|r| r.stargazers_count).sum();
    let total_forks = repos.iter().map(|r| r.forks_count).sum();

    let top_repositories = repos
        .into_iter()
        .take(TOP_REPOSITORIES)
        .map(|repo| Repository {
            name: repo.name,
            description: repo
                .description
                .unwrap_or_else(|| "No description".to_string()),
            language: repo.language.unwrap_or_else(|| "Unknown".to_string()),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            url: repo.html_url,
            last_updated: repo.updated_at,
        })
        .collect();

    GitHubStats {
        username: user.login,
        public_repos: user.public_repos,
        followers: user.followers,
        following: user.following,
        total_stars,
        total_forks,
        total_commits: pushes.iter().map(PushEvent::commit_count).sum(),
        contribution_streak: contribution_streak(&pushes, today),
        language_stats,
        top_repositories,
        contribution_graph: contribution_graph(&pushes, today),
        last_updated: now,
        source: DataSource::Live,
    }
}

/// Repository count per language; repositories without one are skipped.
pub fn language_histogram<'a>(languages: impl IntoIterator<Item = Option<&'a str>>) -> BTreeMap<String, u32> {
    let mut histogram = BTreeMap::new();
    for language in languages.into_iter().flatten() {
        *histogram.entry(language.to_string()).or_insert(0) += 1;
    }
    histogram
}

/// Consecutive days with a push, counting back from `today`.
///
/// A quiet `today` does not break the streak; the count starts from
/// yesterday in that case.
pub fn contribution_streak(pushes: &[PushEvent], today: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..365 {
        let Some(day) = today.checked_sub_days(chrono::Days::new(offset)) else {
            break;
        };
        let active = pushes.iter().any(|e| e.created_at.date_naive() == day);
        if active {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }
    streak
}

/// Commits per day for the last year, oldest first.
///
/// Levels bucket the count by threes, capped at 4.
pub fn contribution_graph(pushes: &[PushEvent], today: NaiveDate) -> Vec<ContributionDay> {
    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for event in pushes {
        *per_day.entry(event.created_at.date_naive()).or_insert(0) += event.commit_count();
    }

    (0..CONTRIBUTION_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(chrono::Days::new(offset as u64)))
        .map(|date| {
            let count = per_day.get(&date).copied().unwrap_or(0);
            ContributionDay {
                date,
                count,
                level: (count / 3).min(4) as u8,
            }
        })
        .collect()
}

/// Placeholder shown until the first successful fetch.
pub fn mock_stats(username: &str, now: DateTime<Utc>) -> GitHubStats {
    let today = now.date_naive();
    GitHubStats {
        username: username.to_string(),
        public_repos: 0,
        followers: 0,
        following: 0,
        total_stars: 0,
        total_forks: 0,
        total_commits: 0,
        contribution_streak: 0,
        language_stats: BTreeMap::new(),
        top_repositories: Vec::new(),
        contribution_graph: contribution_graph(&[], today),
        last_updated: now,
        source: DataSource::Mock,
    }
}
