//! Periodic refresh of integration snapshots.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::{github, leetcode, DataSource, GitHubClient, GitHubStats, IntegrationError, LeetCodeClient, LeetCodeStats};
use crate::storage::config::AppConfig;

/// A platform the poller can refresh.
pub trait StatsProvider: Send + Sync {
    type Stats: Snapshot;

    /// Platform name for logs
    fn platform(&self) -> &'static str;

    /// Fetch fresh stats
    fn fetch(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Self::Stats, IntegrationError>> + Send;

    /// Placeholder stats for when nothing was ever fetched
    fn mock(&self, username: &str, now: DateTime<Utc>) -> Self::Stats;
}

/// Stats that record where they came from.
pub trait Snapshot: Clone + Send + Sync + 'static {
    fn source(&self) -> DataSource;
    fn set_source(&mut self, source: DataSource);
}

impl Snapshot for GitHubStats {
    fn source(&self) -> DataSource {
        self.source
    }

    fn set_source(&mut self, source: DataSource) {
        self.source = source;
    }
}

impl Snapshot for LeetCodeStats {
    fn source(&self) -> DataSource {
        self.source
    }

    fn set_source(&mut self, source: DataSource) {
        self.source = source;
    }
}

impl StatsProvider for GitHubClient {
    type Stats = GitHubStats;

    fn platform(&self) -> &'static str {
        "GitHub"
    }

    fn fetch(&self, username: &str) -> impl Future<Output = Result<GitHubStats, IntegrationError>> + Send {
        self.fetch_stats(username)
    }

    fn mock(&self, username: &str, now: DateTime<Utc>) -> GitHubStats {
        github::mock_stats(username, now)
    }
}

impl StatsProvider for LeetCodeClient {
    type Stats = LeetCodeStats;

    fn platform(&self) -> &'static str {
        "LeetCode"
    }

    fn fetch(&self, username: &str) -> impl Future<Output = Result<LeetCodeStats, IntegrationError>> + Send {
        self.fetch_stats(username)
    }

    fn mock(&self, username: &str, now: DateTime<Utc>) -> LeetCodeStats {
        leetcode::mock_stats(username, now)
    }
}

/// Latest stats for every configured platform.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntegrationSnapshot {
    pub github: Option<GitHubStats>,
    pub leetcode: Option<LeetCodeStats>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// A provider paired with the account it polls.
struct Linked<P> {
    provider: P,
    username: String,
}

/// Refreshes every linked platform and keeps the results.
pub struct IntegrationPoller<G = GitHubClient, L = LeetCodeClient> {
    github: Option<Linked<G>>,
    leetcode: Option<Linked<L>>,
    cache: Arc<RwLock<IntegrationSnapshot>>,
}

impl IntegrationPoller<GitHubClient, LeetCodeClient> {
    /// Build clients for the accounts linked in the profile.
    pub fn from_config(config: &AppConfig) -> Result<Self, IntegrationError> {
        let timeout = Duration::from_secs(config.integrations.request_timeout_secs);
        let github = match &config.profile.github_username {
            Some(username) => Some((GitHubClient::new(timeout)?, username.clone())),
            None => None,
        };
        let leetcode = match &config.profile.leetcode_username {
            Some(username) => Some((LeetCodeClient::new(timeout)?, username.clone())),
            None => None,
        };
        Ok(Self::new(github, leetcode))
    }
}

impl<G, L> IntegrationPoller<G, L>
where
    G: StatsProvider<Stats = GitHubStats> + 'static,
    L: StatsProvider<Stats = LeetCodeStats> + 'static,
{
    pub fn new(github: Option<(G, String)>, leetcode: Option<(L, String)>) -> Self {
        Self {
            github: github.map(|(provider, username)| Linked { provider, username }),
            leetcode: leetcode.map(|(provider, username)| Linked { provider, username }),
            cache: Arc::new(RwLock::new(IntegrationSnapshot::default())),
        }
    }

    /// Copy of the cached snapshot.
    pub async fn snapshot(&self) -> IntegrationSnapshot {
        self.cache.read().await.clone()
    }

    /// Shared handle on the cache, for readers outside the poller.
    pub fn cache(&self) -> Arc<RwLock<IntegrationSnapshot>> {
        Arc::clone(&self.cache)
    }

    /// Fetch every platform and replace the cached snapshot wholesale.
    ///
    /// Never fails: a platform that cannot be fetched keeps its previous
    /// stats (marked cached) or gets mock stats.
    pub async fn refresh(&self) -> IntegrationSnapshot {
        let previous = self.snapshot().await;
        let now = Utc::now();

        let (github, leetcode) = futures::join!(
            refresh_one(self.github.as_ref(), previous.github, now),
            refresh_one(self.leetcode.as_ref(), previous.leetcode, now),
        );

        let snapshot = IntegrationSnapshot {
            github,
            leetcode,
            refreshed_at: Some(now),
        };
        *self.cache.write().await = snapshot.clone();
        snapshot
    }

    /// Refresh now and then every `period` until the task is aborted.
    pub fn spawn(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        let period = period.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                self.refresh().await;
            }
        })
    }
}

async fn refresh_one<P: StatsProvider>(
    linked: Option<&Linked<P>>,
    previous: Option<P::Stats>,
    now: DateTime<Utc>,
) -> Option<P::Stats> {
    let linked = linked?;
    let fetched = linked.provider.fetch(&linked.username).await;
    Some(resolve(linked, fetched, previous, now))
}

fn resolve<P: StatsProvider>(
    linked: &Linked<P>,
    fetched: Result<P::Stats, IntegrationError>,
    previous: Option<P::Stats>,
    now: DateTime<Utc>,
) -> P::Stats {
    match fetched {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!(
                "{} refresh for {} failed, using fallback: {}",
                linked.provider.platform(),
                linked.username,
                e
            );
            match previous {
                Some(mut stats) => {
                    if stats.source() == DataSource::Live {
                        stats.set_source(DataSource::Cached);
                    }
                    stats
                }
                None => linked.provider.mock(&linked.username, now),
            }
        }
    }
}
