//! CareerQuest - Gamified Career Progression
//!
//! Main entry point: loads the saved quest, runs the startup housekeeping
//! commands, refreshes linked platform stats once and saves.

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careerquest::engine::{Command, QuestEngine, RngSource, SystemClock};
use careerquest::integrations::IntegrationPoller;
use careerquest::storage::{config, Database, PersistenceWorker, ProgressStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CareerQuest v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load_config().context("Failed to load configuration")?;
    let db = Database::open(&config.database_path()).context("Failed to open database")?;

    let saved = ProgressStore::new(db.connection())
        .load()
        .unwrap_or_else(|e| {
            tracing::warn!("Could not restore saved progress, starting fresh: {}", e);
            None
        });

    let clock = Box::new(SystemClock);
    let rng = Box::new(RngSource::from_entropy());
    let mut engine = match saved {
        Some(state) => {
            tracing::info!("Restored progress for {}", state.player_name);
            QuestEngine::with_state(state, &config.engine, clock, rng)
        }
        None => QuestEngine::new(&config.profile.name, &config.engine, clock, rng),
    };

    let now = Utc::now();
    let missions_stale = engine
        .state()
        .daily_missions
        .iter()
        .all(|m| m.is_expired(now));

    let mut startup = vec![Command::SyncBadges, Command::SweepOverdueGoals];
    if missions_stale {
        startup.push(Command::RefreshDailyMissions);
    }
    for command in startup {
        if let Err(e) = engine.dispatch(command) {
            tracing::warn!("Startup command rejected: {}", e);
        }
    }

    let worker = PersistenceWorker::spawn(db);
    worker.submit(engine.snapshot(), Utc::now());

    if config.integrations.enabled {
        match IntegrationPoller::from_config(&config) {
            Ok(poller) => {
                let snapshot = poller.refresh().await;
                if let Some(github) = &snapshot.github {
                    tracing::info!(
                        "GitHub {}: {} repos, {} day streak ({:?})",
                        github.username,
                        github.public_repos,
                        github.contribution_streak,
                        github.source
                    );
                }
                if let Some(leetcode) = &snapshot.leetcode {
                    tracing::info!(
                        "LeetCode {}: {} solved ({:?})",
                        leetcode.username,
                        leetcode.total_solved,
                        leetcode.source
                    );
                }
            }
            Err(e) => tracing::warn!("Integrations unavailable: {}", e),
        }
    }

    let state = engine.state();
    let progression = &state.progression;
    tracing::info!(
        "{}: level {} ({}), {} XP total, {} to next level",
        state.player_name,
        progression.current_level,
        progression.tier(),
        progression.total_xp_earned,
        progression.xp_to_next_level
    );
    tracing::info!(
        "{} badges unlocked, {} unread notifications, {} missions open today",
        state.badges.iter().filter(|b| b.unlocked).count(),
        engine.notifications().unread_count(),
        state.daily_missions.iter().filter(|m| !m.completed).count()
    );

    let report = worker.shutdown();
    tracing::debug!("Saved {} snapshot(s)", report.written);

    Ok(())
}
