//! CareerQuest - Gamified Career Progression
//!
//! A single-player progression engine for career growth: XP and levels,
//! badges, tasks, challenges, goals, daily missions, a skill tree and
//! coding-problem tracking. State lives in memory behind one writer
//! ([`QuestEngine`]) and is mirrored to SQLite on a best-effort basis.

pub mod badges;
pub mod coding;
pub mod engine;
pub mod integrations;
pub mod notifications;
pub mod progression;
pub mod quests;
pub mod skills;
pub mod storage;

// Re-export commonly used types
pub use engine::{Command, EngineError, QuestEngine, QuestState, Transition};
pub use notifications::NotificationCenter;
pub use progression::ProgressionState;
pub use storage::config::AppConfig;
