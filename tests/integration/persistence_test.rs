//! Integration tests for saving and restoring progress.

use careerquest::engine::{Command, ManualClock, QuestEngine, QuestState, ScriptedRandom};
use careerquest::quests::{Task, TaskPriority};
use careerquest::storage::{Database, EngineConfig, PersistenceWorker, ProgressStore};
use careerquest::ProgressionState;
use chrono::Utc;
use tempfile::TempDir;

fn engine_from(state: Option<QuestState>) -> QuestEngine {
    let config = EngineConfig::default();
    let clock = Box::new(ManualClock::new(Utc::now()));
    let rng = Box::new(ScriptedRandom::new());
    match state {
        Some(state) => QuestEngine::with_state(state, &config, clock, rng),
        None => QuestEngine::new("Grace", &config, clock, rng),
    }
}

fn grant(amount: i64) -> Command {
    Command::GrantXp {
        amount,
        source: "Manual".to_string(),
        multiplier: 1.0,
    }
}

#[test]
fn test_progress_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quest.db");

    let mut engine = engine_from(None);
    engine.dispatch(grant(600)).unwrap();
    engine
        .dispatch(Command::AddTask(Task::new(
            "t1",
            "Update resume",
            TaskPriority::Core,
            20,
            "career",
            Utc::now(),
        )))
        .unwrap();

    let worker = PersistenceWorker::spawn(Database::open(&path).unwrap());
    worker.submit(engine.snapshot(), Utc::now());
    let report = worker.shutdown();
    assert_eq!(report.written, 1);
    assert_eq!(report.failed, 0);

    let db = Database::open(&path).unwrap();
    assert_eq!(db.schema_version().unwrap(), 2);
    let store = ProgressStore::new(db.connection());
    let restored = store.load().unwrap().unwrap();
    assert_eq!(&restored, engine.state());

    let profile = store.profile().unwrap().unwrap();
    assert_eq!(profile.name, "Grace");
    assert_eq!(profile.total_xp, 600);
    assert_eq!(profile.level, 5);
    assert_eq!(store.task_count().unwrap(), 1);

    let badges = store.unlocked_badge_ids().unwrap();
    assert!(badges.contains(&"xp-500".to_string()));
    assert!(badges.contains(&"streak-60".to_string()));

    let mut resumed = engine_from(Some(restored));
    assert!(resumed.dispatch(Command::SyncBadges).unwrap().is_noop());
    resumed.dispatch(grant(10)).unwrap();
    assert_eq!(resumed.state().progression.total_xp_earned, 610);
}

#[test]
fn test_sync_badges_after_rehydrate() {
    let mut state = QuestState::new("Grace", Utc::now());
    state.progression = ProgressionState::from_total_xp(1_000);

    let mut engine = engine_from(Some(state));
    let transition = engine.dispatch(Command::SyncBadges).unwrap();

    assert!(transition.grants.is_empty());
    assert!(transition.celebrate_badge);

    let unlocked: Vec<_> = engine
        .state()
        .badges
        .iter()
        .filter(|b| b.unlocked)
        .map(|b| b.id.as_str())
        .collect();
    assert_eq!(
        unlocked,
        vec!["xp-500", "xp-1000", "coding-10", "streak-7", "streak-14", "streak-30", "streak-60", "streak-100"]
    );
    assert_eq!(transition.notifications.len(), unlocked.len());

    assert!(engine.dispatch(Command::SyncBadges).unwrap().is_noop());
}

#[test]
fn test_inconsistent_level_is_recomputed_on_load() {
    let db = Database::open_in_memory().unwrap();
    let store = ProgressStore::new(db.connection());

    let mut state = QuestState::new("Grace", Utc::now());
    state.progression.current_xp = 250;
    state.progression.total_xp_earned = 250;
    state.progression.current_level = 9;
    state.career.knowledge = 500;
    store.save(&state, Utc::now()).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.progression.current_level, 3);
    assert!(loaded.progression.is_consistent());
    assert_eq!(loaded.career.knowledge, 100);
}

#[test]
fn test_removed_tasks_are_dropped_from_mirror() {
    let db = Database::open_in_memory().unwrap();
    let store = ProgressStore::new(db.connection());

    let mut engine = engine_from(None);
    for id in ["a", "b"] {
        engine
            .dispatch(Command::AddTask(Task::new(id, id, TaskPriority::Bonus, 5, "misc", Utc::now())))
            .unwrap();
    }
    store.save(engine.state(), Utc::now()).unwrap();
    assert_eq!(store.task_count().unwrap(), 2);

    engine
        .dispatch(Command::RemoveTask {
            task_id: "a".to_string(),
        })
        .unwrap();
    store.save(engine.state(), Utc::now()).unwrap();
    assert_eq!(store.task_count().unwrap(), 1);
}

#[test]
fn test_empty_database_loads_nothing() {
    let db = Database::open_in_memory().unwrap();
    let store = ProgressStore::new(db.connection());
    assert!(store.load().unwrap().is_none());
    assert!(store.profile().unwrap().is_none());
}
