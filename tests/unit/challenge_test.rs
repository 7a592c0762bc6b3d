//! Unit tests for challenge tracking.

use careerquest::engine::{
    Command, EngineError, EntityKind, ManualClock, QuestEngine, QuestState, ScriptedRandom,
};
use careerquest::progression::ChallengeBonus;
use careerquest::quests::{Challenge, ChallengeDifficulty, ProgressStatus};
use careerquest::storage::EngineConfig;
use chrono::Utc;

const DSA: &str = "dsa-sprint";

fn engine(rng: ScriptedRandom) -> QuestEngine {
    QuestEngine::new(
        "Tester",
        &EngineConfig::default(),
        Box::new(ManualClock::new(Utc::now())),
        Box::new(rng),
    )
}

/// Engine whose state also holds a three-step challenge without milestones.
fn engine_with_direct_challenge() -> QuestEngine {
    let now = Utc::now();
    let mut state = QuestState::new("Tester", now);
    state
        .challenges
        .push(Challenge::new("sprint", "Sprint", ChallengeDifficulty::Easy, "Test", 3, 50));
    QuestEngine::with_state(
        state,
        &EngineConfig::default(),
        Box::new(ManualClock::new(now)),
        Box::new(ScriptedRandom::new()),
    )
}

fn start(id: &str) -> Command {
    Command::StartChallenge {
        challenge_id: id.to_string(),
    }
}

fn milestone(id: &str, progress: i64) -> Command {
    Command::UpdateChallengeMilestone {
        challenge_id: DSA.to_string(),
        milestone_id: id.to_string(),
        progress,
    }
}

fn challenge<'a>(engine: &'a QuestEngine, id: &str) -> &'a Challenge {
    engine.state().challenges.iter().find(|c| c.id == id).unwrap()
}

#[test]
fn test_start_grants_xp_once() {
    let mut engine = engine(ScriptedRandom::new());

    let transition = engine.dispatch(start(DSA)).unwrap();
    assert_eq!(transition.total_xp(), 25);
    assert_eq!(transition.grants[0].source, "Challenge Started");
    assert_eq!(transition.notifications.last().unwrap().title, "Challenge Started! 🚀");
    assert_eq!(challenge(&engine, DSA).status, ProgressStatus::InProgress);

    assert_eq!(
        engine.dispatch(start(DSA)),
        Err(EngineError::AlreadyStarted {
            kind: EntityKind::Challenge,
            id: DSA.to_string()
        })
    );
    assert_eq!(engine.state().progression.total_xp_earned, 25);
}

#[test]
fn test_milestone_requires_started_challenge() {
    let mut engine = engine(ScriptedRandom::new());

    assert!(matches!(
        engine.dispatch(milestone("dsa-1", 5)),
        Err(EngineError::NotActive { .. })
    ));
    engine.dispatch(start(DSA)).unwrap();
    assert_eq!(
        engine.dispatch(milestone("nope", 1)),
        Err(EngineError::NotFound {
            kind: EntityKind::Milestone,
            id: "nope".to_string()
        })
    );
}

#[test]
fn test_partial_milestone_progress_grants_nothing() {
    let mut engine = engine(ScriptedRandom::new());
    engine.dispatch(start(DSA)).unwrap();

    let transition = engine.dispatch(milestone("dsa-1", 3)).unwrap();
    assert!(transition.is_noop());
    assert_eq!(challenge(&engine, DSA).progress, 0);
    assert_eq!(challenge(&engine, DSA).milestones[0].progress, 3);
}

#[test]
fn test_milestones_complete_challenge_and_roll_bonus() {
    // Start, four milestones, then the last milestone and the completion
    // grant each roll a lucky reward before the bonus roll.
    let mut chances = vec![false; 6 + 7];
    chances.push(true);
    let mut engine = engine(ScriptedRandom::new().with_chances(chances));
    engine.dispatch(start(DSA)).unwrap();

    for id in ["dsa-1", "dsa-2", "dsa-3", "dsa-4"] {
        let transition = engine.dispatch(milestone(id, 5)).unwrap();
        assert_eq!(transition.grants[0].source, "Milestone Completed");
        assert!(transition
            .notifications
            .iter()
            .any(|n| n.title == "Milestone Achieved! 🎯"));
    }
    assert_eq!(challenge(&engine, DSA).progress, 4);

    let transition = engine.dispatch(milestone("dsa-5", 9)).unwrap();
    let sources: Vec<_> = transition.grants.iter().map(|g| g.source.as_str()).collect();
    assert_eq!(sources, vec!["Milestone Completed", "Challenge Completed"]);
    assert_eq!(transition.grants[1].effective_xp, 500);
    assert_eq!(transition.challenge_bonus, Some(ChallengeBonus::DoubleXpHour));
    assert_eq!(transition.notifications.last().unwrap().title, "Bonus Reward! 🎰");

    let done = challenge(&engine, DSA);
    assert_eq!(done.status, ProgressStatus::Completed);
    assert!(done.completed_at.is_some());
    assert_eq!(engine.state().progression.total_xp_earned, 25 + 800 + 500);
    assert!(engine.state().progression.bonus_xp_active);
    assert_eq!(engine.state().progression.xp_multiplier, 2.0);
}

#[test]
fn test_completed_challenge_ignores_updates() {
    let mut engine = engine(ScriptedRandom::new());
    engine.dispatch(start(DSA)).unwrap();
    for id in ["dsa-1", "dsa-2", "dsa-3", "dsa-4", "dsa-5"] {
        engine.dispatch(milestone(id, 5)).unwrap();
    }
    let total = engine.state().progression.total_xp_earned;

    let transition = engine.dispatch(milestone("dsa-1", 0)).unwrap();
    assert!(transition.is_noop());
    assert_eq!(engine.state().progression.total_xp_earned, total);
    assert_eq!(challenge(&engine, DSA).status, ProgressStatus::Completed);
}

#[test]
fn test_milestone_driven_rejects_direct_progress() {
    let mut engine = engine(ScriptedRandom::new());
    engine.dispatch(start(DSA)).unwrap();

    assert!(matches!(
        engine.dispatch(Command::AdvanceChallenge {
            challenge_id: DSA.to_string(),
            delta: 1
        }),
        Err(EngineError::DerivedProgress { .. })
    ));
}

#[test]
fn test_direct_progress_pays_per_unit() {
    let mut engine = engine_with_direct_challenge();
    let advance = |delta| Command::AdvanceChallenge {
        challenge_id: "sprint".to_string(),
        delta,
    };

    assert!(matches!(
        engine.dispatch(advance(1)),
        Err(EngineError::NotActive { .. })
    ));
    engine.dispatch(start("sprint")).unwrap();

    let transition = engine.dispatch(advance(2)).unwrap();
    assert_eq!(transition.total_xp(), 20);
    assert_eq!(transition.notifications.last().unwrap().title, "Progress Made! 📈");

    // Overshoot is clamped: one unit counts, then the reward
    let transition = engine.dispatch(advance(5)).unwrap();
    let amounts: Vec<_> = transition.grants.iter().map(|g| g.effective_xp).collect();
    assert_eq!(amounts, vec![10, 50]);
    assert_eq!(challenge(&engine, "sprint").progress, 3);

    let transition = engine.dispatch(advance(1)).unwrap();
    assert!(transition.is_noop());
}
