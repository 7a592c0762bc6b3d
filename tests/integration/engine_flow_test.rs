//! Integration tests driving the engine through a player's day.

use careerquest::coding::{CareerStat, ProblemDifficulty, SolvedProblem};
use careerquest::engine::{Clock, Command, EngineError, ManualClock, QuestEngine, ScriptedRandom};
use careerquest::notifications::NotificationType;
use careerquest::quests::{GoalStatus, Task, TaskPriority};
use careerquest::storage::EngineConfig;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
}

fn engine() -> (QuestEngine, ManualClock) {
    let clock = ManualClock::new(morning());
    let engine = QuestEngine::new(
        "Grace",
        &EngineConfig::default(),
        Box::new(clock.clone()),
        Box::new(ScriptedRandom::new()),
    );
    (engine, clock)
}

fn goal_milestone(milestone: &str, progress: i64) -> Command {
    Command::UpdateGoalMilestone {
        goal_id: "goal-1".to_string(),
        milestone_id: milestone.to_string(),
        progress,
    }
}

fn goal_status(engine: &QuestEngine, id: &str) -> GoalStatus {
    engine.state().goals.iter().find(|g| g.id == id).unwrap().status
}

#[test]
fn test_task_lifecycle() {
    let (mut engine, _) = engine();
    let task = Task::new("t1", "Write cover letter", TaskPriority::Elite, 40, "career", morning());

    engine.dispatch(Command::AddTask(task.clone())).unwrap();
    assert!(matches!(
        engine.dispatch(Command::AddTask(task)),
        Err(EngineError::DuplicateId { .. })
    ));

    let transition = engine
        .dispatch(Command::CompleteTask {
            task_id: "t1".to_string(),
        })
        .unwrap();
    assert_eq!(transition.total_xp(), 40);
    assert_eq!(transition.grants[0].source, "Task: Write cover letter");
    let last = transition.notifications.last().unwrap();
    assert_eq!(last.kind, NotificationType::TaskCompleted);

    // Completing twice pays nothing
    let again = engine
        .dispatch(Command::CompleteTask {
            task_id: "t1".to_string(),
        })
        .unwrap();
    assert!(again.is_noop());

    engine
        .dispatch(Command::RemoveTask {
            task_id: "t1".to_string(),
        })
        .unwrap();
    assert!(engine.state().tasks.is_empty());
    assert_eq!(engine.state().progression.total_xp_earned, 40);
}

#[test]
fn test_goal_milestones_pause_and_complete() {
    let (mut engine, _) = engine();

    assert!(matches!(
        engine.dispatch(goal_milestone("lc-1", 10)),
        Err(EngineError::NotActive { .. })
    ));

    let transition = engine
        .dispatch(Command::StartGoal {
            goal_id: "goal-1".to_string(),
        })
        .unwrap();
    assert_eq!(transition.total_xp(), 25);
    assert_eq!(goal_status(&engine, "goal-1"), GoalStatus::Active);

    let transition = engine.dispatch(goal_milestone("lc-1", 40)).unwrap();
    assert_eq!(transition.grants[0].effective_xp, 200);
    assert!(transition
        .notifications
        .iter()
        .any(|n| n.title == "Milestone Achieved! 🎯"));

    engine
        .dispatch(Command::PauseGoal {
            goal_id: "goal-1".to_string(),
        })
        .unwrap();
    assert!(matches!(
        engine.dispatch(goal_milestone("lc-2", 50)),
        Err(EngineError::NotActive { .. })
    ));
    assert!(matches!(
        engine.dispatch(Command::PauseGoal {
            goal_id: "goal-1".to_string()
        }),
        Err(EngineError::InvalidGoal { .. })
    ));
    engine
        .dispatch(Command::ResumeGoal {
            goal_id: "goal-1".to_string(),
        })
        .unwrap();

    engine.dispatch(goal_milestone("lc-2", 50)).unwrap();
    let transition = engine.dispatch(goal_milestone("lc-3", 10)).unwrap();
    let sources: Vec<_> = transition.grants.iter().map(|g| g.source.as_str()).collect();
    assert_eq!(sources, vec!["Milestone Completed", "Goal Completed"]);
    assert_eq!(transition.notifications.last().unwrap().title, "Goal Achieved! 🏆");
    assert_eq!(goal_status(&engine, "goal-1"), GoalStatus::Completed);
    assert_eq!(engine.state().progression.total_xp_earned, 25 + 200 + 400 + 400 + 1000);
}

#[test]
fn test_milestone_goal_rejects_direct_progress() {
    let (mut engine, _) = engine();
    engine
        .dispatch(Command::StartGoal {
            goal_id: "goal-2".to_string(),
        })
        .unwrap();
    assert!(matches!(
        engine.dispatch(Command::SetGoalProgress {
            goal_id: "goal-2".to_string(),
            progress: 3
        }),
        Err(EngineError::DerivedProgress { .. })
    ));
}

#[test]
fn test_overdue_sweep() {
    let (mut engine, clock) = engine();
    engine
        .dispatch(Command::StartGoal {
            goal_id: "goal-4".to_string(),
        })
        .unwrap();

    assert!(engine.dispatch(Command::SweepOverdueGoals).unwrap().is_noop());

    clock.advance(Duration::days(31));
    let transition = engine.dispatch(Command::SweepOverdueGoals).unwrap();
    assert_eq!(transition.notifications.len(), 1);
    assert_eq!(transition.notifications[0].title, "Goal Overdue ⏰");
    assert_eq!(goal_status(&engine, "goal-4"), GoalStatus::Overdue);

    // Goals never started are left alone
    assert_eq!(goal_status(&engine, "goal-3"), GoalStatus::NotStarted);
    assert!(engine.dispatch(Command::SweepOverdueGoals).unwrap().is_noop());

    // Overdue goals still accept progress
    let transition = engine
        .dispatch(Command::UpdateGoalMilestone {
            goal_id: "goal-4".to_string(),
            milestone_id: "streak-1".to_string(),
            progress: 7,
        })
        .unwrap();
    assert_eq!(transition.grants[0].source, "Milestone Completed");
}

#[test]
fn test_daily_missions_expire_and_refresh() {
    let (mut engine, clock) = engine();
    let missions = engine.state().daily_missions.clone();
    assert_eq!(missions.len(), 3);
    assert!(missions.iter().all(|m| m.multiplier == 1.0));

    let first = &missions[0];
    let transition = engine
        .dispatch(Command::CompleteMission {
            mission_id: first.id.clone(),
        })
        .unwrap();
    assert_eq!(transition.total_xp(), first.reward());
    assert_eq!(transition.grants[0].source, format!("Mission: {}", first.title));
    assert_eq!(transition.notifications.last().unwrap().title, "Mission Complete! 🎯");

    // Already completed is a quiet no-op
    assert!(engine
        .dispatch(Command::CompleteMission {
            mission_id: first.id.clone(),
        })
        .unwrap()
        .is_noop());

    clock.advance(Duration::days(1));
    assert_eq!(
        engine.dispatch(Command::CompleteMission {
            mission_id: missions[1].id.clone(),
        }),
        Err(EngineError::MissionExpired(missions[1].id.clone()))
    );

    engine.dispatch(Command::RefreshDailyMissions).unwrap();
    let fresh = &engine.state().daily_missions;
    assert_eq!(fresh.len(), 3);
    assert!(fresh.iter().all(|m| !m.completed && !m.is_expired(clock.now())));
}

#[test]
fn test_side_quest_once() {
    let (mut engine, _) = engine();
    let quest = engine.state().side_quests[0].clone();

    let transition = engine
        .dispatch(Command::CompleteSideQuest {
            quest_id: quest.id.clone(),
        })
        .unwrap();
    assert_eq!(transition.total_xp(), quest.xp_reward);
    assert_eq!(transition.notifications.last().unwrap().title, "Side Quest Complete! 🗺️");

    assert!(engine
        .dispatch(Command::CompleteSideQuest { quest_id: quest.id })
        .unwrap()
        .is_noop());
}

#[test]
fn test_solving_problems_updates_stats() {
    let (mut engine, clock) = engine();
    let problem = |id: &str, difficulty| SolvedProblem {
        id: id.to_string(),
        title: format!("Problem {}", id),
        difficulty,
        platform: "LeetCode".to_string(),
        topic: "Graphs".to_string(),
        xp: 30,
    };
    let knowledge_before = engine.state().career.get(CareerStat::Knowledge);

    let transition = engine
        .dispatch(Command::SolveProblem(problem("p1", ProblemDifficulty::Hard)))
        .unwrap();
    assert_eq!(transition.total_xp(), 30);
    assert_eq!(transition.notifications.last().unwrap().kind, NotificationType::ProblemSolved);

    assert_eq!(
        engine.dispatch(Command::SolveProblem(problem("p1", ProblemDifficulty::Hard))),
        Err(EngineError::ProblemAlreadySolved("p1".to_string()))
    );

    clock.advance(Duration::days(1));
    engine
        .dispatch(Command::SolveProblem(problem("p2", ProblemDifficulty::Easy)))
        .unwrap();

    let coding = &engine.state().coding;
    assert_eq!(coding.total_solved, 2);
    assert_eq!(coding.hard_count, 1);
    assert_eq!(coding.current_streak, 2);
    assert_eq!(coding.todays_solved, 1);
    assert_eq!(coding.platform_counts.get("leetcode"), Some(&2));
    assert!(engine.state().career.get(CareerStat::Knowledge) > knowledge_before);
}
