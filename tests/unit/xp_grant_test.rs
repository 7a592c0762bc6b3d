//! Unit tests for XP grants and their side effects.

use careerquest::engine::{Command, EngineError, ManualClock, QuestEngine, ScriptedRandom};
use careerquest::notifications::NotificationType;
use careerquest::progression::rewards::DARK_WARRIOR_THEME;
use careerquest::progression::LuckyReward;
use careerquest::storage::EngineConfig;
use chrono::Utc;

/// Picks and chances consumed while drawing the first daily missions.
const STARTUP_PICKS: usize = 9;
const STARTUP_CHANCES: usize = 6;

fn engine(rng: ScriptedRandom) -> QuestEngine {
    QuestEngine::new(
        "Tester",
        &EngineConfig::default(),
        Box::new(ManualClock::new(Utc::now())),
        Box::new(rng),
    )
}

fn grant(amount: i64, multiplier: f64) -> Command {
    Command::GrantXp {
        amount,
        source: "Manual".to_string(),
        multiplier,
    }
}

#[test]
fn test_grant_levels_up_and_unlocks_badge() {
    let mut engine = engine(ScriptedRandom::new());
    let transition = engine.dispatch(grant(100, 1.0)).unwrap();

    let progression = &engine.state().progression;
    assert_eq!(progression.current_level, 2);
    assert_eq!(progression.total_xp_earned, 100);
    assert_eq!(progression.xp_to_next_level, 20);

    let titles: Vec<_> = transition.notifications.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["+100 XP Earned! ⚡", "Level Up! 🎉", "Badge Unlocked! 🏆"]);
    assert_eq!(transition.notifications[1].kind, NotificationType::LevelUp);

    let badges: Vec<_> = transition.badges_unlocked().map(|b| b.id.as_str()).collect();
    assert_eq!(badges, vec!["streak-7"]);
    assert!(transition.celebrate_level_up);
    assert!(transition.celebrate_badge);
    assert!(transition.confetti);

    // Center is newest first
    assert_eq!(engine.notifications().latest().unwrap().title, "Badge Unlocked! 🏆");
}

#[test]
fn test_multiplier_is_floored() {
    let mut engine = engine(ScriptedRandom::new());
    let transition = engine.dispatch(grant(15, 1.5)).unwrap();

    assert_eq!(transition.total_xp(), 22);
    assert_eq!(transition.grants[0].base_amount, 15);
    assert_eq!(engine.state().progression.current_xp, 22);
}

#[test]
fn test_grant_that_floors_to_zero_is_noop() {
    let mut engine = engine(ScriptedRandom::new());
    let transition = engine.dispatch(grant(1, 0.5)).unwrap();

    assert!(transition.is_noop());
    assert_eq!(engine.state().progression.total_xp_earned, 0);
    assert!(engine.notifications().is_empty());
}

#[test]
fn test_invalid_grants_rejected() {
    let mut engine = engine(ScriptedRandom::new());

    assert_eq!(engine.dispatch(grant(-5, 1.0)), Err(EngineError::InvalidXpAmount(-5)));
    assert!(matches!(
        engine.dispatch(grant(10, 0.0)),
        Err(EngineError::InvalidMultiplier(_))
    ));
    assert!(matches!(
        engine.dispatch(grant(10, f64::NAN)),
        Err(EngineError::InvalidMultiplier(_))
    ));
    assert_eq!(engine.state().progression.total_xp_earned, 0);
}

#[test]
fn test_lucky_reward_follows_badges() {
    let mut chances = vec![false; STARTUP_CHANCES];
    chances.push(true);
    let mut picks = vec![0; STARTUP_PICKS];
    picks.push(2);
    let mut engine = engine(ScriptedRandom::new().with_chances(chances).with_picks(picks));

    let transition = engine.dispatch(grant(100, 1.0)).unwrap();

    assert_eq!(transition.grants[0].lucky_reward, Some(LuckyReward::DarkWarriorTheme));
    let last = transition.notifications.last().unwrap();
    assert_eq!(last.title, "Lucky Reward! 🎰");
    assert_eq!(last.message, LuckyReward::DarkWarriorTheme.message());
    assert!(engine.state().themes.is_unlocked(DARK_WARRIOR_THEME));
    assert_eq!(engine.state().recent_rewards[0], LuckyReward::DarkWarriorTheme.message());
}

#[test]
fn test_lucky_streak_multiplier_applies_to_next_grant() {
    let mut chances = vec![false; STARTUP_CHANCES];
    chances.push(true);
    let mut picks = vec![0; STARTUP_PICKS];
    picks.push(4);
    let mut engine = engine(ScriptedRandom::new().with_chances(chances).with_picks(picks));

    engine.dispatch(grant(10, 1.0)).unwrap();
    assert!(engine.state().progression.bonus_xp_active);

    let transition = engine.dispatch(grant(10, 1.0)).unwrap();
    assert_eq!(transition.total_xp(), 20);
    assert_eq!(engine.state().progression.total_xp_earned, 30);
}

#[test]
fn test_theme_change_requires_unlock() {
    let mut engine = engine(ScriptedRandom::new());

    assert_eq!(
        engine.dispatch(Command::ChangeTheme {
            theme: "neon".to_string()
        }),
        Err(EngineError::ThemeLocked("neon".to_string()))
    );

    engine
        .dispatch(Command::UnlockTheme {
            theme: "neon".to_string(),
        })
        .unwrap();
    engine
        .dispatch(Command::ChangeTheme {
            theme: "neon".to_string(),
        })
        .unwrap();
    assert_eq!(engine.state().themes.active_theme, "neon");

    engine.dispatch(Command::ToggleDarkMode).unwrap();
    assert!(engine.state().themes.dark_mode);
}

#[test]
fn test_grant_within_level_two() {
    let mut engine = engine(ScriptedRandom::new());
    engine.dispatch(grant(150, 1.0)).unwrap();

    let progression = &engine.state().progression;
    assert_eq!(progression.current_level, 2);
    assert_eq!(progression.total_xp_earned, 150);
    assert_eq!(progression.xp_to_next_level, 90);
}

#[test]
fn test_large_grant_unlocks_badges_in_template_order() {
    let mut engine = engine(ScriptedRandom::new());
    let transition = engine.dispatch(grant(1200, 1.0)).unwrap();

    assert_eq!(engine.state().progression.current_level, 7);

    let badges: Vec<_> = transition.badges_unlocked().map(|b| b.id.as_str()).collect();
    assert_eq!(
        badges,
        vec![
            "xp-500",
            "xp-1000",
            "coding-10",
            "streak-7",
            "streak-14",
            "streak-30",
            "streak-60",
            "streak-100",
        ]
    );

    let badge_notes = transition
        .notifications
        .iter()
        .filter(|n| n.kind == NotificationType::Badge)
        .count();
    assert_eq!(badge_notes, 8);

    let grant_notes: Vec<_> = transition
        .notifications
        .iter()
        .filter(|n| n.title.starts_with('+'))
        .map(|n| n.title.as_str())
        .collect();
    assert_eq!(grant_notes, vec!["+1200 XP Earned! ⚡"]);
}

#[test]
fn test_huge_grants_saturate_total() {
    let mut engine = engine(ScriptedRandom::new());
    engine.dispatch(grant(i64::MAX, 1.0)).unwrap();
    engine.dispatch(grant(i64::MAX, 1.0)).unwrap();

    let progression = &engine.state().progression;
    assert_eq!(progression.total_xp_earned, u64::MAX);
    assert_eq!(progression.current_xp, u64::MAX);
    assert!(progression.is_consistent());
    assert!(engine.state().badges.iter().all(|b| b.unlocked));
}
