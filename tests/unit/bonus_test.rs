//! Unit tests for the temporary XP bonus.

use careerquest::engine::{Command, EngineError, ManualClock, QuestEngine, ScriptedRandom};
use careerquest::storage::EngineConfig;
use chrono::{Duration, Utc};

fn engine() -> (QuestEngine, ManualClock) {
    let clock = ManualClock::new(Utc::now());
    let engine = QuestEngine::new(
        "Tester",
        &EngineConfig::default(),
        Box::new(clock.clone()),
        Box::new(ScriptedRandom::new()),
    );
    (engine, clock)
}

fn bonus(multiplier: f64, duration_hours: f64) -> Command {
    Command::ActivateBonus {
        multiplier,
        duration_hours,
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
fn test_bonus_doubles_grants_until_expiry() {
    let (mut engine, clock) = engine();
    engine.dispatch(bonus(2.0, 1.0)).unwrap();

    let progression = &engine.state().progression;
    assert!(progression.bonus_xp_active);
    assert_eq!(progression.xp_multiplier, 2.0);
    assert!(progression.bonus_xp_expiry.is_some());

    assert_eq!(engine.dispatch(grant(10)).unwrap().total_xp(), 20);

    clock.advance(Duration::hours(2));
    let transition = engine.dispatch(grant(10)).unwrap();
    assert!(transition.bonus_expired);
    assert_eq!(transition.total_xp(), 10);

    let progression = &engine.state().progression;
    assert!(!progression.bonus_xp_active);
    assert_eq!(progression.xp_multiplier, 1.0);
    assert!(progression.bonus_xp_expiry.is_none());
}

#[test]
fn test_expiry_check_reports_once() {
    let (mut engine, clock) = engine();
    engine.dispatch(bonus(3.0, 0.5)).unwrap();

    assert!(!engine.dispatch(Command::CheckBonusExpiry).unwrap().bonus_expired);
    clock.advance(Duration::minutes(31));
    let transition = engine.dispatch(Command::CheckBonusExpiry).unwrap();
    assert!(transition.bonus_expired);
    assert!(!transition.is_noop());
    assert!(engine.dispatch(Command::CheckBonusExpiry).unwrap().is_noop());
    assert!(!engine.expire_bonus());
}

#[test]
fn test_new_bonus_replaces_old() {
    let (mut engine, clock) = engine();
    engine.dispatch(bonus(2.0, 1.0)).unwrap();
    engine.dispatch(bonus(3.0, 4.0)).unwrap();

    clock.advance(Duration::hours(2));
    assert_eq!(engine.dispatch(grant(10)).unwrap().total_xp(), 30);
}

#[test]
fn test_invalid_bonus_rejected() {
    let (mut engine, _) = engine();

    assert!(matches!(
        engine.dispatch(bonus(-1.0, 1.0)),
        Err(EngineError::InvalidMultiplier(_))
    ));
    assert!(matches!(
        engine.dispatch(bonus(2.0, -1.0)),
        Err(EngineError::InvalidDuration(_))
    ));
    assert!(matches!(
        engine.dispatch(bonus(2.0, f64::INFINITY)),
        Err(EngineError::InvalidDuration(_))
    ));
    assert!(!engine.state().progression.bonus_xp_active);
}

#[test]
fn test_rejected_command_keeps_expiry_for_next() {
    let (mut engine, clock) = engine();
    engine.dispatch(bonus(2.0, 1.0)).unwrap();
    clock.advance(Duration::hours(2));

    let err = engine.dispatch(grant(-1)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidXpAmount(-1)));
    assert!(engine.state().progression.bonus_xp_active);

    let transition = engine.dispatch(Command::CheckBonusExpiry).unwrap();
    assert!(transition.bonus_expired);
    assert!(!engine.state().progression.bonus_xp_active);
    assert_eq!(engine.state().progression.xp_multiplier, 1.0);
}
