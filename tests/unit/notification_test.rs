//! Unit tests for the notification center and notification commands.

use careerquest::engine::{Command, EngineError, EntityKind, ManualClock, QuestEngine, ScriptedRandom};
use careerquest::notifications::{
    Notification, NotificationCenter, NotificationPriority, NotificationType, DEFAULT_CAPACITY,
};
use careerquest::storage::EngineConfig;
use chrono::Utc;
use uuid::Uuid;

fn note(title: &str) -> Notification {
    Notification::new(
        NotificationType::Reward,
        NotificationPriority::Medium,
        title,
        "message",
        Utc::now(),
    )
}

fn engine(capacity: usize) -> QuestEngine {
    let config = EngineConfig {
        notification_capacity: capacity,
        ..EngineConfig::default()
    };
    QuestEngine::new(
        "Tester",
        &config,
        Box::new(ManualClock::new(Utc::now())),
        Box::new(ScriptedRandom::new()),
    )
}

fn grant(amount: i64) -> Command {
    Command::GrantXp {
        amount,
        source: "Manual".to_string(),
        multiplier: 1.0,
    }
}

#[test]
fn test_default_capacity() {
    let center = NotificationCenter::default();
    assert_eq!(center.capacity(), DEFAULT_CAPACITY);
    assert_eq!(DEFAULT_CAPACITY, 50);
    assert!(center.is_empty());
}

#[test]
fn test_zero_capacity_still_keeps_one() {
    let mut center = NotificationCenter::new(0);
    center.push(note("a"));
    center.push(note("b"));
    assert_eq!(center.capacity(), 1);
    assert_eq!(center.len(), 1);
    assert_eq!(center.latest().unwrap().title, "b");
}

#[test]
fn test_extend_keeps_production_order() {
    let mut center = NotificationCenter::new(10);
    center.extend(vec![note("first"), note("second"), note("third")]);

    let titles: Vec<_> = center.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[test]
fn test_unknown_id_reports_false() {
    let mut center = NotificationCenter::new(10);
    center.push(note("a"));
    assert!(!center.mark_read(Uuid::new_v4()));
    assert!(!center.remove(Uuid::new_v4()));
    assert_eq!(center.len(), 1);
}

#[test]
fn test_engine_caps_notifications() {
    let mut engine = engine(3);
    for _ in 0..5 {
        engine.dispatch(grant(1)).unwrap();
    }
    assert_eq!(engine.notifications().len(), 3);
    assert_eq!(engine.notifications().unread_count(), 3);
}

#[test]
fn test_read_and_remove_commands() {
    let mut engine = engine(10);
    engine.dispatch(grant(5)).unwrap();
    engine.dispatch(grant(5)).unwrap();
    let ids: Vec<_> = engine.notifications().iter().map(|n| n.id).collect();

    engine
        .dispatch(Command::MarkNotificationRead { id: ids[0] })
        .unwrap();
    assert_eq!(engine.notifications().unread_count(), 1);

    engine
        .dispatch(Command::RemoveNotification { id: ids[1] })
        .unwrap();
    assert_eq!(engine.notifications().len(), 1);

    let missing = Uuid::new_v4();
    assert_eq!(
        engine.dispatch(Command::RemoveNotification { id: missing }),
        Err(EngineError::NotFound {
            kind: EntityKind::Notification,
            id: missing.to_string(),
        })
    );

    engine.dispatch(grant(5)).unwrap();
    engine.dispatch(Command::MarkAllNotificationsRead).unwrap();
    assert_eq!(engine.notifications().unread_count(), 0);
}
