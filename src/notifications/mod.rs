//! In-app notifications.
//!
//! Notifications are kept newest first in a bounded buffer; once the cap is
//! exceeded the oldest entries are dropped.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default retention cap.
pub const DEFAULT_CAPACITY: usize = 50;

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    Achievement,
    LevelUp,
    TaskCompleted,
    Streak,
    Challenge,
    Goal,
    Badge,
    Reward,
    Social,
    Mission,
    ProblemSolved,
    Milestone,
    Integration,
}

/// Display priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub priority: NotificationPriority,
}

impl Notification {
    /// Create an unread notification.
    pub fn new(
        kind: NotificationType,
        priority: NotificationPriority,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp,
            read: false,
            priority,
        }
    }
}

/// Bounded, newest-first notification list.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl NotificationCenter {
    /// Create an empty center holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front, evicting the oldest entries beyond the cap.
    pub fn push(&mut self, notification: Notification) {
        self.items.push_front(notification);
        self.items.truncate(self.capacity);
    }

    /// Insert several notifications in the order they were produced.
    ///
    /// The last one ends up at the front.
    pub fn extend(&mut self, notifications: impl IntoIterator<Item = Notification>) {
        for notification in notifications {
            self.push(notification);
        }
    }

    /// Mark a notification read. Returns `false` if the id is unknown.
    pub fn mark_read(&mut self, id: Uuid) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    /// Mark every notification read.
    pub fn mark_all_read(&mut self) {
        for notification in self.items.iter_mut() {
            notification.read = true;
        }
    }

    /// Remove a notification. Returns `false` if the id is unknown.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Notifications, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    /// Newest notification.
    pub fn latest(&self) -> Option<&Notification> {
        self.items.front()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
