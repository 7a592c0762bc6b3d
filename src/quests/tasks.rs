//! Tasks on the quest board.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    Elite,
    Core,
    Bonus,
}

impl TaskPriority {
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskPriority::Elite => "Elite",
            TaskPriority::Core => "Core",
            TaskPriority::Bonus => "Bonus",
        }
    }
}

/// A single task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub completed: bool,
    /// XP granted on completion
    pub xp: u64,
    pub category: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub estimated_hours: Option<f32>,
    pub actual_hours: Option<f32>,
}

impl Task {
    /// Create an open task.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        priority: TaskPriority,
        xp: u64,
        category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            priority,
            completed: false,
            xp,
            category: category.into(),
            due_date: None,
            created_at,
            completed_at: None,
            tags: Vec::new(),
            estimated_hours: None,
            actual_hours: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn tagged(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Mark done. Returns `false` if it already was.
    pub fn complete(&mut self, at: DateTime<Utc>) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.completed_at = Some(at);
        true
    }

    /// Whether the due date has passed without completion.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.map(|d| d < today).unwrap_or(false)
    }
}
