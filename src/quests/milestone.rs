//! Progress tracking shared by challenges, goals and their milestones.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Three-state lifecycle of a trackable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "not-started",
            ProgressStatus::InProgress => "in-progress",
            ProgressStatus::Completed => "completed",
        }
    }
}

/// What a progress update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEdge {
    /// Nothing changed, or the entity was already complete
    Unchanged,
    /// Progress moved but the target is not reached
    Advanced { by: u32 },
    /// Progress reached the target on this update
    Completed { by: u32 },
    /// Progress moved backwards
    Regressed { by: u32 },
}

impl ProgressEdge {
    /// Whether this update crossed from incomplete to complete.
    pub fn just_completed(&self) -> bool {
        matches!(self, ProgressEdge::Completed { .. })
    }

    /// Units gained on this update.
    pub fn gained(&self) -> u32 {
        match self {
            ProgressEdge::Advanced { by } | ProgressEdge::Completed { by } => *by,
            _ => 0,
        }
    }
}

/// Clamp a requested progress value to `0..=max`.
pub fn clamp_progress(value: i64, max: u32) -> u32 {
    value.clamp(0, max as i64) as u32
}

/// Move `progress` to `value` (clamped) and classify the change.
///
/// `completed` is only ever set, never cleared; a completed tracker ignores
/// further updates.
pub fn apply_progress(progress: &mut u32, completed: &mut bool, target: u32, value: i64) -> ProgressEdge {
    if *completed {
        return ProgressEdge::Unchanged;
    }

    let previous = *progress;
    let next = clamp_progress(value, target);
    *progress = next;

    if next >= target {
        *completed = true;
        ProgressEdge::Completed { by: next - previous }
    } else if next > previous {
        ProgressEdge::Advanced { by: next - previous }
    } else if next < previous {
        ProgressEdge::Regressed { by: previous - next }
    } else {
        ProgressEdge::Unchanged
    }
}

/// A sub-goal inside a challenge or goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub description: String,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
    /// XP granted once, when the milestone completes
    pub xp_reward: u64,
    pub due_date: Option<NaiveDate>,
}

impl Milestone {
    /// Create a milestone with no progress.
    pub fn new(id: &str, title: &str, description: &str, target: u32, xp_reward: u64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            progress: 0,
            target: target.max(1),
            completed: false,
            xp_reward,
            due_date: None,
        }
    }

    /// Set a due date.
    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Set absolute progress.
    pub fn set_progress(&mut self, value: i64) -> ProgressEdge {
        apply_progress(&mut self.progress, &mut self.completed, self.target, value)
    }

    /// Progress percentage (0-100).
    pub fn percent(&self) -> f32 {
        (self.progress as f32 / self.target as f32 * 100.0).min(100.0)
    }
}

/// Number of completed milestones.
pub fn completed_count(milestones: &[Milestone]) -> u32 {
    milestones.iter().filter(|m| m.completed).count() as u32
}

/// Result of updating one milestone of a container.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneUpdate {
    /// Snapshot of the milestone after the update
    pub milestone: Milestone,
    /// What the update did to the milestone
    pub edge: ProgressEdge,
    /// Whether the container completed because of this update
    pub container_completed: bool,
}
