//! Career goals.
//!
//! Goals behave like challenges but carry a deadline and can be paused.
//! A goal that is still open when its deadline passes is marked overdue;
//! overdue goals can still be progressed and completed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::milestone::{
    apply_progress, completed_count, Milestone, MilestoneUpdate, ProgressEdge,
};

/// XP granted for starting a goal.
pub const GOAL_START_XP: u64 = 25;

/// Goal horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalCategory {
    ShortTerm,
    LongTerm,
    Career,
}

/// Goal priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

/// Goal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    NotStarted,
    Active,
    Paused,
    Overdue,
    Completed,
}

impl GoalStatus {
    /// Whether progress updates are accepted in this status.
    pub fn accepts_progress(&self) -> bool {
        matches!(self, GoalStatus::Active | GoalStatus::Overdue)
    }
}

/// A goal with a deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    pub progress: u32,
    pub target: u32,
    /// What `target` counts (problems, projects, days)
    pub unit: String,
    pub deadline: DateTime<Utc>,
    pub status: GoalStatus,
    pub priority: GoalPriority,
    /// XP granted once, on completion
    pub xp_reward: u64,
    pub milestones: Vec<Milestone>,
    pub tags: Vec<String>,
    pub estimated_hours: f32,
    pub actual_hours: f32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a goal advanced by direct progress.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        title: &str,
        category: GoalCategory,
        priority: GoalPriority,
        target: u32,
        unit: &str,
        deadline: DateTime<Utc>,
        xp_reward: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            category,
            progress: 0,
            target: target.max(1),
            unit: unit.to_string(),
            deadline,
            status: GoalStatus::NotStarted,
            priority,
            xp_reward,
            milestones: Vec::new(),
            tags: Vec::new(),
            estimated_hours: 0.0,
            actual_hours: 0.0,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn tagged(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn estimated(mut self, hours: f32) -> Self {
        self.estimated_hours = hours;
        self
    }

    /// Drive progress through milestones; `target` becomes their count.
    pub fn with_milestones(mut self, milestones: Vec<Milestone>) -> Self {
        if !milestones.is_empty() {
            self.target = milestones.len() as u32;
        }
        self.milestones = milestones;
        self.progress = completed_count(&self.milestones);
        self
    }

    pub fn is_milestone_driven(&self) -> bool {
        !self.milestones.is_empty()
    }

    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }

    /// Move from not-started to active. Returns `false` otherwise.
    pub fn start(&mut self, at: DateTime<Utc>) -> bool {
        if self.status != GoalStatus::NotStarted {
            return false;
        }
        self.status = GoalStatus::Active;
        self.updated_at = at;
        true
    }

    /// Pause an active or overdue goal.
    pub fn pause(&mut self, at: DateTime<Utc>) -> bool {
        if !self.status.accepts_progress() {
            return false;
        }
        self.status = GoalStatus::Paused;
        self.updated_at = at;
        true
    }

    /// Resume a paused goal, landing in overdue if the deadline has passed.
    pub fn resume(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != GoalStatus::Paused {
            return false;
        }
        self.status = if now > self.deadline {
            GoalStatus::Overdue
        } else {
            GoalStatus::Active
        };
        self.updated_at = now;
        true
    }

    /// Mark an active goal overdue once `now` is past the deadline.
    pub fn mark_overdue(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != GoalStatus::Active || now <= self.deadline {
            return false;
        }
        self.status = GoalStatus::Overdue;
        self.updated_at = now;
        true
    }

    /// Set absolute progress on a goal without milestones.
    pub fn set_progress(&mut self, value: i64, at: DateTime<Utc>) -> ProgressEdge {
        let mut completed = self.is_completed();
        let edge = apply_progress(&mut self.progress, &mut completed, self.target, value);
        if edge != ProgressEdge::Unchanged {
            self.updated_at = at;
        }
        if edge.just_completed() {
            self.status = GoalStatus::Completed;
        }
        edge
    }

    /// Set one milestone's progress and re-derive the goal progress.
    ///
    /// Returns `None` if the milestone id is unknown.
    pub fn update_milestone(
        &mut self,
        milestone_id: &str,
        value: i64,
        at: DateTime<Utc>,
    ) -> Option<MilestoneUpdate> {
        let milestone = self.milestones.iter_mut().find(|m| m.id == milestone_id)?;
        let edge = milestone.set_progress(value);
        let snapshot = milestone.clone();

        let was_completed = self.is_completed();
        self.progress = completed_count(&self.milestones);
        let container_completed = !was_completed && self.progress >= self.target;
        if container_completed {
            self.status = GoalStatus::Completed;
            self.progress = self.target;
        }
        if edge != ProgressEdge::Unchanged {
            self.updated_at = at;
        }

        Some(MilestoneUpdate {
            milestone: snapshot,
            edge,
            container_completed,
        })
    }

    /// Progress percentage (0-100).
    pub fn percent(&self) -> f32 {
        (self.progress as f32 / self.target as f32 * 100.0).min(100.0)
    }

    /// Whole days left until the deadline (negative once past).
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.deadline - now).num_days()
    }
}

fn milestone_due(now: DateTime<Utc>, days: i64) -> chrono::NaiveDate {
    (now + Duration::days(days)).date_naive()
}

/// The built-in goal list, with deadlines relative to `now`.
pub fn default_goals(now: DateTime<Utc>) -> Vec<Goal> {
    let due = |days| milestone_due(now, days);
    let deadline = |days| now + Duration::days(days);

    vec![
        Goal::new("goal-1", "Complete 100 LeetCode Problems", GoalCategory::ShortTerm, GoalPriority::High, 100, "problems", deadline(30), 1000, now)
            .describe("Solve 100 coding problems to improve algorithmic thinking and problem-solving skills")
            .tagged(&["coding", "algorithms", "problem-solving"])
            .estimated(50.0)
            .with_milestones(vec![
                Milestone::new("lc-1", "Easy Problems", "Solve 40 easy problems", 40, 200).due(due(10)),
                Milestone::new("lc-2", "Medium Problems", "Solve 50 medium problems", 50, 400).due(due(20)),
                Milestone::new("lc-3", "Hard Problems", "Solve 10 hard problems", 10, 400).due(due(30)),
            ]),
        Goal::new("goal-2", "Build 5 Portfolio Projects", GoalCategory::LongTerm, GoalPriority::High, 5, "projects", deadline(90), 1500, now)
            .describe("Create diverse projects showcasing different skills and technologies")
            .tagged(&["portfolio", "projects", "development"])
            .estimated(200.0)
            .with_milestones(vec![
                Milestone::new("proj-1", "Frontend Project", "Build a React application", 1, 300).due(due(20)),
                Milestone::new("proj-2", "Backend API", "Create a REST API", 1, 300).due(due(40)),
                Milestone::new("proj-3", "Full-Stack App", "Complete application with frontend and backend", 1, 400).due(due(60)),
                Milestone::new("proj-4", "Mobile App", "Build a mobile application", 1, 350).due(due(80)),
                Milestone::new("proj-5", "Open Source Contribution", "Contribute to an open source project", 1, 150).due(due(90)),
            ]),
        Goal::new("goal-3", "Land Software Engineering Internship", GoalCategory::Career, GoalPriority::High, 1, "internship", deadline(120), 2000, now)
            .describe("Secure an internship at a tech company to gain industry experience")
            .tagged(&["career", "internship", "job-search"])
            .estimated(100.0)
            .with_milestones(vec![
                Milestone::new("intern-1", "Resume Optimization", "Update and optimize resume", 1, 200).due(due(10)),
                Milestone::new("intern-2", "Apply to Companies", "Submit 20 applications", 20, 400).due(due(30)),
                Milestone::new("intern-3", "Interview Preparation", "Complete interview prep", 1, 600).due(due(60)),
                Milestone::new("intern-4", "Technical Interviews", "Pass technical interviews", 3, 800).due(due(90)),
            ]),
        Goal::new("goal-4", "Maintain 30-Day Learning Streak", GoalCategory::ShortTerm, GoalPriority::Medium, 30, "days", deadline(30), 500, now)
            .describe("Stay consistent with daily learning activities for 30 consecutive days")
            .tagged(&["learning", "consistency", "habits"])
            .estimated(60.0)
            .with_milestones(vec![
                Milestone::new("streak-1", "Week 1", "Complete first week", 7, 100).due(due(7)),
                Milestone::new("streak-2", "Week 2", "Complete second week", 7, 125).due(due(14)),
                Milestone::new("streak-3", "Week 3", "Complete third week", 7, 125).due(due(21)),
                Milestone::new("streak-4", "Week 4", "Complete final week", 9, 150).due(due(30)),
            ]),
        Goal::new("goal-5", "Master React Development", GoalCategory::LongTerm, GoalPriority::Medium, 10, "skills", deadline(60), 800, now)
            .describe("Become proficient in React development with advanced concepts")
            .tagged(&["react", "frontend", "javascript"])
            .estimated(80.0)
            .with_milestones(vec![
                Milestone::new("react-1", "Basic Concepts", "Learn components, props, state", 3, 150).due(due(15)),
                Milestone::new("react-2", "Hooks Mastery", "Master React hooks", 3, 200).due(due(30)),
                Milestone::new("react-3", "Advanced Patterns", "Learn advanced React patterns", 2, 250).due(due(45)),
                Milestone::new("react-4", "Testing & Performance", "Testing and optimization", 2, 200).due(due(60)),
            ]),
    ]
}
