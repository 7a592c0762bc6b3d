//! Challenges.
//!
//! A challenge is started explicitly, then advanced either directly (for
//! challenges without milestones) or through its milestones. For
//! milestone-driven challenges the overall progress is the number of
//! completed milestones and completion requires all of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::milestone::{
    apply_progress, completed_count, Milestone, MilestoneUpdate, ProgressEdge, ProgressStatus,
};

/// XP granted for starting a challenge.
pub const CHALLENGE_START_XP: u64 = 25;

/// XP granted per unit of direct challenge progress.
pub const CHALLENGE_PROGRESS_XP_PER_UNIT: u64 = 10;

/// Challenge difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeDifficulty {
    Easy,
    Medium,
    Hard,
    Elite,
}

impl ChallengeDifficulty {
    pub fn display_name(&self) -> &'static str {
        match self {
            ChallengeDifficulty::Easy => "Easy",
            ChallengeDifficulty::Medium => "Medium",
            ChallengeDifficulty::Hard => "Hard",
            ChallengeDifficulty::Elite => "Elite",
        }
    }
}

/// A multi-day challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: ChallengeDifficulty,
    pub category: String,
    pub status: ProgressStatus,
    pub progress: u32,
    pub max_progress: u32,
    /// XP granted once, on completion
    pub xp_reward: u64,
    pub time_limit_days: u32,
    pub requirements: Vec<String>,
    pub rewards: Vec<String>,
    pub milestones: Vec<Milestone>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Challenge {
    /// Create a challenge advanced by direct progress.
    pub fn new(
        id: &str,
        title: &str,
        difficulty: ChallengeDifficulty,
        category: &str,
        max_progress: u32,
        xp_reward: u64,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            difficulty,
            category: category.to_string(),
            status: ProgressStatus::NotStarted,
            progress: 0,
            max_progress: max_progress.max(1),
            xp_reward,
            time_limit_days: 7,
            requirements: Vec::new(),
            rewards: Vec::new(),
            milestones: Vec::new(),
            started_at: None,
            completed_at: None,
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn time_limit(mut self, days: u32) -> Self {
        self.time_limit_days = days;
        self
    }

    pub fn requirements(mut self, requirements: &[&str]) -> Self {
        self.requirements = requirements.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn rewards(mut self, rewards: &[&str]) -> Self {
        self.rewards = rewards.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Drive progress through milestones; `max_progress` becomes their count.
    pub fn with_milestones(mut self, milestones: Vec<Milestone>) -> Self {
        if !milestones.is_empty() {
            self.max_progress = milestones.len() as u32;
        }
        self.milestones = milestones;
        self.progress = completed_count(&self.milestones);
        self
    }

    pub fn is_milestone_driven(&self) -> bool {
        !self.milestones.is_empty()
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProgressStatus::Completed
    }

    pub fn is_started(&self) -> bool {
        self.status != ProgressStatus::NotStarted
    }

    /// Move from not-started to in-progress. Returns `false` otherwise.
    pub fn start(&mut self, at: DateTime<Utc>) -> bool {
        if self.status != ProgressStatus::NotStarted {
            return false;
        }
        self.status = ProgressStatus::InProgress;
        self.started_at = Some(at);
        true
    }

    /// Add `delta` units of direct progress.
    pub fn advance(&mut self, delta: i64, at: DateTime<Utc>) -> ProgressEdge {
        let mut completed = self.is_completed();
        let target = self.max_progress;
        let value = self.progress as i64 + delta;
        let edge = apply_progress(&mut self.progress, &mut completed, target, value);
        if edge.just_completed() {
            self.mark_completed(at);
        }
        edge
    }

    /// Set one milestone's progress and re-derive the challenge progress.
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
        let container_completed = !was_completed && self.progress >= self.max_progress;
        if container_completed {
            self.mark_completed(at);
        }

        Some(MilestoneUpdate {
            milestone: snapshot,
            edge,
            container_completed,
        })
    }

    fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.status = ProgressStatus::Completed;
        self.progress = self.max_progress;
        self.completed_at = Some(at);
    }

    /// Progress percentage (0-100).
    pub fn percent(&self) -> f32 {
        (self.progress as f32 / self.max_progress as f32 * 100.0).min(100.0)
    }
}

/// The built-in challenge list.
pub fn default_challenges() -> Vec<Challenge> {
    vec![
        Challenge::new("dsa-sprint", "DSA Sprint Challenge", ChallengeDifficulty::Medium, "Programming", 5, 500)
            .describe("Master data structures and algorithms by solving problems across different difficulty levels")
            .time_limit(7)
            .requirements(&["Basic programming knowledge", "Problem-solving skills"])
            .rewards(&["DSA Master badge", "500 XP", "Algorithm expertise"])
            .with_milestones(vec![
                Milestone::new("dsa-1", "Array Basics", "Solve 5 array problems", 5, 100),
                Milestone::new("dsa-2", "String Manipulation", "Solve 5 string problems", 5, 100),
                Milestone::new("dsa-3", "Tree Traversal", "Solve 5 tree problems", 5, 150),
                Milestone::new("dsa-4", "Dynamic Programming", "Solve 5 DP problems", 5, 200),
                Milestone::new("dsa-5", "Graph Algorithms", "Solve 5 graph problems", 5, 250),
            ]),
        Challenge::new("portfolio-boost", "Portfolio Powerhouse", ChallengeDifficulty::Hard, "Portfolio", 5, 750)
            .describe("Build an impressive portfolio with multiple projects showcasing different technologies")
            .time_limit(14)
            .requirements(&["Web development skills", "Design sense", "Project planning"])
            .rewards(&["Portfolio Master badge", "750 XP", "Professional portfolio"])
            .with_milestones(vec![
                Milestone::new("port-1", "Frontend Project", "Build a React/Vue application", 1, 150),
                Milestone::new("port-2", "Backend API", "Create a REST API", 1, 150),
                Milestone::new("port-3", "Full-Stack App", "Complete full-stack application", 1, 200),
                Milestone::new("port-4", "Mobile App", "Build a mobile application", 1, 175),
                Milestone::new("port-5", "Documentation", "Write comprehensive documentation", 1, 75),
            ]),
        Challenge::new("networking-ninja", "Networking Ninja", ChallengeDifficulty::Easy, "Networking", 4, 300)
            .describe("Expand your professional network and build meaningful connections in the tech industry")
            .time_limit(10)
            .requirements(&["LinkedIn profile", "Professional mindset", "Communication skills"])
            .rewards(&["Network Builder badge", "300 XP", "Industry connections"])
            .with_milestones(vec![
                Milestone::new("net-1", "LinkedIn Optimization", "Update and optimize LinkedIn profile", 1, 50),
                Milestone::new("net-2", "Connect with Professionals", "Connect with 10 industry professionals", 10, 100),
                Milestone::new("net-3", "Engage with Content", "Comment on 15 professional posts", 15, 75),
                Milestone::new("net-4", "Share Knowledge", "Post 3 professional updates", 3, 75),
            ]),
        Challenge::new("interview-master", "Interview Mastery", ChallengeDifficulty::Elite, "Interview Prep", 6, 1000)
            .describe("Prepare comprehensively for technical and behavioral interviews")
            .time_limit(21)
            .requirements(&["Technical knowledge", "Communication skills", "Problem-solving ability"])
            .rewards(&["Interview Expert badge", "1000 XP", "Interview confidence"])
            .with_milestones(vec![
                Milestone::new("int-1", "Technical Questions", "Practice 50 technical questions", 50, 200),
                Milestone::new("int-2", "Behavioral Questions", "Prepare 20 behavioral responses", 20, 150),
                Milestone::new("int-3", "Mock Interviews", "Complete 5 mock interviews", 5, 250),
                Milestone::new("int-4", "System Design", "Study 10 system design problems", 10, 200),
                Milestone::new("int-5", "Company Research", "Research 5 target companies", 5, 100),
                Milestone::new("int-6", "Salary Negotiation", "Learn negotiation strategies", 1, 100),
            ]),
        Challenge::new("open-source-hero", "Open Source Hero", ChallengeDifficulty::Hard, "Open Source", 4, 800)
            .describe("Contribute to open source projects and build your reputation in the developer community")
            .time_limit(30)
            .requirements(&["Git knowledge", "Programming skills", "Community mindset"])
            .rewards(&["Open Source Contributor badge", "800 XP", "Community recognition"])
            .with_milestones(vec![
                Milestone::new("os-1", "Find Projects", "Identify 5 suitable projects", 5, 100),
                Milestone::new("os-2", "First Contribution", "Make your first contribution", 1, 200),
                Milestone::new("os-3", "Bug Fixes", "Fix 3 bugs in open source projects", 3, 300),
                Milestone::new("os-4", "Feature Implementation", "Implement a new feature", 1, 200),
            ]),
        Challenge::new("learning-marathon", "Learning Marathon", ChallengeDifficulty::Medium, "Learning", 4, 600)
            .describe("Dedicate time to continuous learning and skill development")
            .time_limit(14)
            .requirements(&["Dedication", "Time management", "Learning resources"])
            .rewards(&["Lifelong Learner badge", "600 XP", "Knowledge expansion"])
            .with_milestones(vec![
                Milestone::new("learn-1", "Online Courses", "Complete 3 online courses", 3, 200),
                Milestone::new("learn-2", "Technical Articles", "Read 20 technical articles", 20, 150),
                Milestone::new("learn-3", "Documentation Study", "Study 5 technology documentations", 5, 125),
                Milestone::new("learn-4", "Video Tutorials", "Watch 15 hours of tutorials", 15, 125),
            ]),
    ]
}
