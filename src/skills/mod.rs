//! Skill tree.
//!
//! Skills form a prerequisite DAG. A skill may only be unlocked when every
//! skill it depends on, directly or transitively, is unlocked, and only
//! unlocked skills can be practiced.

pub mod templates;
pub mod tree;

use serde::{Deserialize, Serialize};

pub use templates::default_skills;
pub use tree::{check_prerequisites, unlockable_skills, PrerequisiteError};

/// Skill family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Domain,
}

/// Practice difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Practice format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Tutorial,
    Project,
    Exercise,
    Challenge,
}

/// One practice exercise attached to a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeActivity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub xp_reward: u64,
    /// Minutes
    pub time_estimate: u32,
    pub difficulty: ActivityDifficulty,
    pub kind: ActivityKind,
    pub completed: bool,
}

/// A node in the skill tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: SkillCategory,
    pub level: u32,
    pub max_level: u32,
    /// XP accumulated through practice
    pub xp: u64,
    /// XP per skill level
    pub xp_required: u64,
    pub unlocked: bool,
    pub prerequisites: Vec<String>,
    pub description: String,
    pub practice_activities: Vec<PracticeActivity>,
}

impl Skill {
    /// Skill level for an XP total.
    pub fn level_for_xp(&self, xp: u64) -> u32 {
        let level = xp / self.xp_required.max(1);
        level.min(self.max_level as u64) as u32
    }

    /// Record a completed activity's XP. Returns the level before the change.
    pub fn add_practice_xp(&mut self, xp: u64) -> u32 {
        let previous = self.level;
        self.xp = self.xp.saturating_add(xp);
        self.level = self.level_for_xp(self.xp);
        previous
    }

    pub fn activity(&self, activity_id: &str) -> Option<&PracticeActivity> {
        self.practice_activities.iter().find(|a| a.id == activity_id)
    }

    pub fn activity_mut(&mut self, activity_id: &str) -> Option<&mut PracticeActivity> {
        self.practice_activities.iter_mut().find(|a| a.id == activity_id)
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }
}
