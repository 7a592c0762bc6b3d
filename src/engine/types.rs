//! Engine state, commands and transition output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::badges::{default_badges, Badge};
use crate::coding::{CareerStats, CodingStats, SolvedProblem};
use crate::notifications::Notification;
use crate::progression::{ChallengeBonus, LuckyReward, ProgressionState};
use crate::quests::{
    default_challenges, default_goals, default_side_quests, Challenge, DailyMission, Goal,
    SideQuest, Task,
};
use crate::skills::{default_skills, Skill};

/// Theme every player starts with.
pub const DEFAULT_THEME: &str = "default";

/// Rewards kept in the recent list.
pub const RECENT_REWARDS_LIMIT: usize = 5;

/// Kind of entity a command refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    Challenge,
    Goal,
    Milestone,
    Mission,
    SideQuest,
    Skill,
    Activity,
    Notification,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Task => "task",
            EntityKind::Challenge => "challenge",
            EntityKind::Goal => "goal",
            EntityKind::Milestone => "milestone",
            EntityKind::Mission => "mission",
            EntityKind::SideQuest => "side quest",
            EntityKind::Skill => "skill",
            EntityKind::Activity => "activity",
            EntityKind::Notification => "notification",
        };
        write!(f, "{}", name)
    }
}

/// Rejected commands. A rejected command leaves the state untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("XP amount must not be negative: {0}")]
    InvalidXpAmount(i64),

    #[error("Multiplier must be finite and positive: {0}")]
    InvalidMultiplier(f64),

    #[error("Duration must be finite and non-negative: {0} hours")]
    InvalidDuration(f64),

    #[error("Unknown {kind}: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("A {kind} with id {id} already exists")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("Skill is locked: {0}")]
    SkillLocked(String),

    #[error("Skill {skill} requires {prerequisite}, which is locked")]
    PrerequisitesNotMet { skill: String, prerequisite: String },

    #[error("Prerequisite cycle through skill {0}")]
    PrerequisiteCycle(String),

    #[error("Activity {activity} of skill {skill} is already completed")]
    ActivityAlreadyCompleted { skill: String, activity: String },

    #[error("The {kind} {id} is not active")]
    NotActive { kind: EntityKind, id: String },

    #[error("The {kind} {id} was already started")]
    AlreadyStarted { kind: EntityKind, id: String },

    #[error("Progress of {kind} {id} is derived from its milestones")]
    DerivedProgress { kind: EntityKind, id: String },

    #[error("Mission expired: {0}")]
    MissionExpired(String),

    #[error("Problem already solved: {0}")]
    ProblemAlreadySolved(String),

    #[error("Theme is locked: {0}")]
    ThemeLocked(String),

    #[error("Invalid goal {id}: {reason}")]
    InvalidGoal { id: String, reason: String },
}

impl EngineError {
    pub(crate) fn not_found(kind: EntityKind, id: &str) -> Self {
        EngineError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// One applied XP grant.
#[derive(Debug, Clone, PartialEq)]
pub struct XpGrant {
    pub source: String,
    /// Requested amount before multipliers
    pub base_amount: u64,
    /// Amount actually added
    pub effective_xp: u64,
    pub previous_level: u32,
    pub new_level: u32,
    pub badges_unlocked: Vec<Badge>,
    pub lucky_reward: Option<LuckyReward>,
}

impl XpGrant {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}

/// Everything a command did, for the UI to react to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    /// Grants applied, in order
    pub grants: Vec<XpGrant>,
    /// Notifications produced, in production order (oldest first)
    pub notifications: Vec<Notification>,
    pub challenge_bonus: Option<ChallengeBonus>,
    /// Whether the bonus multiplier ended during this command
    pub bonus_expired: bool,
    pub celebrate_level_up: bool,
    pub celebrate_badge: bool,
    pub confetti: bool,
}

impl Transition {
    /// Total effective XP added.
    pub fn total_xp(&self) -> u64 {
        self.grants.iter().map(|g| g.effective_xp).sum()
    }

    pub fn leveled_up(&self) -> bool {
        self.grants.iter().any(|g| g.leveled_up())
    }

    pub fn badges_unlocked(&self) -> impl Iterator<Item = &Badge> {
        self.grants.iter().flat_map(|g| g.badges_unlocked.iter())
    }

    /// Whether the command changed nothing observable.
    pub fn is_noop(&self) -> bool {
        self.grants.is_empty() && self.notifications.is_empty() && !self.bonus_expired
    }
}

/// Cosmetic theme settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeState {
    pub dark_mode: bool,
    pub active_theme: String,
    pub unlocked_themes: Vec<String>,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            dark_mode: false,
            active_theme: DEFAULT_THEME.to_string(),
            unlocked_themes: vec![DEFAULT_THEME.to_string()],
        }
    }
}

impl ThemeState {
    pub fn is_unlocked(&self, theme: &str) -> bool {
        self.unlocked_themes.iter().any(|t| t == theme)
    }

    /// Add a theme. Returns `false` if it was already unlocked.
    pub fn unlock(&mut self, theme: &str) -> bool {
        if self.is_unlocked(theme) {
            return false;
        }
        self.unlocked_themes.push(theme.to_string());
        true
    }
}

/// The player's whole game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestState {
    pub player_name: String,
    pub progression: ProgressionState,
    pub badges: Vec<Badge>,
    pub tasks: Vec<Task>,
    pub challenges: Vec<Challenge>,
    pub goals: Vec<Goal>,
    pub daily_missions: Vec<DailyMission>,
    pub side_quests: Vec<SideQuest>,
    pub skills: Vec<Skill>,
    pub coding: CodingStats,
    pub career: CareerStats,
    pub themes: ThemeState,
    /// Reward messages, newest first
    pub recent_rewards: Vec<String>,
}

impl QuestState {
    /// Fresh state built from the built-in templates.
    pub fn new(player_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            player_name: player_name.into(),
            progression: ProgressionState::default(),
            badges: default_badges(),
            tasks: Vec::new(),
            challenges: default_challenges(),
            goals: default_goals(now),
            daily_missions: Vec::new(),
            side_quests: default_side_quests(),
            skills: default_skills(),
            coding: CodingStats::default(),
            career: CareerStats::default(),
            themes: ThemeState::default(),
            recent_rewards: Vec::new(),
        }
    }

    pub(crate) fn push_reward(&mut self, message: &str) {
        self.recent_rewards.insert(0, message.to_string());
        self.recent_rewards.truncate(RECENT_REWARDS_LIMIT);
    }
}

/// Inbound events.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    GrantXp { amount: i64, source: String, multiplier: f64 },
    ActivateBonus { multiplier: f64, duration_hours: f64 },
    CheckBonusExpiry,
    AddTask(Task),
    RemoveTask { task_id: String },
    CompleteTask { task_id: String },
    StartChallenge { challenge_id: String },
    AdvanceChallenge { challenge_id: String, delta: i64 },
    UpdateChallengeMilestone { challenge_id: String, milestone_id: String, progress: i64 },
    StartGoal { goal_id: String },
    PauseGoal { goal_id: String },
    ResumeGoal { goal_id: String },
    SetGoalProgress { goal_id: String, progress: i64 },
    UpdateGoalMilestone { goal_id: String, milestone_id: String, progress: i64 },
    SweepOverdueGoals,
    RefreshDailyMissions,
    CompleteMission { mission_id: String },
    CompleteSideQuest { quest_id: String },
    UnlockSkill { skill_id: String },
    PracticeSkill { skill_id: String, activity_id: String },
    SolveProblem(SolvedProblem),
    ToggleDarkMode,
    UnlockTheme { theme: String },
    ChangeTheme { theme: String },
    MarkNotificationRead { id: Uuid },
    MarkAllNotificationsRead,
    RemoveNotification { id: Uuid },
    SyncBadges,
}
