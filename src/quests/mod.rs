//! Trackable work: tasks, challenges, goals, milestones, daily missions and
//! side quests.
//!
//! Every tracker completes one way. Once complete it ignores further updates,
//! so a completion reward can only be paid on the update that crossed the line.

pub mod challenges;
pub mod goals;
pub mod milestone;
pub mod missions;
pub mod tasks;

pub use challenges::{default_challenges, Challenge, ChallengeDifficulty};
pub use goals::{default_goals, Goal, GoalCategory, GoalPriority, GoalStatus};
pub use milestone::{Milestone, MilestoneUpdate, ProgressEdge, ProgressStatus};
pub use missions::{default_side_quests, generate_daily_missions, DailyMission, QuestDifficulty, SideQuest};
pub use tasks::{Task, TaskPriority};
