//! XP progression.
//!
//! Provides:
//! - The geometric level curve
//! - Player XP state with temporary bonus multipliers
//! - Lucky reward pools rolled on grants

pub mod levels;
pub mod rewards;
pub mod state;

// Re-exports for convenience
pub use levels::{cumulative_xp_for_level, level_from_xp, xp_for_level, xp_to_next_level};
pub use rewards::{ChallengeBonus, LuckyReward, RewardEffect};
pub use state::{PlayerTier, ProgressionState};
