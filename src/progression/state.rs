//! Player XP state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::levels::{level_from_xp, xp_to_next_level};

/// XP, level and active multiplier for the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// XP counted towards the current level
    pub current_xp: u64,
    /// Level derived from `current_xp`
    pub current_level: u32,
    /// XP remaining in the current level band
    pub xp_to_next_level: u64,
    /// Lifetime XP earned
    pub total_xp_earned: u64,
    /// Multiplier applied to every grant (1.0 unless a bonus is active)
    pub xp_multiplier: f64,
    /// Whether a temporary bonus multiplier is active
    pub bonus_xp_active: bool,
    /// When the active bonus ends
    pub bonus_xp_expiry: Option<DateTime<Utc>>,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::from_total_xp(0)
    }
}

impl ProgressionState {
    /// Build a state from a lifetime XP total (used when rehydrating).
    pub fn from_total_xp(total_xp: u64) -> Self {
        let level = level_from_xp(total_xp);
        Self {
            current_xp: total_xp,
            current_level: level,
            xp_to_next_level: xp_to_next_level(total_xp, level),
            total_xp_earned: total_xp,
            xp_multiplier: 1.0,
            bonus_xp_active: false,
            bonus_xp_expiry: None,
        }
    }

    /// Add already-multiplied XP and recompute the derived fields.
    ///
    /// Returns the level before the change.
    pub fn add_effective_xp(&mut self, effective_xp: u64) -> u32 {
        let previous_level = self.current_level;
        self.current_xp = self.current_xp.saturating_add(effective_xp);
        self.total_xp_earned = self.total_xp_earned.saturating_add(effective_xp);
        self.current_level = level_from_xp(self.current_xp);
        self.xp_to_next_level = xp_to_next_level(self.current_xp, self.current_level);
        previous_level
    }

    /// Start a temporary multiplier that ends at `expiry`.
    pub fn activate_bonus(&mut self, multiplier: f64, expiry: DateTime<Utc>) {
        self.xp_multiplier = multiplier;
        self.bonus_xp_active = true;
        self.bonus_xp_expiry = Some(expiry);
    }

    /// End the bonus if `now` is past its expiry.
    ///
    /// Returns `true` only on the call that actually deactivates it.
    pub fn expire_bonus(&mut self, now: DateTime<Utc>) -> bool {
        match self.bonus_xp_expiry {
            Some(expiry) if self.bonus_xp_active && now > expiry => {
                self.xp_multiplier = 1.0;
                self.bonus_xp_active = false;
                self.bonus_xp_expiry = None;
                true
            }
            _ => false,
        }
    }

    /// Player tier for the current level.
    pub fn tier(&self) -> PlayerTier {
        PlayerTier::for_level(self.current_level)
    }

    /// Whether the derived fields agree with `current_xp`.
    pub fn is_consistent(&self) -> bool {
        self.current_level == level_from_xp(self.current_xp)
            && self.xp_to_next_level == xp_to_next_level(self.current_xp, self.current_level)
    }
}

/// Profile tier shown next to the player's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Mythic,
}

impl PlayerTier {
    /// Tier reached at the given level.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=9 => PlayerTier::Bronze,
            10..=19 => PlayerTier::Silver,
            20..=29 => PlayerTier::Gold,
            30..=49 => PlayerTier::Platinum,
            _ => PlayerTier::Mythic,
        }
    }

    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerTier::Bronze => "Bronze",
            PlayerTier::Silver => "Silver",
            PlayerTier::Gold => "Gold",
            PlayerTier::Platinum => "Platinum",
            PlayerTier::Mythic => "Mythic",
        }
    }
}

impl std::fmt::Display for PlayerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
