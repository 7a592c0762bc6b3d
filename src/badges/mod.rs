//! Badge definitions and unlocking.
//!
//! Badges are keyed to a lifetime XP threshold. Unlocking is one-way: once a
//! badge is unlocked no operation locks it again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Badge rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeRarity {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Mythic,
}

impl BadgeRarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeRarity::Bronze => "bronze",
            BadgeRarity::Silver => "silver",
            BadgeRarity::Gold => "gold",
            BadgeRarity::Platinum => "platinum",
            BadgeRarity::Mythic => "mythic",
        }
    }
}

/// Badge category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeCategory {
    XpMilestones,
    Coding,
    Streaks,
    Social,
    Special,
}

impl BadgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeCategory::XpMilestones => "XP Milestones",
            BadgeCategory::Coding => "Coding",
            BadgeCategory::Streaks => "Streaks",
            BadgeCategory::Social => "Social",
            BadgeCategory::Special => "Special",
        }
    }

    /// Icon shown for badges in this category.
    pub fn icon(&self) -> &'static str {
        match self {
            BadgeCategory::XpMilestones => "⚡",
            BadgeCategory::Coding => "💻",
            BadgeCategory::Streaks => "🔥",
            BadgeCategory::Social => "👥",
            BadgeCategory::Special => "🌟",
        }
    }
}

/// An unlockable badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Lifetime XP needed to unlock
    pub xp_required: u64,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub rarity: BadgeRarity,
    pub category: BadgeCategory,
}

impl Badge {
    /// Create a locked badge.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        xp_required: u64,
        rarity: BadgeRarity,
        category: BadgeCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: category.icon().to_string(),
            xp_required,
            unlocked: false,
            unlocked_at: None,
            rarity,
            category,
        }
    }

    /// Whether a lifetime total covers this badge's threshold.
    pub fn is_earned_by(&self, total_xp: u64) -> bool {
        total_xp >= self.xp_required
    }

    /// Mark unlocked. Returns `false` if it already was.
    pub fn unlock(&mut self, at: DateTime<Utc>) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        self.unlocked_at = Some(at);
        true
    }
}

/// Unlock every locked badge whose threshold `total_xp` covers.
///
/// Returns the badges unlocked by this call, in template order. Running the
/// scan again with the same total unlocks nothing.
pub fn unlock_eligible(badges: &mut [Badge], total_xp: u64, at: DateTime<Utc>) -> Vec<Badge> {
    let mut newly_unlocked = Vec::new();

    for badge in badges.iter_mut() {
        if !badge.unlocked && badge.is_earned_by(total_xp) && badge.unlock(at) {
            tracing::info!("Badge unlocked: {} ({} XP)", badge.name, badge.xp_required);
            newly_unlocked.push(badge.clone());
        }
    }

    newly_unlocked
}

/// Rarity by position within a template series.
fn rarity_for_index(index: usize, cutoffs: [usize; 3]) -> BadgeRarity {
    if index < cutoffs[0] {
        BadgeRarity::Bronze
    } else if index < cutoffs[1] {
        BadgeRarity::Silver
    } else if index < cutoffs[2] {
        BadgeRarity::Gold
    } else {
        BadgeRarity::Platinum
    }
}

/// The built-in badge list created at startup.
pub fn default_badges() -> Vec<Badge> {
    let mut badges = Vec::new();

    for (index, xp) in [500u64, 1_000, 2_500, 5_000, 10_000, 25_000, 50_000, 100_000]
        .into_iter()
        .enumerate()
    {
        badges.push(Badge::new(
            format!("xp-{}", xp),
            format!("{} XP Master", xp),
            format!("Earned {} total XP", xp),
            xp,
            rarity_for_index(index, [2, 4, 6]),
            BadgeCategory::XpMilestones,
        ));
    }

    for (index, count) in [10u64, 25, 50, 100, 250, 500, 1_000].into_iter().enumerate() {
        badges.push(Badge::new(
            format!("coding-{}", count),
            format!("{} Problems Solved", count),
            format!("Solved {} coding problems", count),
            count * 50,
            rarity_for_index(index, [2, 4, 6]),
            BadgeCategory::Coding,
        ));
    }

    for (index, days) in [7u64, 14, 30, 60, 100, 365].into_iter().enumerate() {
        badges.push(Badge::new(
            format!("streak-{}", days),
            format!("{} Day Streak", days),
            format!("Maintained a {} day streak", days),
            days * 10,
            rarity_for_index(index, [2, 3, 5]),
            BadgeCategory::Streaks,
        ));
    }

    badges
}
