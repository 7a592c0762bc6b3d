//! Random reward pools rolled on XP grants and challenge completion.

use serde::{Deserialize, Serialize};

/// Chance that an XP grant rolls a lucky reward.
pub const LUCKY_REWARD_CHANCE: f64 = 0.2;

/// Chance that completing a challenge rolls a bonus reward.
pub const CHALLENGE_BONUS_CHANCE: f64 = 0.3;

/// Theme unlocked by the Dark Warrior reward.
pub const DARK_WARRIOR_THEME: &str = "dark-warrior";

/// What a reward does beyond producing its notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RewardEffect {
    /// Notification only
    Flavor,
    /// Temporary XP multiplier
    BonusMultiplier { multiplier: f64, duration_hours: f64 },
    /// Unlocks a cosmetic theme
    UnlockTheme(&'static str),
}

/// Reward pool for XP grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LuckyReward {
    MysteryBox,
    StatBoost,
    DarkWarriorTheme,
    LuckyBonus,
    StreakMultiplier,
}

impl LuckyReward {
    /// Every reward in pool order.
    pub const POOL: [LuckyReward; 5] = [
        LuckyReward::MysteryBox,
        LuckyReward::StatBoost,
        LuckyReward::DarkWarriorTheme,
        LuckyReward::LuckyBonus,
        LuckyReward::StreakMultiplier,
    ];

    /// Notification text.
    pub fn message(&self) -> &'static str {
        match self {
            LuckyReward::MysteryBox => "🎁 Mystery Box unlocked!",
            LuckyReward::StatBoost => "⚡ +0.2 Stat Boost (48h)",
            LuckyReward::DarkWarriorTheme => "🌟 Dark Warrior Mode Theme Unlocked",
            LuckyReward::LuckyBonus => "🎰 Lucky Bonus: +50 XP",
            LuckyReward::StreakMultiplier => "🔥 Streak Multiplier x2",
        }
    }

    /// Side effect applied when the reward is rolled.
    pub fn effect(&self) -> RewardEffect {
        match self {
            LuckyReward::StreakMultiplier => RewardEffect::BonusMultiplier {
                multiplier: 2.0,
                duration_hours: 1.0,
            },
            LuckyReward::DarkWarriorTheme => RewardEffect::UnlockTheme(DARK_WARRIOR_THEME),
            _ => RewardEffect::Flavor,
        }
    }
}

/// Reward pool for challenge completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeBonus {
    DoubleXpHour,
    SpecialTheme,
    RareBadge,
    StreakBooster,
}

impl ChallengeBonus {
    /// Every bonus in pool order.
    pub const POOL: [ChallengeBonus; 4] = [
        ChallengeBonus::DoubleXpHour,
        ChallengeBonus::SpecialTheme,
        ChallengeBonus::RareBadge,
        ChallengeBonus::StreakBooster,
    ];

    /// Notification text.
    pub fn message(&self) -> &'static str {
        match self {
            ChallengeBonus::DoubleXpHour => "🎁 Bonus XP Multiplier x2 for 1 hour!",
            ChallengeBonus::SpecialTheme => "🌟 Special Theme Unlocked!",
            ChallengeBonus::RareBadge => "💎 Rare Badge Unlocked!",
            ChallengeBonus::StreakBooster => "🔥 Streak Booster Activated!",
        }
    }

    /// Side effect applied when the bonus is rolled.
    pub fn effect(&self) -> RewardEffect {
        match self {
            ChallengeBonus::DoubleXpHour => RewardEffect::BonusMultiplier {
                multiplier: 2.0,
                duration_hours: 1.0,
            },
            _ => RewardEffect::Flavor,
        }
    }
}
