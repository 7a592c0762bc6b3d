//! Coding-problem tracking and career stats.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default weekly problem target.
pub const DEFAULT_WEEKLY_TARGET: u32 = 10;

/// Upper bound of every career stat.
pub const MAX_CAREER_STAT: u32 = 100;

/// Problem difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemDifficulty {
    Easy,
    Medium,
    Hard,
}

impl ProblemDifficulty {
    /// Weight used for stat boosts.
    pub fn multiplier(&self) -> u32 {
        match self {
            ProblemDifficulty::Easy => 1,
            ProblemDifficulty::Medium => 2,
            ProblemDifficulty::Hard => 3,
        }
    }
}

/// A problem the player marked solved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedProblem {
    pub id: String,
    pub title: String,
    pub difficulty: ProblemDifficulty,
    pub platform: String,
    pub topic: String,
    pub xp: u64,
}

/// Aggregate problem-solving statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodingStats {
    pub total_solved: u32,
    pub easy_count: u32,
    pub medium_count: u32,
    pub hard_count: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub todays_solved: u32,
    pub weekly_target: u32,
    pub weekly_progress: u32,
    /// Solved count per platform, keyed lowercase
    pub platform_counts: BTreeMap<String, u32>,
    pub topic_counts: BTreeMap<String, u32>,
    pub solved_ids: BTreeSet<String>,
    pub last_solved_on: Option<NaiveDate>,
}

impl Default for CodingStats {
    fn default() -> Self {
        Self {
            total_solved: 0,
            easy_count: 0,
            medium_count: 0,
            hard_count: 0,
            current_streak: 0,
            longest_streak: 0,
            todays_solved: 0,
            weekly_target: DEFAULT_WEEKLY_TARGET,
            weekly_progress: 0,
            platform_counts: BTreeMap::new(),
            topic_counts: BTreeMap::new(),
            solved_ids: BTreeSet::new(),
            last_solved_on: None,
        }
    }
}

impl CodingStats {
    pub fn is_solved(&self, problem_id: &str) -> bool {
        self.solved_ids.contains(problem_id)
    }

    /// Count a newly solved problem. Returns `false` if it was already solved.
    pub fn record(&mut self, problem: &SolvedProblem, at: DateTime<Utc>) -> bool {
        if !self.solved_ids.insert(problem.id.clone()) {
            return false;
        }

        let today = at.date_naive();
        self.roll_day(today);

        self.total_solved += 1;
        self.todays_solved += 1;
        self.weekly_progress += 1;
        match problem.difficulty {
            ProblemDifficulty::Easy => self.easy_count += 1,
            ProblemDifficulty::Medium => self.medium_count += 1,
            ProblemDifficulty::Hard => self.hard_count += 1,
        }
        *self
            .platform_counts
            .entry(problem.platform.to_lowercase())
            .or_insert(0) += 1;
        *self.topic_counts.entry(problem.topic.clone()).or_insert(0) += 1;

        true
    }

    /// Reset daily and weekly counters and advance the streak for `today`.
    fn roll_day(&mut self, today: NaiveDate) {
        match self.last_solved_on {
            Some(last) if last == today => return,
            Some(last) => {
                if last.iso_week() != today.iso_week() {
                    self.weekly_progress = 0;
                }
                self.current_streak = if today.pred_opt() == Some(last) {
                    self.current_streak + 1
                } else {
                    1
                };
            }
            None => self.current_streak = 1,
        }

        self.todays_solved = 0;
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_solved_on = Some(today);
    }

    pub fn weekly_target_met(&self) -> bool {
        self.weekly_progress >= self.weekly_target
    }
}

/// Which career stat to adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareerStat {
    Knowledge,
    Mindset,
    Communication,
    Portfolio,
}

/// Four profile stats, each 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerStats {
    pub knowledge: u32,
    pub mindset: u32,
    pub communication: u32,
    pub portfolio: u32,
}

impl CareerStats {
    pub fn get(&self, stat: CareerStat) -> u32 {
        match stat {
            CareerStat::Knowledge => self.knowledge,
            CareerStat::Mindset => self.mindset,
            CareerStat::Communication => self.communication,
            CareerStat::Portfolio => self.portfolio,
        }
    }

    /// Add to a stat, saturating at the cap. Returns the new value.
    pub fn boost(&mut self, stat: CareerStat, amount: u32) -> u32 {
        let slot = match stat {
            CareerStat::Knowledge => &mut self.knowledge,
            CareerStat::Mindset => &mut self.mindset,
            CareerStat::Communication => &mut self.communication,
            CareerStat::Portfolio => &mut self.portfolio,
        };
        *slot = slot.saturating_add(amount).min(MAX_CAREER_STAT);
        *slot
    }

    /// Clamp every stat into range (used after rehydration).
    pub fn clamped(self) -> Self {
        Self {
            knowledge: self.knowledge.min(MAX_CAREER_STAT),
            mindset: self.mindset.min(MAX_CAREER_STAT),
            communication: self.communication.min(MAX_CAREER_STAT),
            portfolio: self.portfolio.min(MAX_CAREER_STAT),
        }
    }
}
