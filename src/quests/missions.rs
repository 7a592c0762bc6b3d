//! Daily missions and side quests.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::RandomSource;

/// Missions drawn per day.
pub const MISSIONS_PER_DAY: usize = 3;

/// Chance that a drawn mission pays double.
pub const DOUBLE_MISSION_CHANCE: f64 = 0.3;

/// Difficulty shared by missions and side quests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestDifficulty {
    Easy,
    Medium,
    Hard,
}

/// A mission available for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMission {
    pub id: String,
    pub title: String,
    pub description: String,
    pub xp_reward: u64,
    /// Suggested time box in hours
    pub time_limit_hours: u32,
    pub completed: bool,
    pub expires_at: DateTime<Utc>,
    pub multiplier: f64,
    pub category: String,
    pub difficulty: QuestDifficulty,
}

impl DailyMission {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// XP paid on completion.
    pub fn reward(&self) -> u64 {
        (self.xp_reward as f64 * self.multiplier).floor() as u64
    }

    /// Mark done. Returns `false` if it already was.
    pub fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }
}

struct MissionTemplate {
    title: &'static str,
    description: &'static str,
    xp_reward: u64,
    category: &'static str,
    difficulty: QuestDifficulty,
}

const MISSION_TEMPLATES: [MissionTemplate; 10] = [
    MissionTemplate { title: "Code Warrior", description: "Solve 3 coding problems", xp_reward: 150, category: "coding", difficulty: QuestDifficulty::Medium },
    MissionTemplate { title: "Task Master", description: "Complete 5 tasks", xp_reward: 100, category: "productivity", difficulty: QuestDifficulty::Easy },
    MissionTemplate { title: "Learning Sprint", description: "Study for 2 hours", xp_reward: 200, category: "learning", difficulty: QuestDifficulty::Hard },
    MissionTemplate { title: "Social Butterfly", description: "Connect with 3 professionals", xp_reward: 75, category: "networking", difficulty: QuestDifficulty::Easy },
    MissionTemplate { title: "Skill Builder", description: "Practice a skill for 1 hour", xp_reward: 125, category: "skills", difficulty: QuestDifficulty::Medium },
    MissionTemplate { title: "Goal Crusher", description: "Make progress on 2 goals", xp_reward: 175, category: "goals", difficulty: QuestDifficulty::Medium },
    MissionTemplate { title: "Challenge Accepted", description: "Start a new challenge", xp_reward: 250, category: "challenges", difficulty: QuestDifficulty::Hard },
    MissionTemplate { title: "Knowledge Seeker", description: "Read 3 tech articles", xp_reward: 90, category: "learning", difficulty: QuestDifficulty::Easy },
    MissionTemplate { title: "Project Pioneer", description: "Work on portfolio project", xp_reward: 300, category: "portfolio", difficulty: QuestDifficulty::Hard },
    MissionTemplate { title: "Interview Prep", description: "Practice 10 interview questions", xp_reward: 180, category: "interview", difficulty: QuestDifficulty::Medium },
];

/// Last instant of the UTC day containing `now`.
pub fn end_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    let midnight = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::default()));
    midnight + Duration::days(1) - Duration::milliseconds(1)
}

/// Draw today's missions.
pub fn generate_daily_missions(rng: &mut dyn RandomSource, now: DateTime<Utc>) -> Vec<DailyMission> {
    // Fisher-Yates over template indices
    let mut order: Vec<usize> = (0..MISSION_TEMPLATES.len()).collect();
    for i in (1..order.len()).rev() {
        let j = rng.pick(i + 1);
        order.swap(i, j);
    }

    let expires_at = end_of_day(now);
    order
        .into_iter()
        .take(MISSIONS_PER_DAY)
        .enumerate()
        .map(|(slot, index)| {
            let template = &MISSION_TEMPLATES[index];
            let time_limit_hours = if rng.chance(0.5) { 4 } else { 8 };
            let multiplier = if rng.chance(DOUBLE_MISSION_CHANCE) { 2.0 } else { 1.0 };
            DailyMission {
                id: format!("mission-{}-{}", now.timestamp_millis(), slot),
                title: template.title.to_string(),
                description: template.description.to_string(),
                xp_reward: template.xp_reward,
                time_limit_hours,
                completed: false,
                expires_at,
                multiplier,
                category: template.category.to_string(),
                difficulty: template.difficulty,
            }
        })
        .collect()
}

/// An optional one-off quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideQuest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub xp_reward: u64,
    pub category: String,
    pub difficulty: QuestDifficulty,
    pub estimated_minutes: u32,
    pub tags: Vec<String>,
    pub completed: bool,
}

impl SideQuest {
    fn template(
        title: &str,
        description: &str,
        xp_reward: u64,
        category: &str,
        difficulty: QuestDifficulty,
        estimated_minutes: u32,
        tags: [&str; 2],
    ) -> Self {
        Self {
            id: String::new(),
            title: title.to_string(),
            description: description.to_string(),
            xp_reward,
            category: category.to_string(),
            difficulty,
            estimated_minutes,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            completed: false,
        }
    }

    /// Mark done. Returns `false` if it already was.
    pub fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }
}

/// The built-in side quest list, with ids `quest-0` onwards.
pub fn default_side_quests() -> Vec<SideQuest> {
    use QuestDifficulty::*;

    let mut quests = vec![
        SideQuest::template("Debug Detective", "Fix 5 bugs in your code", 80, "coding", Medium, 45, ["debugging", "problem-solving"]),
        SideQuest::template("Documentation Dynamo", "Write README for a project", 60, "documentation", Easy, 30, ["writing", "documentation"]),
        SideQuest::template("Algorithm Ace", "Implement a sorting algorithm", 120, "algorithms", Hard, 60, ["algorithms", "implementation"]),
        SideQuest::template("UI/UX Explorer", "Design a mobile app mockup", 100, "design", Medium, 90, ["design", "ui/ux"]),
        SideQuest::template("API Architect", "Build a REST API endpoint", 150, "backend", Hard, 120, ["api", "backend"]),
        SideQuest::template("Test Titan", "Write unit tests for a function", 70, "testing", Medium, 40, ["testing", "quality"]),
        SideQuest::template("Performance Pro", "Optimize code performance", 130, "optimization", Hard, 75, ["performance", "optimization"]),
        SideQuest::template("Security Sentinel", "Implement authentication", 180, "security", Hard, 100, ["security", "auth"]),
        SideQuest::template("Database Designer", "Design a database schema", 110, "database", Medium, 50, ["database", "design"]),
        SideQuest::template("DevOps Dynamo", "Set up CI/CD pipeline", 200, "devops", Hard, 150, ["devops", "automation"]),
        SideQuest::template("Code Reviewer", "Review 3 pull requests", 90, "collaboration", Medium, 60, ["review", "collaboration"]),
        SideQuest::template("Tech Blogger", "Write a technical blog post", 140, "writing", Medium, 120, ["writing", "sharing"]),
        SideQuest::template("Open Source Hero", "Contribute to open source", 250, "open-source", Hard, 180, ["open-source", "community"]),
        SideQuest::template("Mentor Mode", "Help a junior developer", 160, "mentoring", Medium, 90, ["mentoring", "teaching"]),
        SideQuest::template("Conference Caller", "Attend a tech conference", 120, "learning", Easy, 480, ["learning", "networking"]),
    ];

    for (index, quest) in quests.iter_mut().enumerate() {
        quest.id = format!("quest-{}", index);
    }
    quests
}
