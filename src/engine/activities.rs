//! Missions, side quests, skill practice and coding problems.

use super::{EngineError, EntityKind, QuestEngine, Transition};
use crate::coding::{CareerStat, SolvedProblem};
use crate::notifications::{NotificationPriority, NotificationType};
use crate::quests::generate_daily_missions;
use crate::skills::{check_prerequisites, PrerequisiteError};

impl QuestEngine {
    /// Replace today's missions with a fresh draw.
    pub(super) fn refresh_daily_missions(&mut self) {
        let now = self.clock.now();
        self.state.daily_missions = generate_daily_missions(self.rng.as_mut(), now);
        tracing::debug!("Drew {} daily missions", self.state.daily_missions.len());
    }

    pub(super) fn complete_mission(&mut self, mission_id: &str, transition: &mut Transition) -> Result<(), EngineError> {
        let now = self.clock.now();
        let mission = self
            .state
            .daily_missions
            .iter_mut()
            .find(|m| m.id == mission_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Mission, mission_id))?;

        if mission.completed {
            return Ok(());
        }
        if mission.is_expired(now) {
            return Err(EngineError::MissionExpired(mission_id.to_string()));
        }
        mission.complete();
        let (title, base, multiplier) = (mission.title.clone(), mission.xp_reward, mission.multiplier);

        self.apply_grant(base, &format!("Mission: {}", title), multiplier, transition);
        self.notify(
            NotificationType::Mission,
            NotificationPriority::Medium,
            "Mission Complete! 🎯",
            format!("You completed \"{}\"", title),
            transition,
        );
        Ok(())
    }

    pub(super) fn complete_side_quest(&mut self, quest_id: &str, transition: &mut Transition) -> Result<(), EngineError> {
        let quest = self
            .state
            .side_quests
            .iter_mut()
            .find(|q| q.id == quest_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::SideQuest, quest_id))?;

        if !quest.complete() {
            return Ok(());
        }
        let (title, xp) = (quest.title.clone(), quest.xp_reward);

        self.apply_grant(xp, &format!("Side Quest: {}", title), 1.0, transition);
        self.notify(
            NotificationType::Mission,
            NotificationPriority::Low,
            "Side Quest Complete! 🗺️",
            format!("You finished \"{}\"", title),
            transition,
        );
        Ok(())
    }

    pub(super) fn unlock_skill(&mut self, skill_id: &str, transition: &mut Transition) -> Result<(), EngineError> {
        let skill = self
            .state
            .skills
            .iter()
            .find(|s| s.id == skill_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Skill, skill_id))?;
        if skill.unlocked {
            return Ok(());
        }

        check_prerequisites(&self.state.skills, skill_id).map_err(|e| match e {
            PrerequisiteError::Locked { skill, prerequisite } => {
                EngineError::PrerequisitesNotMet { skill, prerequisite }
            }
            PrerequisiteError::Cycle(id) => EngineError::PrerequisiteCycle(id),
            PrerequisiteError::UnknownSkill(id) => EngineError::not_found(EntityKind::Skill, &id),
        })?;

        let Some(skill) = self.state.skills.iter_mut().find(|s| s.id == skill_id) else {
            return Err(EngineError::not_found(EntityKind::Skill, skill_id));
        };
        skill.unlocked = true;
        let name = skill.name.clone();
        tracing::info!("Skill unlocked: {}", name);

        self.notify(
            NotificationType::Achievement,
            NotificationPriority::Medium,
            "Skill Unlocked! 🔓",
            format!("You can now practice {}", name),
            transition,
        );
        Ok(())
    }

    pub(super) fn practice_skill(
        &mut self,
        skill_id: &str,
        activity_id: &str,
        transition: &mut Transition,
    ) -> Result<(), EngineError> {
        let skill = self
            .state
            .skills
            .iter_mut()
            .find(|s| s.id == skill_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Skill, skill_id))?;
        if !skill.unlocked {
            return Err(EngineError::SkillLocked(skill_id.to_string()));
        }

        let activity = skill
            .activity_mut(activity_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Activity, activity_id))?;
        if activity.completed {
            return Err(EngineError::ActivityAlreadyCompleted {
                skill: skill_id.to_string(),
                activity: activity_id.to_string(),
            });
        }
        activity.completed = true;
        let (title, xp) = (activity.title.clone(), activity.xp_reward);

        let previous_level = skill.add_practice_xp(xp);
        let (name, level) = (skill.name.clone(), skill.level);

        if level > previous_level {
            tracing::info!("Skill {} reached level {}", name, level);
            self.notify(
                NotificationType::LevelUp,
                NotificationPriority::Medium,
                "Skill Level Up! 📚",
                format!("{} is now level {}", name, level),
                transition,
            );
        }
        self.apply_grant(xp, &format!("Practice: {}", title), 1.0, transition);
        Ok(())
    }

    pub(super) fn solve_problem(&mut self, problem: SolvedProblem, transition: &mut Transition) -> Result<(), EngineError> {
        let now = self.clock.now();
        if !self.state.coding.record(&problem, now) {
            return Err(EngineError::ProblemAlreadySolved(problem.id));
        }
        self.state
            .career
            .boost(CareerStat::Knowledge, 2 * problem.difficulty.multiplier());

        self.apply_grant(problem.xp, &format!("Solved: {}", problem.title), 1.0, transition);
        self.notify(
            NotificationType::ProblemSolved,
            NotificationPriority::Medium,
            "Problem Solved! 💻",
            format!("{} ({:?}) on {}", problem.title, problem.difficulty, problem.platform),
            transition,
        );
        Ok(())
    }
}
