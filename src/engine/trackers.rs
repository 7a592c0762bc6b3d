//! Task, challenge and goal commands.

use super::{EngineError, EntityKind, QuestEngine, Transition};
use crate::notifications::{NotificationPriority, NotificationType};
use crate::quests::challenges::{CHALLENGE_PROGRESS_XP_PER_UNIT, CHALLENGE_START_XP};
use crate::quests::goals::GOAL_START_XP;
use crate::quests::{MilestoneUpdate, ProgressEdge, ProgressStatus, Task};

impl QuestEngine {
    pub(super) fn add_task(&mut self, task: Task) -> Result<(), EngineError> {
        if self.state.tasks.iter().any(|t| t.id == task.id) {
            return Err(EngineError::DuplicateId {
                kind: EntityKind::Task,
                id: task.id,
            });
        }
        tracing::debug!("Task added: {}", task.title);
        self.state.tasks.insert(0, task);
        Ok(())
    }

    pub(super) fn remove_task(&mut self, task_id: &str) -> Result<(), EngineError> {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|t| t.id != task_id);
        if self.state.tasks.len() == before {
            return Err(EngineError::not_found(EntityKind::Task, task_id));
        }
        Ok(())
    }

    pub(super) fn complete_task(&mut self, task_id: &str, transition: &mut Transition) -> Result<(), EngineError> {
        let now = self.clock.now();
        let task = self
            .state
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Task, task_id))?;

        if !task.complete(now) {
            return Ok(());
        }
        let (title, xp) = (task.title.clone(), task.xp);

        self.apply_grant(xp, &format!("Task: {}", title), 1.0, transition);
        self.notify(
            NotificationType::TaskCompleted,
            NotificationPriority::Medium,
            "Task Completed! ✅",
            format!("You completed \"{}\"", title),
            transition,
        );
        Ok(())
    }

    pub(super) fn start_challenge(
        &mut self,
        challenge_id: &str,
        transition: &mut Transition,
    ) -> Result<(), EngineError> {
        let now = self.clock.now();
        let challenge = self
            .state
            .challenges
            .iter_mut()
            .find(|c| c.id == challenge_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Challenge, challenge_id))?;

        if !challenge.start(now) {
            return Err(EngineError::AlreadyStarted {
                kind: EntityKind::Challenge,
                id: challenge_id.to_string(),
            });
        }
        let title = challenge.title.clone();
        tracing::info!("Challenge started: {}", title);

        self.apply_grant(CHALLENGE_START_XP, "Challenge Started", 1.0, transition);
        self.notify(
            NotificationType::Challenge,
            NotificationPriority::Medium,
            "Challenge Started! 🚀",
            format!("You've started \"{}\". Good luck!", title),
            transition,
        );
        Ok(())
    }

    /// Direct progress on a challenge without milestones.
    pub(super) fn advance_challenge(
        &mut self,
        challenge_id: &str,
        delta: i64,
        transition: &mut Transition,
    ) -> Result<(), EngineError> {
        let now = self.clock.now();
        let challenge = self
            .state
            .challenges
            .iter_mut()
            .find(|c| c.id == challenge_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Challenge, challenge_id))?;

        if challenge.is_milestone_driven() {
            return Err(EngineError::DerivedProgress {
                kind: EntityKind::Challenge,
                id: challenge_id.to_string(),
            });
        }
        if challenge.status == ProgressStatus::NotStarted {
            return Err(EngineError::NotActive {
                kind: EntityKind::Challenge,
                id: challenge_id.to_string(),
            });
        }

        let edge = challenge.advance(delta, now);
        let (title, reward) = (challenge.title.clone(), challenge.xp_reward);

        let gained = edge.gained() as u64;
        if gained > 0 {
            self.apply_grant(gained * CHALLENGE_PROGRESS_XP_PER_UNIT, "Challenge Progress", 1.0, transition);
        }

        match edge {
            ProgressEdge::Completed { .. } => self.finish_challenge(&title, reward, transition),
            ProgressEdge::Advanced { .. } => self.notify(
                NotificationType::Challenge,
                NotificationPriority::Low,
                "Progress Made! 📈",
                format!("You made progress on \"{}\". Keep going!", title),
                transition,
            ),
            ProgressEdge::Unchanged | ProgressEdge::Regressed { .. } => {}
        }
        Ok(())
    }

    pub(super) fn update_challenge_milestone(
        &mut self,
        challenge_id: &str,
        milestone_id: &str,
        progress: i64,
        transition: &mut Transition,
    ) -> Result<(), EngineError> {
        let now = self.clock.now();
        let challenge = self
            .state
            .challenges
            .iter_mut()
            .find(|c| c.id == challenge_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Challenge, challenge_id))?;

        if challenge.status == ProgressStatus::NotStarted {
            return Err(EngineError::NotActive {
                kind: EntityKind::Challenge,
                id: challenge_id.to_string(),
            });
        }

        let update = challenge
            .update_milestone(milestone_id, progress, now)
            .ok_or_else(|| EngineError::not_found(EntityKind::Milestone, milestone_id))?;
        let (title, reward) = (challenge.title.clone(), challenge.xp_reward);

        self.reward_milestone(&update, transition);
        if update.container_completed {
            self.finish_challenge(&title, reward, transition);
        }
        Ok(())
    }

    fn finish_challenge(&mut self, title: &str, reward: u64, transition: &mut Transition) {
        tracing::info!("Challenge completed: {}", title);
        self.apply_grant(reward, "Challenge Completed", 1.0, transition);
        self.notify(
            NotificationType::Achievement,
            NotificationPriority::High,
            "Challenge Completed! 🎉",
            format!("Congratulations! You completed \"{}\" and earned {} XP!", title, reward),
            transition,
        );
        self.roll_challenge_bonus(transition);
    }

    /// Pay a milestone's reward if this update completed it.
    fn reward_milestone(&mut self, update: &MilestoneUpdate, transition: &mut Transition) {
        if !update.edge.just_completed() {
            return;
        }
        let milestone = &update.milestone;
        self.apply_grant(milestone.xp_reward, "Milestone Completed", 1.0, transition);
        self.notify(
            NotificationType::Milestone,
            NotificationPriority::Medium,
            "Milestone Achieved! 🎯",
            format!("You completed \"{}\" and earned {} XP!", milestone.title, milestone.xp_reward),
            transition,
        );
    }

    pub(super) fn start_goal(&mut self, goal_id: &str, transition: &mut Transition) -> Result<(), EngineError> {
        let now = self.clock.now();
        let goal = self
            .state
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Goal, goal_id))?;

        if !goal.start(now) {
            return Err(EngineError::AlreadyStarted {
                kind: EntityKind::Goal,
                id: goal_id.to_string(),
            });
        }
        let title = goal.title.clone();

        self.apply_grant(GOAL_START_XP, "Goal Started", 1.0, transition);
        self.notify(
            NotificationType::Goal,
            NotificationPriority::Medium,
            "Goal Started! 🎯",
            format!("You've committed to \"{}\"", title),
            transition,
        );
        Ok(())
    }

    pub(super) fn pause_goal(&mut self, goal_id: &str) -> Result<(), EngineError> {
        let now = self.clock.now();
        let goal = self
            .state
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Goal, goal_id))?;

        if !goal.pause(now) {
            return Err(EngineError::InvalidGoal {
                id: goal_id.to_string(),
                reason: format!("cannot pause a goal in status {:?}", goal.status),
            });
        }
        Ok(())
    }

    pub(super) fn resume_goal(&mut self, goal_id: &str) -> Result<(), EngineError> {
        let now = self.clock.now();
        let goal = self
            .state
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Goal, goal_id))?;

        if !goal.resume(now) {
            return Err(EngineError::InvalidGoal {
                id: goal_id.to_string(),
                reason: "only paused goals can be resumed".to_string(),
            });
        }
        Ok(())
    }

    pub(super) fn set_goal_progress(
        &mut self,
        goal_id: &str,
        progress: i64,
        transition: &mut Transition,
    ) -> Result<(), EngineError> {
        let now = self.clock.now();
        let goal = self
            .state
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Goal, goal_id))?;

        if goal.is_milestone_driven() {
            return Err(EngineError::DerivedProgress {
                kind: EntityKind::Goal,
                id: goal_id.to_string(),
            });
        }
        if goal.is_completed() {
            return Ok(());
        }
        if !goal.status.accepts_progress() {
            return Err(EngineError::NotActive {
                kind: EntityKind::Goal,
                id: goal_id.to_string(),
            });
        }

        let edge = goal.set_progress(progress, now);
        let (title, reward) = (goal.title.clone(), goal.xp_reward);
        if edge.just_completed() {
            self.finish_goal(&title, reward, transition);
        }
        Ok(())
    }

    pub(super) fn update_goal_milestone(
        &mut self,
        goal_id: &str,
        milestone_id: &str,
        progress: i64,
        transition: &mut Transition,
    ) -> Result<(), EngineError> {
        let now = self.clock.now();
        let goal = self
            .state
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Goal, goal_id))?;

        if !goal.milestones.iter().any(|m| m.id == milestone_id) {
            return Err(EngineError::not_found(EntityKind::Milestone, milestone_id));
        }
        if goal.is_completed() {
            return Ok(());
        }
        if !goal.status.accepts_progress() {
            return Err(EngineError::NotActive {
                kind: EntityKind::Goal,
                id: goal_id.to_string(),
            });
        }

        let update = goal
            .update_milestone(milestone_id, progress, now)
            .ok_or_else(|| EngineError::not_found(EntityKind::Milestone, milestone_id))?;
        let (title, reward) = (goal.title.clone(), goal.xp_reward);

        self.reward_milestone(&update, transition);
        if update.container_completed {
            self.finish_goal(&title, reward, transition);
        }
        Ok(())
    }

    fn finish_goal(&mut self, title: &str, reward: u64, transition: &mut Transition) {
        tracing::info!("Goal completed: {}", title);
        self.apply_grant(reward, "Goal Completed", 1.0, transition);
        self.notify(
            NotificationType::Goal,
            NotificationPriority::High,
            "Goal Achieved! 🏆",
            format!("You achieved \"{}\" and earned {} XP!", title, reward),
            transition,
        );
    }

    /// Mark every active goal past its deadline as overdue.
    pub(super) fn sweep_overdue_goals(&mut self, transition: &mut Transition) {
        let now = self.clock.now();
        let overdue: Vec<String> = self
            .state
            .goals
            .iter_mut()
            .filter_map(|goal| goal.mark_overdue(now).then(|| goal.title.clone()))
            .collect();

        for title in overdue {
            tracing::info!("Goal overdue: {}", title);
            self.notify(
                NotificationType::Goal,
                NotificationPriority::High,
                "Goal Overdue ⏰",
                format!("\"{}\" passed its deadline", title),
                transition,
            );
        }
    }
}
