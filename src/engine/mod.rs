//! Progression engine.
//!
//! `QuestEngine` owns the player's state and applies one command at a time.
//! Every command either fails with an [`EngineError`] and changes nothing, or
//! succeeds and returns a [`Transition`] describing what happened: XP grants,
//! notifications and celebration flags for the UI.
//!
//! Time and randomness are injected so expiry and reward rolls can be driven
//! deterministically.

mod activities;
pub mod clock;
pub mod random;
mod trackers;
pub mod types;

use chrono::Duration;

use crate::badges::unlock_eligible;
use crate::notifications::{Notification, NotificationCenter, NotificationPriority, NotificationType};
use crate::progression::{ChallengeBonus, LuckyReward, RewardEffect};
use crate::quests::generate_daily_missions;
use crate::storage::config::EngineConfig;

pub use clock::{Clock, ManualClock, SystemClock};
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use types::{
    Command, EngineError, EntityKind, QuestState, ThemeState, Transition, XpGrant, DEFAULT_THEME,
};

/// The single-writer state container.
pub struct QuestEngine {
    state: QuestState,
    notifications: NotificationCenter,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    lucky_reward_chance: f64,
    challenge_bonus_chance: f64,
}

impl QuestEngine {
    /// Start a new player from the built-in templates.
    pub fn new(
        player_name: &str,
        config: &EngineConfig,
        clock: Box<dyn Clock>,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let now = clock.now();
        let mut state = QuestState::new(player_name, now);
        state.daily_missions = generate_daily_missions(rng.as_mut(), now);
        Self::with_state(state, config, clock, rng)
    }

    /// Resume from a previously saved state.
    pub fn with_state(
        state: QuestState,
        config: &EngineConfig,
        clock: Box<dyn Clock>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            state,
            notifications: NotificationCenter::new(config.notification_capacity),
            clock,
            rng,
            lucky_reward_chance: config.lucky_reward_chance,
            challenge_bonus_chance: config.challenge_bonus_chance,
        }
    }

    pub fn state(&self) -> &QuestState {
        &self.state
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Copy of the state for persistence.
    pub fn snapshot(&self) -> QuestState {
        self.state.clone()
    }

    /// Apply one command.
    ///
    /// The bonus expiry check runs first on every command, so a stale
    /// multiplier never applies to a grant. If the command is rejected the
    /// expiry is rolled back too, and the next accepted command reports it.
    pub fn dispatch(&mut self, command: Command) -> Result<Transition, EngineError> {
        let before = self.state.progression.clone();
        let mut transition = Transition {
            bonus_expired: self.expire_bonus(),
            ..Default::default()
        };

        if let Err(e) = self.apply(command, &mut transition) {
            self.state.progression = before;
            return Err(e);
        }

        transition.confetti = transition.celebrate_level_up || transition.celebrate_badge;
        Ok(transition)
    }

    fn apply(&mut self, command: Command, transition: &mut Transition) -> Result<(), EngineError> {
        match command {
            Command::GrantXp {
                amount,
                source,
                multiplier,
            } => self.grant_xp(amount, &source, multiplier, transition)?,
            Command::ActivateBonus {
                multiplier,
                duration_hours,
            } => self.activate_bonus(multiplier, duration_hours)?,
            Command::CheckBonusExpiry => {}
            Command::AddTask(task) => self.add_task(task)?,
            Command::RemoveTask { task_id } => self.remove_task(&task_id)?,
            Command::CompleteTask { task_id } => self.complete_task(&task_id, transition)?,
            Command::StartChallenge { challenge_id } => {
                self.start_challenge(&challenge_id, transition)?
            }
            Command::AdvanceChallenge {
                challenge_id,
                delta,
            } => self.advance_challenge(&challenge_id, delta, transition)?,
            Command::UpdateChallengeMilestone {
                challenge_id,
                milestone_id,
                progress,
            } => self.update_challenge_milestone(&challenge_id, &milestone_id, progress, transition)?,
            Command::StartGoal { goal_id } => self.start_goal(&goal_id, transition)?,
            Command::PauseGoal { goal_id } => self.pause_goal(&goal_id)?,
            Command::ResumeGoal { goal_id } => self.resume_goal(&goal_id)?,
            Command::SetGoalProgress { goal_id, progress } => {
                self.set_goal_progress(&goal_id, progress, transition)?
            }
            Command::UpdateGoalMilestone {
                goal_id,
                milestone_id,
                progress,
            } => self.update_goal_milestone(&goal_id, &milestone_id, progress, transition)?,
            Command::SweepOverdueGoals => self.sweep_overdue_goals(transition),
            Command::RefreshDailyMissions => self.refresh_daily_missions(),
            Command::CompleteMission { mission_id } => {
                self.complete_mission(&mission_id, transition)?
            }
            Command::CompleteSideQuest { quest_id } => {
                self.complete_side_quest(&quest_id, transition)?
            }
            Command::UnlockSkill { skill_id } => self.unlock_skill(&skill_id, transition)?,
            Command::PracticeSkill {
                skill_id,
                activity_id,
            } => self.practice_skill(&skill_id, &activity_id, transition)?,
            Command::SolveProblem(problem) => self.solve_problem(problem, transition)?,
            Command::ToggleDarkMode => self.state.themes.dark_mode = !self.state.themes.dark_mode,
            Command::UnlockTheme { theme } => self.unlock_theme(&theme),
            Command::ChangeTheme { theme } => self.change_theme(&theme)?,
            Command::MarkNotificationRead { id } => {
                if !self.notifications.mark_read(id) {
                    return Err(EngineError::not_found(EntityKind::Notification, &id.to_string()));
                }
            }
            Command::MarkAllNotificationsRead => self.notifications.mark_all_read(),
            Command::RemoveNotification { id } => {
                if !self.notifications.remove(id) {
                    return Err(EngineError::not_found(EntityKind::Notification, &id.to_string()));
                }
            }
            Command::SyncBadges => self.sync_badges(transition),
        }
        Ok(())
    }

    fn grant_xp(
        &mut self,
        amount: i64,
        source: &str,
        multiplier: f64,
        transition: &mut Transition,
    ) -> Result<(), EngineError> {
        if amount < 0 {
            return Err(EngineError::InvalidXpAmount(amount));
        }
        validate_multiplier(multiplier)?;
        self.apply_grant(amount as u64, source, multiplier, transition);
        Ok(())
    }

    /// Add XP and run the level, badge and lucky-reward side effects.
    ///
    /// A grant worth 0 effective XP does nothing at all.
    fn apply_grant(&mut self, amount: u64, source: &str, multiplier: f64, transition: &mut Transition) {
        let scaled = amount as f64 * multiplier * self.state.progression.xp_multiplier;
        let effective_xp = if scaled.is_finite() && scaled > 0.0 {
            scaled.floor() as u64
        } else {
            0
        };
        if effective_xp == 0 {
            return;
        }

        let previous_level = self.state.progression.add_effective_xp(effective_xp);
        let new_level = self.state.progression.current_level;
        let now = self.clock.now();

        self.notify(
            NotificationType::Achievement,
            NotificationPriority::Medium,
            format!("+{} XP Earned! ⚡", effective_xp),
            format!("From: {}", source),
            transition,
        );

        if new_level > previous_level {
            tracing::info!("Level up: {} -> {} ({})", previous_level, new_level, source);
            self.notify(
                NotificationType::LevelUp,
                NotificationPriority::High,
                "Level Up! 🎉",
                format!("Congratulations! You've reached Level {}!", new_level),
                transition,
            );
            transition.celebrate_level_up = true;
        }

        let badges_unlocked = unlock_eligible(
            &mut self.state.badges,
            self.state.progression.total_xp_earned,
            now,
        );
        for badge in &badges_unlocked {
            self.notify(
                NotificationType::Badge,
                NotificationPriority::High,
                "Badge Unlocked! 🏆",
                format!("You earned the \"{}\" badge!", badge.name),
                transition,
            );
        }
        if !badges_unlocked.is_empty() {
            transition.celebrate_badge = true;
        }

        let lucky_reward = self.roll_lucky_reward(transition);

        transition.grants.push(XpGrant {
            source: source.to_string(),
            base_amount: amount,
            effective_xp,
            previous_level,
            new_level,
            badges_unlocked,
            lucky_reward,
        });
    }

    fn roll_lucky_reward(&mut self, transition: &mut Transition) -> Option<LuckyReward> {
        if !self.rng.chance(self.lucky_reward_chance) {
            return None;
        }
        let pool = LuckyReward::POOL;
        let reward = pool[self.rng.pick(pool.len()) % pool.len()];

        tracing::debug!("Lucky reward rolled: {:?}", reward);
        self.notify(
            NotificationType::Reward,
            NotificationPriority::High,
            "Lucky Reward! 🎰",
            reward.message(),
            transition,
        );
        self.state.push_reward(reward.message());
        self.apply_reward_effect(reward.effect());
        Some(reward)
    }

    /// Roll the challenge-completion bonus.
    fn roll_challenge_bonus(&mut self, transition: &mut Transition) {
        if !self.rng.chance(self.challenge_bonus_chance) {
            return;
        }
        let pool = ChallengeBonus::POOL;
        let bonus = pool[self.rng.pick(pool.len()) % pool.len()];

        self.notify(
            NotificationType::Reward,
            NotificationPriority::High,
            "Bonus Reward! 🎰",
            bonus.message(),
            transition,
        );
        self.state.push_reward(bonus.message());
        self.apply_reward_effect(bonus.effect());
        transition.challenge_bonus = Some(bonus);
    }

    fn apply_reward_effect(&mut self, effect: RewardEffect) {
        match effect {
            RewardEffect::Flavor => {}
            RewardEffect::BonusMultiplier {
                multiplier,
                duration_hours,
            } => {
                // Pool values are always valid
                let _ = self.activate_bonus(multiplier, duration_hours);
            }
            RewardEffect::UnlockTheme(theme) => self.unlock_theme(theme),
        }
    }

    /// Start a temporary XP multiplier.
    fn activate_bonus(&mut self, multiplier: f64, duration_hours: f64) -> Result<(), EngineError> {
        validate_multiplier(multiplier)?;
        if !duration_hours.is_finite() || duration_hours < 0.0 {
            return Err(EngineError::InvalidDuration(duration_hours));
        }

        let duration = Duration::milliseconds((duration_hours * 3_600_000.0).round() as i64);
        let expiry = self.clock.now() + duration;
        self.state.progression.activate_bonus(multiplier, expiry);
        tracing::info!("Bonus XP x{} active until {}", multiplier, expiry);
        Ok(())
    }

    /// Deactivate the bonus if it has run out. Safe to call at any time.
    pub fn expire_bonus(&mut self) -> bool {
        let expired = self.state.progression.expire_bonus(self.clock.now());
        if expired {
            tracing::info!("Bonus XP expired");
        }
        expired
    }

    /// Unlock every badge the current lifetime total already covers.
    ///
    /// Used after rehydrating a saved state; grants nothing.
    fn sync_badges(&mut self, transition: &mut Transition) {
        let now = self.clock.now();
        let unlocked = unlock_eligible(
            &mut self.state.badges,
            self.state.progression.total_xp_earned,
            now,
        );
        for badge in &unlocked {
            self.notify(
                NotificationType::Badge,
                NotificationPriority::High,
                "Badge Unlocked! 🏆",
                format!("You earned the \"{}\" badge!", badge.name),
                transition,
            );
        }
        if !unlocked.is_empty() {
            transition.celebrate_badge = true;
        }
    }

    fn unlock_theme(&mut self, theme: &str) {
        if self.state.themes.unlock(theme) {
            tracing::info!("Theme unlocked: {}", theme);
        }
    }

    fn change_theme(&mut self, theme: &str) -> Result<(), EngineError> {
        if !self.state.themes.is_unlocked(theme) {
            return Err(EngineError::ThemeLocked(theme.to_string()));
        }
        self.state.themes.active_theme = theme.to_string();
        Ok(())
    }

    /// Create a notification, store it and record it on the transition.
    fn notify(
        &mut self,
        kind: NotificationType,
        priority: NotificationPriority,
        title: impl Into<String>,
        message: impl Into<String>,
        transition: &mut Transition,
    ) {
        let notification = Notification::new(kind, priority, title, message, self.clock.now());
        transition.notifications.push(notification.clone());
        self.notifications.push(notification);
    }
}

fn validate_multiplier(multiplier: f64) -> Result<(), EngineError> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidMultiplier(multiplier))
    }
}
