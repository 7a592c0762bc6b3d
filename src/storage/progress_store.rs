//! Progress mirror: upserts of the player's state and rehydration.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::engine::QuestState;
use crate::progression::levels::{level_from_xp, xp_to_next_level};
use crate::storage::database::DatabaseError;

/// Store for the player's progress.
pub struct ProgressStore<'a> {
    conn: &'a Connection,
}

/// Profile row as written by [`ProgressStore::save`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub total_xp: u64,
    pub tier: String,
    pub streak: u32,
    pub updated_at: DateTime<Utc>,
}

impl<'a> ProgressStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Upsert every mirrored table from one snapshot, atomically.
    pub fn save(&self, state: &QuestState, at: DateTime<Utc>) -> Result<(), DatabaseError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        let now = at.to_rfc3339();
        let progression = &state.progression;

        tx.execute(
            "INSERT INTO profile (id, name, level, xp, total_xp, tier, streak, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name, level = excluded.level, xp = excluded.xp,
                total_xp = excluded.total_xp, tier = excluded.tier,
                streak = excluded.streak, updated_at = excluded.updated_at",
            params![
                state.player_name,
                progression.current_level,
                progression.current_xp as i64,
                progression.total_xp_earned as i64,
                progression.tier().display_name().to_lowercase(),
                state.coding.current_streak,
                now,
            ],
        )
        .map_err(query_failed)?;

        tx.execute(
            "INSERT INTO career_stats (id, knowledge, mindset, communication, portfolio, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                knowledge = excluded.knowledge, mindset = excluded.mindset,
                communication = excluded.communication, portfolio = excluded.portfolio,
                updated_at = excluded.updated_at",
            params![
                state.career.knowledge,
                state.career.mindset,
                state.career.communication,
                state.career.portfolio,
                now,
            ],
        )
        .map_err(query_failed)?;

        tx.execute(
            "INSERT INTO progression (id, state_json, updated_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET state_json = excluded.state_json, updated_at = excluded.updated_at",
            params![to_json(progression)?, now],
        )
        .map_err(query_failed)?;

        for badge in state.badges.iter().filter(|b| b.unlocked) {
            let unlocked_at = badge.unlocked_at.unwrap_or(at).to_rfc3339();
            tx.execute(
                "INSERT OR IGNORE INTO badges (id, unlocked_at) VALUES (?1, ?2)",
                params![badge.id, unlocked_at],
            )
            .map_err(query_failed)?;
        }

        tx.execute("DELETE FROM tasks", []).map_err(query_failed)?;
        for task in &state.tasks {
            tx.execute(
                "INSERT INTO tasks (id, completed, record_json, updated_at) VALUES (?1, ?2, ?3, ?4)",
                params![task.id, task.completed, to_json(task)?, now],
            )
            .map_err(query_failed)?;
        }

        for challenge in &state.challenges {
            tx.execute(
                "INSERT INTO challenges (id, status, record_json, updated_at) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET status = excluded.status,
                    record_json = excluded.record_json, updated_at = excluded.updated_at",
                params![challenge.id, challenge.status.as_str(), to_json(challenge)?, now],
            )
            .map_err(query_failed)?;
        }

        for goal in &state.goals {
            tx.execute(
                "INSERT INTO goals (id, status, record_json, updated_at) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET status = excluded.status,
                    record_json = excluded.record_json, updated_at = excluded.updated_at",
                params![goal.id, format!("{:?}", goal.status).to_lowercase(), to_json(goal)?, now],
            )
            .map_err(query_failed)?;
        }

        tx.execute(
            "INSERT INTO game_state (id, state_json, saved_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET state_json = excluded.state_json, saved_at = excluded.saved_at",
            params![to_json(state)?, now],
        )
        .map_err(query_failed)?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::debug!("Saved progress for {}", state.player_name);
        Ok(())
    }

    /// Load the last saved state, if any.
    ///
    /// Derived progression fields are recomputed from `current_xp` when they
    /// disagree, and career stats are clamped into range.
    pub fn load(&self) -> Result<Option<QuestState>, DatabaseError> {
        let json: Option<String> = self
            .conn
            .query_row("SELECT state_json FROM game_state WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()
            .map_err(query_failed)?;

        let Some(json) = json else {
            return Ok(None);
        };

        let mut state: QuestState = serde_json::from_str(&json)
            .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;

        let progression = &mut state.progression;
        if !progression.is_consistent() {
            tracing::warn!("Saved progression was inconsistent; recomputing level");
            progression.current_level = level_from_xp(progression.current_xp);
            progression.xp_to_next_level =
                xp_to_next_level(progression.current_xp, progression.current_level);
        }
        state.career = state.career.clamped();

        Ok(Some(state))
    }

    /// Read the profile row.
    pub fn profile(&self) -> Result<Option<ProfileRecord>, DatabaseError> {
        let row: Option<(String, u32, i64, i64, String, u32, String)> = self
            .conn
            .query_row(
                "SELECT name, level, xp, total_xp, tier, streak, updated_at FROM profile WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                    ))
                },
            )
            .optional()
            .map_err(query_failed)?;

        row.map(|(name, level, xp, total_xp, tier, streak, updated)| -> Result<ProfileRecord, DatabaseError> {
            let updated_at = DateTime::parse_from_rfc3339(&updated)
                .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?
                .with_timezone(&Utc);
            Ok(ProfileRecord {
                name,
                level,
                xp: xp.max(0) as u64,
                total_xp: total_xp.max(0) as u64,
                tier,
                streak,
                updated_at,
            })
        })
        .transpose()
    }

    /// Ids of badges recorded as unlocked.
    pub fn unlocked_badge_ids(&self) -> Result<Vec<String>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM badges ORDER BY unlocked_at, id")
            .map_err(query_failed)?;

        let ids = stmt
            .query_map([], |row| row.get(0))
            .map_err(query_failed)?
            .collect::<Result<Vec<String>, _>>()
            .map_err(query_failed)?;

        Ok(ids)
    }

    /// Number of task rows.
    pub fn task_count(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
            .map_err(query_failed)?;
        Ok(count as usize)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::SerializationError(e.to_string()))
}

fn query_failed(e: rusqlite::Error) -> DatabaseError {
    DatabaseError::QueryFailed(e.to_string())
}
