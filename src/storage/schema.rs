//! Database schema definitions for CareerQuest.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Player profile (single row)
CREATE TABLE IF NOT EXISTS profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    name TEXT NOT NULL,
    level INTEGER NOT NULL DEFAULT 1,
    xp INTEGER NOT NULL DEFAULT 0,
    total_xp INTEGER NOT NULL DEFAULT 0,
    tier TEXT NOT NULL DEFAULT 'bronze',
    streak INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL
);

-- Career stat aggregates (single row)
CREATE TABLE IF NOT EXISTS career_stats (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    knowledge INTEGER NOT NULL DEFAULT 0,
    mindset INTEGER NOT NULL DEFAULT 0,
    communication INTEGER NOT NULL DEFAULT 0,
    portfolio INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL
);

-- Full progression state (single row)
CREATE TABLE IF NOT EXISTS progression (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    state_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Unlocked badges
CREATE TABLE IF NOT EXISTS badges (
    id TEXT PRIMARY KEY,
    unlocked_at TEXT NOT NULL
);

-- Tasks
CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    completed INTEGER NOT NULL DEFAULT 0,
    record_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Challenges
CREATE TABLE IF NOT EXISTS challenges (
    id TEXT PRIMARY KEY,
    status TEXT NOT NULL,
    record_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Goals
CREATE TABLE IF NOT EXISTS goals (
    id TEXT PRIMARY KEY,
    status TEXT NOT NULL,
    record_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tasks_completed ON tasks(completed);
"#;

/// Schema version table
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 2;

/// SQL for migration from v1 to v2 (whole-state snapshot for rehydration)
pub const MIGRATION_V1_TO_V2: &str = r#"
CREATE TABLE IF NOT EXISTS game_state (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    state_json TEXT NOT NULL,
    saved_at TEXT NOT NULL
);
"#;

/// Migrations in the order they apply, keyed by the version they produce.
pub const MIGRATIONS: [(i32, &str); 2] = [(1, SCHEMA), (2, MIGRATION_V1_TO_V2)];
