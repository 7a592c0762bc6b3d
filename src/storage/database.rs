//! SQLite connection and schema migrations.

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

use crate::storage::schema::{CURRENT_VERSION, MIGRATIONS, SCHEMA_VERSION_TABLE};

/// Owner of the SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database file, creating it and its directory if needed.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }
        let conn = Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        Self::from_connection(conn)
    }

    /// Throwaway database, for tests.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn =
            Connection::open_in_memory().map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, DatabaseError> {
        conn.execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let db = Self { conn };
        let version = db.schema_version()?;
        if version < CURRENT_VERSION {
            db.migrate(version)?;
        }
        Ok(db)
    }

    /// Highest applied migration, 0 for a fresh file.
    pub fn schema_version(&self) -> Result<i32, DatabaseError> {
        self.conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| {
                row.get(0)
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Apply every migration newer than `from_version`, each in its own
    /// transaction together with its version row.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > from_version) {
            let tx = self
                .conn
                .unchecked_transaction()
                .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
            tx.execute_batch(sql)
                .and_then(|_| {
                    tx.execute(
                        "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
                        [version],
                    )
                })
                .map_err(|e| DatabaseError::MigrationFailed(format!("v{}: {}", version, e)))?;
            tx.commit()
                .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
            tracing::debug!("Applied schema migration v{}", version);
        }

        tracing::info!("Progress database at schema v{}", CURRENT_VERSION);
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Failures of the progress database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Cannot open progress database: {0}")]
    ConnectionFailed(String),

    #[error("Cannot create database directory: {0}")]
    IoError(String),

    #[error("Schema migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Cannot encode state: {0}")]
    SerializationError(String),

    #[error("Cannot decode saved state: {0}")]
    DeserializationError(String),
}
