//! Storage module for configuration and the local progress mirror.

pub mod config;
pub mod database;
pub mod progress_store;
pub mod schema;
pub mod sync;

pub use config::{AppConfig, EngineConfig, IntegrationSettings, ProfileSettings, StorageSettings};
pub use database::{Database, DatabaseError};
pub use progress_store::{ProfileRecord, ProgressStore};
pub use sync::{PersistenceWorker, SyncReport};
