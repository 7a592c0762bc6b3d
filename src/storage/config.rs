//! Player profile and application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::notifications::DEFAULT_CAPACITY;
use crate::progression::rewards::{CHALLENGE_BONUS_CHANCE, LUCKY_REWARD_CHANCE};

/// Player identity and linked accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    /// Display name
    pub name: String,
    /// GitHub account used for repository stats
    pub github_username: Option<String>,
    /// LeetCode account used for problem stats
    pub leetcode_username: Option<String>,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            name: "Adventurer".to_string(),
            github_username: None,
            leetcode_username: None,
        }
    }
}

/// Tuning for the progression engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Notifications retained before the oldest are dropped
    pub notification_capacity: usize,
    /// Chance per XP grant of a lucky reward
    pub lucky_reward_chance: f64,
    /// Chance per challenge completion of a bonus reward
    pub challenge_bonus_chance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            notification_capacity: DEFAULT_CAPACITY,
            lucky_reward_chance: LUCKY_REWARD_CHANCE,
            challenge_bonus_chance: CHALLENGE_BONUS_CHANCE,
        }
    }
}

/// Third-party stats polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    /// Poll GitHub and LeetCode at all
    pub enabled: bool,
    /// Seconds between refreshes
    pub poll_interval_secs: u64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_secs: 300,
            request_timeout_secs: 10,
        }
    }
}

/// Local mirror settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Database file name inside the data directory
    pub database_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_file: "careerquest.db".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub profile: ProfileSettings,
    pub engine: EngineConfig,
    pub integrations: IntegrationSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            profile: ProfileSettings::default(),
            engine: EngineConfig::default(),
            integrations: IntegrationSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

impl AppConfig {
    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.database_file)
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "careerquest", "CareerQuest")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load configuration from a file; a missing file yields defaults.
///
/// `data_dir` is set to the file's parent directory.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let data_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    if !path.exists() {
        return Ok(AppConfig {
            data_dir,
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir;

    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to a file, creating parent directories.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
