//! Configuration loaded from TOML, overridden by command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use noughts_core::Difficulty;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "noughts.toml";

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct NoughtsConfig {
    /// Opponent tier at startup.
    #[serde(default)]
    difficulty: Difficulty,

    /// Pause before the opponent replies, in milliseconds. Zero is allowed.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Profile whose statistics are recorded.
    #[serde(default = "default_profile")]
    profile: String,

    /// JSON file holding per-profile statistics.
    #[serde(default = "default_stats_path")]
    stats_path: PathBuf,

    /// Log file written while the terminal UI is running.
    #[serde(default = "default_log_path")]
    log_path: PathBuf,
}

#[instrument]
fn default_opponent_delay_ms() -> u64 {
    900
}

#[instrument]
fn default_profile() -> String {
    "player".to_string()
}

#[instrument]
fn default_stats_path() -> PathBuf {
    PathBuf::from("noughts_stats.json")
}

#[instrument]
fn default_log_path() -> PathBuf {
    PathBuf::from("noughts.log")
}

impl Default for NoughtsConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            opponent_delay_ms: default_opponent_delay_ms(),
            profile: default_profile(),
            stats_path: default_stats_path(),
            log_path: default_log_path(),
        }
    }
}

impl NoughtsConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(profile = %config.profile, difficulty = %config.difficulty, "Config loaded");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads `path` when one is given, which must exist. Without a path the
    /// default file is read if present.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load_or_default(DEFAULT_CONFIG_PATH),
        }
    }

    /// Pause before the opponent replies.
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Rejects values the session cannot use.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.profile.trim().is_empty() {
            return Err(ConfigError::new("Profile name must not be empty"));
        }
        if self.opponent_delay_ms > 10_000 {
            return Err(ConfigError::new(format!(
                "Opponent delay {}ms exceeds 10000ms",
                self.opponent_delay_ms
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
