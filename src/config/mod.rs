//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calculate::DEFAULT_MIN_GAMES_FOR_RANK;
use crate::models::RankPolicy;
use crate::rotation::SquadRules;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Ranking and selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ranking policy name, e.g. "winRatio" or "goalsPerGame"
    #[serde(default = "default_policy")]
    pub policy: String,

    /// Months of history folded into the stats
    #[serde(default = "default_window_months")]
    pub window_months: usize,

    /// Players at or below this many games get the new-player default
    #[serde(default = "default_min_games")]
    pub min_games_for_rank: u32,

    /// Fixed RNG seed; entropy is used when absent
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub squad: SquadRules,
}

fn default_policy() -> String {
    RankPolicy::default().name().to_string()
}

fn default_window_months() -> usize {
    3
}

fn default_min_games() -> u32 {
    DEFAULT_MIN_GAMES_FOR_RANK
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            window_months: default_window_months(),
            min_games_for_rank: default_min_games(),
            seed: None,
            squad: SquadRules::default(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine
            .policy
            .parse::<RankPolicy>()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.engine.window_months == 0 {
            return Err(ConfigError::ValidationError(
                "History window must be at least 1 month".to_string(),
            ));
        }

        self.engine
            .squad
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(())
    }
}
