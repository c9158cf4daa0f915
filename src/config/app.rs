//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! scrim-hall matchmaking service, including environment variable loading,
//! TOML file loading, and validation.

use crate::balance::PartitionStrategy;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub matchmaking: MatchmakingSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Matchmaking-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingSettings {
    /// Team partitioning strategy
    pub partition_strategy: PartitionStrategy,
    /// Roster size above which the exact strategy falls back to greedy
    pub exact_partition_limit: usize,
    /// Number of entries in the leaderboard view
    pub leaderboard_size: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "scrim-hall".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for MatchmakingSettings {
    fn default() -> Self {
        Self {
            partition_strategy: PartitionStrategy::Exact,
            exact_partition_limit: 16,
            leaderboard_size: 20,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(strategy) = env::var("PARTITION_STRATEGY") {
            config.matchmaking.partition_strategy = parse_strategy(&strategy)?;
        }
        if let Ok(limit) = env::var("EXACT_PARTITION_LIMIT") {
            config.matchmaking.exact_partition_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid EXACT_PARTITION_LIMIT value: {}", limit))?;
        }
        if let Ok(size) = env::var("LEADERBOARD_SIZE") {
            config.matchmaking.leaderboard_size = size
                .parse()
                .map_err(|_| anyhow!("Invalid LEADERBOARD_SIZE value: {}", size))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        validate_config(&config)?;
        Ok(config)
    }
}

fn parse_strategy(value: &str) -> Result<PartitionStrategy> {
    match value.to_lowercase().as_str() {
        "greedy" => Ok(PartitionStrategy::Greedy),
        "exact" => Ok(PartitionStrategy::Exact),
        _ => Err(anyhow!(
            "Invalid partition strategy: {} (use 'greedy' or 'exact')",
            value
        )),
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    if config.matchmaking.exact_partition_limit < 2 {
        return Err(anyhow!("Exact partition limit must be at least 2"));
    }

    if config.matchmaking.leaderboard_size == 0 {
        return Err(anyhow!("Leaderboard size must be greater than 0"));
    }

    Ok(())
}
