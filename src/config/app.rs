//! Main application configuration
//!
//! This module defines the top-level configuration for the rating systems,
//! including environment variable overrides, TOML file loading and validation.

use crate::config::{EloConfig, Glicko2Config, PointsConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub elo: EloConfig,
    pub glicko2: Glicko2Config,
    pub points: PointsConfig,
}

/// Settings that are not tied to one rating system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Registry name of the rating system used when none is requested
    pub default_system: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            default_system: "glicko2".to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, target: &mut T) -> Result<()> {
    if let Ok(raw) = env::var(name) {
        *target = raw
            .parse()
            .map_err(|_| anyhow!("Invalid {} value: {}", name, raw))?;
    }
    Ok(())
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides.
    /// Sections and keys missing from the file keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        parse_var("RATINGS_LOG_LEVEL", &mut self.service.log_level)?;
        parse_var("RATINGS_DEFAULT_SYSTEM", &mut self.service.default_system)?;

        // Elo settings
        parse_var("ELO_K_FACTOR", &mut self.elo.k_factor)?;
        parse_var("ELO_DEFAULT_RATING", &mut self.elo.default_rating)?;

        // Glicko-2 settings
        parse_var("GLICKO2_TAU", &mut self.glicko2.tau)?;
        parse_var("GLICKO2_MIN_DEVIATION", &mut self.glicko2.min_deviation)?;
        parse_var("GLICKO2_MAX_DEVIATION", &mut self.glicko2.max_deviation)?;
        parse_var(
            "GLICKO2_CONVERGENCE_TOLERANCE",
            &mut self.glicko2.convergence_tolerance,
        )?;
        parse_var("GLICKO2_MAX_ITERATIONS", &mut self.glicko2.max_iterations)?;

        // Points settings
        parse_var("POINTS_DEFAULT", &mut self.points.default_points)?;
        parse_var("POINTS_HISTORY_WEIGHT", &mut self.points.history_weight)?;

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.default_system.is_empty() {
        return Err(anyhow!("Default rating system cannot be empty"));
    }

    config.elo.validate().context("Invalid [elo] section")?;
    config.glicko2.validate().context("Invalid [glicko2] section")?;
    config.points.validate().context("Invalid [points] section")?;

    Ok(())
}
