//! Elo rating system configuration

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};

/// Parameters fixed at construction of an Elo engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EloConfig {
    /// Maximum rating change from a single game
    pub k_factor: f64,
    /// Rating handed to participants who have never played
    pub default_rating: f64,
    /// Rating difference at which the favourite is expected to score 10:1
    pub scale: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            default_rating: 1500.0,
            scale: 400.0,
        }
    }
}

impl EloConfig {
    /// Config with a custom K-factor and the standard scale
    pub fn with_k_factor(k_factor: f64) -> Self {
        Self {
            k_factor,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.k_factor.is_finite() && self.k_factor > 0.0) {
            return Err(RatingError::configuration("K-factor must be positive").into());
        }

        if !self.default_rating.is_finite() {
            return Err(RatingError::configuration("Default rating must be finite").into());
        }

        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(RatingError::configuration("Rating scale must be positive").into());
        }

        Ok(())
    }
}
