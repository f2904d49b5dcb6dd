//! Glicko-2 rating system configuration

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};

/// Parameters fixed at construction of a Glicko-2 engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Glicko2Config {
    /// System constant constraining volatility change, typically 0.3 to 1.2
    pub tau: f64,
    pub default_rating: f64,
    /// Deviation of a participant who has never played
    pub default_deviation: f64,
    pub default_volatility: f64,
    /// Floor applied to every output deviation
    pub min_deviation: f64,
    /// Ceiling applied to every output deviation
    pub max_deviation: f64,
    /// Width of the log-volatility bracket at which the solver stops
    pub convergence_tolerance: f64,
    /// Cap on solver function evaluations, bracket search included
    pub max_iterations: usize,
}

impl Default for Glicko2Config {
    fn default() -> Self {
        Self {
            tau: 0.5,
            default_rating: 1500.0,
            default_deviation: 350.0,
            default_volatility: 0.06,
            min_deviation: 30.0,
            max_deviation: 350.0,
            convergence_tolerance: 0.000_001,
            max_iterations: 100,
        }
    }
}

impl Glicko2Config {
    /// Config with a custom system constant
    pub fn with_tau(tau: f64) -> Self {
        Self {
            tau,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.tau.is_finite() && self.tau > 0.0) {
            return Err(RatingError::configuration("Tau must be positive").into());
        }

        if !self.default_rating.is_finite() {
            return Err(RatingError::configuration("Default rating must be finite").into());
        }

        if !(self.min_deviation.is_finite() && self.min_deviation > 0.0) {
            return Err(RatingError::configuration("Minimum deviation must be positive").into());
        }

        if !(self.max_deviation.is_finite() && self.max_deviation >= self.min_deviation) {
            return Err(RatingError::configuration(
                "Maximum deviation must be finite and at least the minimum deviation",
            )
            .into());
        }

        if !(self.min_deviation..=self.max_deviation).contains(&self.default_deviation) {
            return Err(RatingError::configuration(format!(
                "Default deviation {} must lie within [{}, {}]",
                self.default_deviation, self.min_deviation, self.max_deviation
            ))
            .into());
        }

        if !(self.default_volatility.is_finite() && self.default_volatility > 0.0) {
            return Err(RatingError::configuration("Default volatility must be positive").into());
        }

        if !(self.convergence_tolerance.is_finite() && self.convergence_tolerance > 0.0) {
            return Err(
                RatingError::configuration("Convergence tolerance must be positive").into(),
            );
        }

        if self.max_iterations == 0 {
            return Err(RatingError::configuration("Iteration cap must be at least 1").into());
        }

        Ok(())
    }
}
