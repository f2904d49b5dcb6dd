//! Elo rating system implementation
//!
//! Classic logistic expected score with a linear update. All results of a
//! rating period are scored against the rating held at the start of the
//! period and applied as one summed change.

use crate::config::EloConfig;
use crate::error::Result;
use crate::rating::system::RatingSystem;
use crate::types::{EloObservation, EloRating};
use crate::utils::{ensure_finite, validate_score};
use tracing::debug;

/// Elo rating calculator implementation
#[derive(Debug, Clone)]
pub struct EloRatingSystem {
    config: EloConfig,
}

impl EloRatingSystem {
    /// Create a new Elo rating system
    pub fn new(config: EloConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &EloConfig {
        &self.config
    }

    /// Rating change from a single match, without applying it
    pub fn rating_change(&self, rating: f64, opponent: f64, score: f64) -> Result<f64> {
        ensure_finite("rating", rating)?;
        ensure_finite("opponent rating", opponent)?;
        validate_score(score)?;

        Ok(self.config.k_factor * (score - self.expected_score(rating, opponent)))
    }

    fn expected_score(&self, rating: f64, opponent: f64) -> f64 {
        1.0 / (1.0 + 10f64.powf((opponent - rating) / self.config.scale))
    }
}

impl RatingSystem for EloRatingSystem {
    type Rating = EloRating;
    type Observation = EloObservation;

    fn expected_outcome(&self, a: &EloRating, b: &EloRating) -> f64 {
        self.expected_score(a.rating, b.rating)
    }

    fn calculate_rating(
        &self,
        current: &EloRating,
        observations: &[EloObservation],
    ) -> Result<EloRating> {
        ensure_finite("rating", current.rating)?;
        for observation in observations {
            ensure_finite("opponent rating", observation.opponent.rating)?;
            validate_score(observation.score)?;
        }

        if observations.is_empty() {
            return Ok(*current);
        }

        let delta: f64 = observations
            .iter()
            .map(|o| {
                self.config.k_factor
                    * (o.score - self.expected_score(current.rating, o.opponent.rating))
            })
            .sum();

        debug!(
            games = observations.len(),
            delta, "Elo rating period processed"
        );

        Ok(EloRating::new(current.rating + delta))
    }

    fn default_rating(&self) -> EloRating {
        EloRating::new(self.config.default_rating)
    }

    fn display_name(&self) -> String {
        format!("Elo (K={})", self.config.k_factor)
    }
}
