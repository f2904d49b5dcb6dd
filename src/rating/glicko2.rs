//! Glicko-2 rating system implementation
//!
//! Ratings are kept on the public 1500-centered scale. Each update converts to
//! the internal Glicko-2 scale (μ, φ), folds in one rating period of results
//! and converts back, following Glickman's "Example of the Glicko-2 system".

use crate::config::Glicko2Config;
use crate::error::{RatingError, Result};
use crate::rating::system::RatingSystem;
use crate::rating::volatility::{solve_volatility, SolverSettings, VolatilityInputs};
use crate::types::{Glicko2Observation, Glicko2Rating};
use crate::utils::{ensure_finite, ensure_positive, logistic, validate_score};
use std::f64::consts::PI;
use tracing::debug;

/// Ratio between the public and the internal Glicko-2 scale
pub const GLICKO2_SCALE: f64 = 173.7178;

/// Public rating that maps to μ = 0
pub const GLICKO2_CENTER: f64 = 1500.0;

/// Convert a public (rating, deviation) pair to internal (μ, φ)
pub fn to_glicko2_scale(rating: f64, deviation: f64) -> (f64, f64) {
    (
        (rating - GLICKO2_CENTER) / GLICKO2_SCALE,
        deviation / GLICKO2_SCALE,
    )
}

/// Convert internal (μ, φ) back to a public (rating, deviation) pair
pub fn from_glicko2_scale(mu: f64, phi: f64) -> (f64, f64) {
    (mu * GLICKO2_SCALE + GLICKO2_CENTER, phi * GLICKO2_SCALE)
}

/// Weight applied to results against an opponent with deviation φ
fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

fn expected_score(mu: f64, mu_j: f64, phi_j: f64) -> f64 {
    logistic(g(phi_j) * (mu - mu_j))
}

/// Glicko-2 rating calculator implementation
#[derive(Debug, Clone)]
pub struct Glicko2RatingSystem {
    config: Glicko2Config,
    initial: Glicko2Rating,
}

impl Glicko2RatingSystem {
    /// Create a new Glicko-2 rating system
    pub fn new(config: Glicko2Config) -> Result<Self> {
        config.validate()?;
        let initial = Glicko2Rating::new(
            config.default_rating,
            config.default_deviation,
            config.default_volatility,
        )?;

        Ok(Self { config, initial })
    }

    pub fn config(&self) -> &Glicko2Config {
        &self.config
    }

    /// Widen the deviation for `periods` rating periods without results.
    ///
    /// Equivalent to calling `calculate_rating` with no observations
    /// `periods` times, except that the deviation bounds are applied once.
    pub fn inactivity_decay(
        &self,
        current: &Glicko2Rating,
        periods: u32,
    ) -> Result<Glicko2Rating> {
        let (_, phi) = to_glicko2_scale(current.rating(), current.deviation());
        let sigma = current.volatility();
        let phi_star = (phi * phi + f64::from(periods) * sigma * sigma).sqrt();
        let (_, deviation) = from_glicko2_scale(0.0, phi_star);

        Glicko2Rating::new(current.rating(), self.bound_deviation(deviation)?, sigma)
    }

    fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            tau: self.config.tau,
            tolerance: self.config.convergence_tolerance,
            max_iterations: self.config.max_iterations,
        }
    }

    fn bound_deviation(&self, deviation: f64) -> Result<f64> {
        if !deviation.is_finite() {
            return Err(RatingError::convergence(format!(
                "updated deviation {} is not finite",
                deviation
            ))
            .into());
        }

        let bounded = deviation.clamp(self.config.min_deviation, self.config.max_deviation);
        if bounded != deviation {
            debug!(deviation, bounded, "Deviation clamped to configured bounds");
        }
        Ok(bounded)
    }

    fn validate(observations: &[Glicko2Observation]) -> Result<()> {
        for observation in observations {
            ensure_finite("opponent rating", observation.rating)?;
            ensure_positive("opponent rating deviation", observation.deviation)?;
            validate_score(observation.score)?;
        }
        Ok(())
    }
}

impl RatingSystem for Glicko2RatingSystem {
    type Rating = Glicko2Rating;
    type Observation = Glicko2Observation;

    /// Uses the combined deviation of both sides, so swapping the arguments
    /// gives the complementary probability.
    fn expected_outcome(&self, a: &Glicko2Rating, b: &Glicko2Rating) -> f64 {
        let (mu_a, phi_a) = to_glicko2_scale(a.rating(), a.deviation());
        let (mu_b, phi_b) = to_glicko2_scale(b.rating(), b.deviation());
        let combined = (phi_a * phi_a + phi_b * phi_b).sqrt();

        expected_score(mu_a, mu_b, combined)
    }

    fn calculate_rating(
        &self,
        current: &Glicko2Rating,
        observations: &[Glicko2Observation],
    ) -> Result<Glicko2Rating> {
        Self::validate(observations)?;

        if observations.is_empty() {
            return self.inactivity_decay(current, 1);
        }

        let (mu, phi) = to_glicko2_scale(current.rating(), current.deviation());
        let sigma = current.volatility();

        // Steps 3 and 4: variance and summed surprise, in the order supplied
        let mut variance_inv = 0.0;
        let mut surprise = 0.0;
        for observation in observations {
            let (mu_j, phi_j) = to_glicko2_scale(observation.rating, observation.deviation);
            let g_j = g(phi_j);
            let e_j = expected_score(mu, mu_j, phi_j);

            variance_inv += g_j * g_j * e_j * (1.0 - e_j);
            surprise += g_j * (observation.score - e_j);
        }

        if !(variance_inv > 0.0 && variance_inv.is_finite()) {
            return Err(RatingError::convergence(
                "performance variance is degenerate for this rating period",
            )
            .into());
        }

        let variance = 1.0 / variance_inv;
        let delta = variance * surprise;

        // Step 5
        let sigma_new = solve_volatility(
            VolatilityInputs {
                delta,
                phi,
                variance,
                sigma,
            },
            &self.solver_settings(),
        )?;

        // Steps 6 and 7
        let phi_star = (phi * phi + sigma_new * sigma_new).sqrt();
        let phi_new = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / variance).sqrt();
        let mu_new = mu + phi_new * phi_new * surprise;

        // Step 8
        let (rating, deviation) = from_glicko2_scale(mu_new, phi_new);
        if !rating.is_finite() {
            return Err(RatingError::convergence(format!(
                "updated rating {} is not finite",
                rating
            ))
            .into());
        }

        let updated = Glicko2Rating::new(rating, self.bound_deviation(deviation)?, sigma_new)?;
        debug!(
            games = observations.len(),
            rating = updated.rating(),
            deviation = updated.deviation(),
            volatility = updated.volatility(),
            "Glicko-2 rating period processed"
        );

        Ok(updated)
    }

    fn default_rating(&self) -> Glicko2Rating {
        self.initial
    }

    fn display_name(&self) -> String {
        format!("Glicko-2 (τ={})", self.config.tau)
    }
}
