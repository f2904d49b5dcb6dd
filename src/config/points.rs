//! Points-based ranking configuration

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    /// Starting points for new participants
    pub default_points: f64,
    /// Blend between total points (0.0) and recent form (1.0) in predictions
    pub history_weight: f64,
    /// Points awarded per finishing position, 1st place first. When set, earned
    /// values are read as 1-based ranks.
    pub rank_points: Option<Vec<f64>>,
    /// Number of recent events used for form and trend
    pub trend_window: usize,
    /// Earned values strictly above this threshold receive `bonus_points`
    pub bonus_threshold: Option<f64>,
    pub bonus_points: f64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            default_points: 0.0,
            history_weight: 0.0,
            rank_points: None,
            trend_window: 3,
            bonus_threshold: None,
            bonus_points: 0.0,
        }
    }
}

impl PointsConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.default_points.is_finite() {
            return Err(RatingError::configuration("Default points must be finite").into());
        }

        if !(0.0..=1.0).contains(&self.history_weight) {
            return Err(RatingError::configuration("History weight must lie within [0, 1]").into());
        }

        if self.trend_window == 0 {
            return Err(RatingError::configuration("Trend window must be at least 1").into());
        }

        if let Some(table) = &self.rank_points {
            if table.iter().any(|p| !p.is_finite()) {
                return Err(RatingError::configuration("Rank points must be finite").into());
            }
        }

        if !self.bonus_points.is_finite() {
            return Err(RatingError::configuration("Bonus points must be finite").into());
        }

        Ok(())
    }
}
