//! Points-based ranking system
//!
//! Participants accumulate points across events instead of carrying a skill
//! estimate. Suitable for season-long competitions and fantasy leagues.

use crate::config::PointsConfig;
use crate::error::Result;
use crate::rating::system::RatingSystem;
use crate::types::{ParticipantId, PointsStanding};
use crate::utils::{ensure_finite, logistic};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Point difference that corresponds to e:1 odds
const POINTS_SCALE: f64 = 100.0;

/// Projection of a participant's end-of-season total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonProjection {
    pub projected: f64,
    /// Every remaining event repeats the worst result so far
    pub min: f64,
    /// Every remaining event repeats the best result so far
    pub max: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Direction of recent form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PointsRatingSystem {
    config: PointsConfig,
}

impl PointsRatingSystem {
    pub fn new(config: PointsConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &PointsConfig {
        &self.config
    }

    /// Points actually credited for one earned value
    fn credited(&self, earned: f64) -> f64 {
        let base = match &self.config.rank_points {
            Some(table) => {
                // Earned values are 1-based finishing positions
                (earned as i64)
                    .checked_sub(1)
                    .and_then(|index| usize::try_from(index).ok())
                    .and_then(|index| table.get(index).copied())
                    .unwrap_or(0.0)
            }
            None => earned,
        };

        match self.config.bonus_threshold {
            Some(threshold) if base > threshold => base + self.config.bonus_points,
            _ => base,
        }
    }

    fn blended(&self, standing: &PointsStanding) -> f64 {
        let weight = self.config.history_weight;
        let window = self.config.trend_window;

        let form = if standing.history.is_empty() {
            standing.total / 10.0
        } else {
            let start = standing.history.len().saturating_sub(window);
            let recent = &standing.history[start..];
            recent.iter().sum::<f64>() / recent.len() as f64
        };

        (1.0 - weight) * standing.total + weight * form * 10.0
    }

    /// Project the end-of-season total after `remaining_events` more events.
    ///
    /// `confidence` selects the z-score: 0.95 and 0.90 map to 1.96 and 1.645,
    /// anything else uses 2.576.
    pub fn project_season_finish(
        &self,
        standing: &PointsStanding,
        remaining_events: u32,
        confidence: f64,
    ) -> SeasonProjection {
        let history = &standing.history;
        let total = standing.total;

        if history.is_empty() {
            return SeasonProjection {
                projected: total,
                min: total,
                max: total,
                lower_bound: total,
                upper_bound: total,
            };
        }

        let n = history.len() as f64;
        let remaining = f64::from(remaining_events);
        let mean = history.iter().sum::<f64>() / n;
        let std_dev = if history.len() > 1 {
            let sum_sq = history.iter().map(|p| (p - mean).powi(2)).sum::<f64>();
            (sum_sq / (n - 1.0)).sqrt()
        } else {
            mean * 0.2
        };

        let z = if confidence == 0.95 {
            1.96
        } else if confidence == 0.90 {
            1.645
        } else {
            2.576
        };

        let projected = total + mean * remaining;
        let margin = z * (std_dev / n.sqrt()) * remaining.sqrt();

        let worst = history.iter().copied().fold(f64::INFINITY, f64::min);
        let best = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = total + worst * remaining;
        let max = total + best * remaining;

        SeasonProjection {
            projected,
            min,
            max,
            lower_bound: (projected - margin).max(min),
            upper_bound: (projected + margin).min(max),
        }
    }

    /// Compare the last `trend_window` events with the window before them
    pub fn trend(&self, history: &[f64]) -> Trend {
        let window = self.config.trend_window;
        if history.len() < window * 2 {
            return Trend::Stable;
        }

        let recent = &history[history.len() - window..];
        let previous = &history[history.len() - 2 * window..history.len() - window];
        let recent_avg = recent.iter().sum::<f64>() / window as f64;
        let previous_avg = previous.iter().sum::<f64>() / window as f64;

        if previous_avg <= 0.0 {
            return Trend::Stable;
        }

        let change = (recent_avg - previous_avg) / previous_avg;
        if change > 0.1 {
            Trend::Up
        } else if change < -0.1 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    /// Participants ordered by total points, highest first. Ties are ordered
    /// by id.
    pub fn rank_participants(
        &self,
        standings: &HashMap<ParticipantId, PointsStanding>,
    ) -> Vec<(ParticipantId, f64)> {
        let mut ranked: Vec<_> = standings
            .iter()
            .map(|(id, standing)| (id.clone(), standing.total))
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

impl RatingSystem for PointsRatingSystem {
    type Rating = PointsStanding;
    type Observation = f64;

    fn expected_outcome(&self, a: &PointsStanding, b: &PointsStanding) -> f64 {
        let diff = if self.config.history_weight == 0.0 {
            a.total - b.total
        } else {
            self.blended(a) - self.blended(b)
        };

        logistic(diff / POINTS_SCALE)
    }

    fn calculate_rating(
        &self,
        current: &PointsStanding,
        observations: &[f64],
    ) -> Result<PointsStanding> {
        ensure_finite("total points", current.total)?;
        for earned in observations {
            ensure_finite("earned points", *earned)?;
        }

        if observations.is_empty() {
            return Ok(current.clone());
        }

        let credited: f64 = observations.iter().map(|p| self.credited(*p)).sum();
        let mut history = current.history.clone();
        history.extend_from_slice(observations);

        debug!(
            events = observations.len(),
            credited, "Points rating period processed"
        );

        Ok(PointsStanding::new(current.total + credited, history))
    }

    fn default_rating(&self) -> PointsStanding {
        PointsStanding::new(self.config.default_points, Vec::new())
    }

    fn display_name(&self) -> String {
        if self.config.rank_points.is_some() {
            "Points-Based (Ranked)".to_string()
        } else {
            "Points-Based".to_string()
        }
    }
}
