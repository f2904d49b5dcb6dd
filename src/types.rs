//! Common rating value types shared by the rating engines
//!
//! Every value here is a plain snapshot: engines take one in and hand a new
//! one back, nothing is retained between calls.

use crate::error::{RatingError, Result};
use crate::utils::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};
use skillratings::elo::EloRating as ExternalEloRating;
use skillratings::glicko2::Glicko2Rating as ExternalGlicko2Rating;

/// Identifier the caller uses for a participant
pub type ParticipantId = String;

/// Elo rating: a single number on the classic 1500-centered scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EloRating {
    pub rating: f64,
}

impl EloRating {
    pub fn new(rating: f64) -> Self {
        Self { rating }
    }
}

impl Default for EloRating {
    fn default() -> Self {
        Self { rating: 1500.0 }
    }
}

impl From<f64> for EloRating {
    fn from(rating: f64) -> Self {
        Self { rating }
    }
}

impl From<ExternalEloRating> for EloRating {
    fn from(rating: ExternalEloRating) -> Self {
        Self {
            rating: rating.rating,
        }
    }
}

impl From<EloRating> for ExternalEloRating {
    fn from(rating: EloRating) -> Self {
        Self {
            rating: rating.rating,
        }
    }
}

/// One result from an Elo rating period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EloObservation {
    pub opponent: EloRating,
    /// 1.0 win, 0.5 draw, 0.0 loss
    pub score: f64,
}

impl EloObservation {
    pub fn new(opponent: impl Into<EloRating>, score: f64) -> Self {
        Self {
            opponent: opponent.into(),
            score,
        }
    }
}

/// Glicko-2 rating on the public (1500-centered) scale.
///
/// Rating, deviation and volatility always travel together. Deviation and
/// volatility are strictly positive and every component is finite; this is
/// checked by [`Glicko2Rating::new`] and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Glicko2Parts")]
pub struct Glicko2Rating {
    rating: f64,
    deviation: f64,
    volatility: f64,
}

#[derive(Deserialize)]
struct Glicko2Parts {
    rating: f64,
    deviation: f64,
    volatility: f64,
}

impl TryFrom<Glicko2Parts> for Glicko2Rating {
    type Error = anyhow::Error;

    fn try_from(parts: Glicko2Parts) -> Result<Self> {
        Self::new(parts.rating, parts.deviation, parts.volatility)
    }
}

impl Glicko2Rating {
    /// Create a validated rating triple
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Result<Self> {
        ensure_finite("rating", rating)?;
        ensure_positive("rating deviation", deviation)?;
        ensure_positive("volatility", volatility)?;

        Ok(Self {
            rating,
            deviation,
            volatility,
        })
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

impl std::fmt::Display for Glicko2Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} ± {:.1} (σ={:.4})",
            self.rating, self.deviation, self.volatility
        )
    }
}

impl From<Glicko2Rating> for ExternalGlicko2Rating {
    fn from(rating: Glicko2Rating) -> Self {
        Self {
            rating: rating.rating,
            deviation: rating.deviation,
            volatility: rating.volatility,
        }
    }
}

impl TryFrom<ExternalGlicko2Rating> for Glicko2Rating {
    type Error = anyhow::Error;

    fn try_from(rating: ExternalGlicko2Rating) -> Result<Self> {
        Self::new(rating.rating, rating.deviation, rating.volatility)
    }
}

/// One result from a Glicko-2 rating period. The opponent's volatility plays
/// no part in the update, so only rating and deviation are carried.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glicko2Observation {
    pub rating: f64,
    pub deviation: f64,
    /// 1.0 win, 0.5 draw, 0.0 loss
    pub score: f64,
}

impl Glicko2Observation {
    pub fn new(rating: f64, deviation: f64, score: f64) -> Self {
        Self {
            rating,
            deviation,
            score,
        }
    }

    /// Observation against an opponent's current snapshot
    pub fn against(opponent: &Glicko2Rating, score: f64) -> Self {
        Self::new(opponent.rating, opponent.deviation, score)
    }
}

/// Accumulated points plus every value that was earned, oldest first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointsStanding {
    pub total: f64,
    pub history: Vec<f64>,
}

impl PointsStanding {
    pub fn new(total: f64, history: Vec<f64>) -> Self {
        Self { total, history }
    }
}

/// A rating from any of the supported systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "snake_case")]
pub enum AnyRating {
    Elo(EloRating),
    Glicko2(Glicko2Rating),
    Points(PointsStanding),
}

impl AnyRating {
    /// The headline number: rating, or total points
    pub fn value(&self) -> f64 {
        match self {
            AnyRating::Elo(r) => r.rating,
            AnyRating::Glicko2(r) => r.rating(),
            AnyRating::Points(p) => p.total,
        }
    }

    pub fn deviation(&self) -> Option<f64> {
        match self {
            AnyRating::Glicko2(r) => Some(r.deviation()),
            _ => None,
        }
    }

    pub fn volatility(&self) -> Option<f64> {
        match self {
            AnyRating::Glicko2(r) => Some(r.volatility()),
            _ => None,
        }
    }

    /// Short name of the rating shape, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            AnyRating::Elo(_) => "elo",
            AnyRating::Glicko2(_) => "glicko2",
            AnyRating::Points(_) => "points",
        }
    }
}

impl From<EloRating> for AnyRating {
    fn from(rating: EloRating) -> Self {
        AnyRating::Elo(rating)
    }
}

impl From<Glicko2Rating> for AnyRating {
    fn from(rating: Glicko2Rating) -> Self {
        AnyRating::Glicko2(rating)
    }
}

impl From<PointsStanding> for AnyRating {
    fn from(standing: PointsStanding) -> Self {
        AnyRating::Points(standing)
    }
}

fn shape_mismatch(expected: &str, found: &AnyRating) -> anyhow::Error {
    RatingError::invalid_input(format!(
        "expected a {} rating, found a {} rating",
        expected,
        found.kind()
    ))
    .into()
}

impl TryFrom<AnyRating> for EloRating {
    type Error = anyhow::Error;

    fn try_from(rating: AnyRating) -> Result<Self> {
        match rating {
            AnyRating::Elo(r) => Ok(r),
            other => Err(shape_mismatch("elo", &other)),
        }
    }
}

impl TryFrom<AnyRating> for Glicko2Rating {
    type Error = anyhow::Error;

    fn try_from(rating: AnyRating) -> Result<Self> {
        match rating {
            AnyRating::Glicko2(r) => Ok(r),
            other => Err(shape_mismatch("glicko2", &other)),
        }
    }
}

impl TryFrom<AnyRating> for PointsStanding {
    type Error = anyhow::Error;

    fn try_from(rating: AnyRating) -> Result<Self> {
        match rating {
            AnyRating::Points(p) => Ok(p),
            other => Err(shape_mismatch("points", &other)),
        }
    }
}

/// An observation from any of the supported systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Observation {
    /// Head-to-head result against a rated opponent
    Match { opponent: AnyRating, score: f64 },
    /// Points earned in one event
    Points { earned: f64 },
}

impl Observation {
    pub fn against(opponent: impl Into<AnyRating>, score: f64) -> Self {
        Observation::Match {
            opponent: opponent.into(),
            score,
        }
    }

    pub fn points(earned: f64) -> Self {
        Observation::Points { earned }
    }
}

impl TryFrom<Observation> for EloObservation {
    type Error = anyhow::Error;

    fn try_from(observation: Observation) -> Result<Self> {
        match observation {
            Observation::Match { opponent, score } => Ok(Self {
                opponent: opponent.try_into()?,
                score,
            }),
            Observation::Points { .. } => Err(RatingError::invalid_input(
                "elo observations must be matches against an opponent",
            )
            .into()),
        }
    }
}

impl TryFrom<Observation> for Glicko2Observation {
    type Error = anyhow::Error;

    fn try_from(observation: Observation) -> Result<Self> {
        match observation {
            Observation::Match { opponent, score } => {
                let opponent = Glicko2Rating::try_from(opponent)?;
                Ok(Self::against(&opponent, score))
            }
            Observation::Points { .. } => Err(RatingError::invalid_input(
                "glicko2 observations must be matches against an opponent",
            )
            .into()),
        }
    }
}

impl TryFrom<Observation> for f64 {
    type Error = anyhow::Error;

    fn try_from(observation: Observation) -> Result<Self> {
        match observation {
            Observation::Points { earned } => Ok(earned),
            Observation::Match { .. } => Err(RatingError::invalid_input(
                "points observations must be earned point values",
            )
            .into()),
        }
    }
}
