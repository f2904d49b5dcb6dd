//! Rating history recorder
//!
//! Collects the rating of each participant after every rating period so the
//! progression can be printed or handed to a plotting tool as JSON.

use crate::types::AnyRating;
use serde::{Deserialize, Serialize};

/// One recorded rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    /// Free-form label, e.g. the match or round the rating follows
    pub label: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deviation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
}

impl RatingSnapshot {
    pub fn from_rating(label: impl Into<String>, rating: &AnyRating) -> Self {
        Self {
            label: label.into(),
            rating: rating.value(),
            deviation: rating.deviation(),
            volatility: rating.volatility(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ParticipantHistory {
    name: String,
    snapshots: Vec<RatingSnapshot>,
}

/// Snapshots of every participant at one position in the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSnapshot {
    pub index: usize,
    pub ratings: Vec<(String, RatingSnapshot)>,
}

/// Per-participant rating history, in the order participants were first seen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingHistory {
    participants: Vec<ParticipantHistory>,
}

impl RatingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, name: &str) -> &mut Vec<RatingSnapshot> {
        let position = match self.participants.iter().position(|p| p.name == name) {
            Some(position) => position,
            None => {
                self.participants.push(ParticipantHistory {
                    name: name.to_string(),
                    snapshots: Vec::new(),
                });
                self.participants.len() - 1
            }
        };
        &mut self.participants[position].snapshots
    }

    /// Record a rating from any system
    pub fn track(&mut self, name: &str, label: impl Into<String>, rating: &AnyRating) {
        let snapshot = RatingSnapshot::from_rating(label, rating);
        self.slot(name).push(snapshot);
    }

    /// Record explicit values
    pub fn track_values(
        &mut self,
        name: &str,
        label: impl Into<String>,
        rating: f64,
        deviation: Option<f64>,
        volatility: Option<f64>,
    ) {
        let snapshot = RatingSnapshot {
            label: label.into(),
            rating,
            deviation,
            volatility,
        };
        self.slot(name).push(snapshot);
    }

    pub fn entries(&self, name: &str) -> Option<&[RatingSnapshot]> {
        self.participants
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.snapshots.as_slice())
    }

    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(|p| p.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Latest snapshot of every participant with at least one entry
    pub fn final_ratings(&self) -> Vec<(&str, &RatingSnapshot)> {
        self.participants
            .iter()
            .filter_map(|p| p.snapshots.last().map(|s| (p.name.as_str(), s)))
            .collect()
    }

    /// Snapshots at the given 0-based positions. Positions no participant has
    /// reached are skipped.
    pub fn snapshots_at(&self, intervals: &[usize]) -> Vec<IntervalSnapshot> {
        intervals
            .iter()
            .filter_map(|&index| {
                let ratings: Vec<_> = self
                    .participants
                    .iter()
                    .filter_map(|p| {
                        p.snapshots
                            .get(index)
                            .map(|s| (p.name.clone(), s.clone()))
                    })
                    .collect();

                if ratings.is_empty() {
                    None
                } else {
                    Some(IntervalSnapshot { index, ratings })
                }
            })
            .collect()
    }
}
