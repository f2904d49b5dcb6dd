//! Shared helpers for integration tests

#![allow(dead_code)]

use leaderboard_ratings::config::AppConfig;
use leaderboard_ratings::rating::{DynRatingSystem, RatingSystemRegistry};
use leaderboard_ratings::types::{AnyRating, EloRating, Glicko2Rating, Observation};

/// Registry built from the default configuration
pub fn default_registry() -> RatingSystemRegistry {
    RatingSystemRegistry::with_defaults(&AppConfig::default())
}

pub fn system(name: &str) -> Box<dyn DynRatingSystem> {
    default_registry()
        .get(name)
        .unwrap_or_else(|e| panic!("failed to build {}: {}", name, e))
}

pub fn glicko2(rating: f64, deviation: f64, volatility: f64) -> AnyRating {
    AnyRating::from(Glicko2Rating::new(rating, deviation, volatility).unwrap())
}

pub fn elo(rating: f64) -> AnyRating {
    AnyRating::from(EloRating::new(rating))
}

/// Player and results from Glickman's Glicko-2 worked example
pub fn glickman_example() -> (AnyRating, Vec<Observation>) {
    let player = glicko2(1500.0, 200.0, 0.06);
    let observations = vec![
        Observation::against(glicko2(1400.0, 30.0, 0.06), 1.0),
        Observation::against(glicko2(1550.0, 100.0, 0.06), 0.0),
        Observation::against(glicko2(1700.0, 300.0, 0.06), 0.0),
    ];
    (player, observations)
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
}
