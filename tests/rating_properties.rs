//! Property tests for invariants shared by every rating system

use leaderboard_ratings::config::{EloConfig, Glicko2Config, PointsConfig};
use leaderboard_ratings::rating::{
    EloRatingSystem, Glicko2RatingSystem, PointsRatingSystem, RatingSystem,
};
use leaderboard_ratings::types::{
    EloObservation, EloRating, Glicko2Observation, Glicko2Rating, PointsStanding,
};
use proptest::prelude::*;

fn glicko2_rating() -> impl Strategy<Value = Glicko2Rating> {
    (800.0..2400.0f64, 30.0..350.0f64, 0.01..0.2f64)
        .prop_map(|(r, rd, vol)| Glicko2Rating::new(r, rd, vol).unwrap())
}

fn score() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(0.5), Just(1.0), 0.0..=1.0f64]
}

proptest! {
    #[test]
    fn elo_expected_outcome_is_complementary(a in 0.0..3000.0f64, b in 0.0..3000.0f64) {
        let system = EloRatingSystem::new(EloConfig::default()).unwrap();
        let (a, b) = (EloRating::new(a), EloRating::new(b));

        let total = system.expected_outcome(&a, &b) + system.expected_outcome(&b, &a);
        prop_assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn glicko2_expected_outcome_is_complementary(a in glicko2_rating(), b in glicko2_rating()) {
        let system = Glicko2RatingSystem::new(Glicko2Config::default()).unwrap();

        let total = system.expected_outcome(&a, &b) + system.expected_outcome(&b, &a);
        prop_assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn points_expected_outcome_is_complementary(
        a in -500.0..500.0f64,
        b in -500.0..500.0f64,
        weight in 0.0..=1.0f64,
        history in prop::collection::vec(0.0..50.0f64, 0..8),
    ) {
        let system = PointsRatingSystem::new(PointsConfig {
            history_weight: weight,
            ..PointsConfig::default()
        })
        .unwrap();
        let a = PointsStanding::new(a, history.clone());
        let b = PointsStanding::new(b, history.into_iter().rev().collect());

        let total = system.expected_outcome(&a, &b) + system.expected_outcome(&b, &a);
        prop_assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn elo_period_is_order_independent(
        start in 1000.0..2000.0f64,
        games in prop::collection::vec((1000.0..2000.0f64, score()), 1..10),
    ) {
        let system = EloRatingSystem::new(EloConfig::default()).unwrap();
        let current = EloRating::new(start);
        let forward: Vec<_> = games
            .iter()
            .map(|&(opponent, s)| EloObservation::new(opponent, s))
            .collect();
        let mut backward = forward.clone();
        backward.reverse();

        let a = system.calculate_rating(&current, &forward).unwrap();
        let b = system.calculate_rating(&current, &backward).unwrap();
        prop_assert!((a.rating - b.rating).abs() < 1e-9);
    }

    #[test]
    fn glicko2_deviation_stays_within_bounds(
        player in glicko2_rating(),
        opponents in prop::collection::vec((glicko2_rating(), score()), 0..10),
    ) {
        let config = Glicko2Config::default();
        let system = Glicko2RatingSystem::new(config.clone()).unwrap();
        let observations: Vec<_> = opponents
            .iter()
            .map(|(opponent, s)| Glicko2Observation::against(opponent, *s))
            .collect();

        let updated = system.calculate_rating(&player, &observations).unwrap();
        prop_assert!(updated.deviation() >= config.min_deviation);
        prop_assert!(updated.deviation() <= config.max_deviation);
        prop_assert!(updated.volatility() > 0.0);
    }
}
