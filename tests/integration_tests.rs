//! Integration tests for the leaderboard-ratings crate
//!
//! These tests drive the public API the way a caller would:
//! - Picking rating systems by name from the registry
//! - Running rating periods through the type-erased interface
//! - Loading configuration from TOML
//! - Recording rating history

mod fixtures;

use leaderboard_ratings::config::{AppConfig, EloConfig};
use leaderboard_ratings::error::RatingError;
use leaderboard_ratings::history::RatingHistory;
use leaderboard_ratings::rating::{boxed, EloRatingSystem, RatingSystemRegistry};
use leaderboard_ratings::types::{AnyRating, Observation, PointsStanding};

use fixtures::{assert_close, default_registry, elo, glickman_example, glicko2, system};

fn rating_error(err: &anyhow::Error) -> &RatingError {
    err.downcast_ref::<RatingError>()
        .unwrap_or_else(|| panic!("not a rating error: {:#}", err))
}

#[test]
fn test_glicko2_worked_example_through_registry() {
    let engine = system("glicko2");
    let (player, observations) = glickman_example();

    let updated = engine.calculate_rating(&player, &observations).unwrap();

    assert_close(updated.value(), 1464.06, 0.01);
    assert_close(updated.deviation().unwrap(), 151.52, 0.01);
    assert_close(updated.volatility().unwrap(), 0.05999, 0.0001);
}

#[test]
fn test_glicko2_inactive_period_widens_deviation() {
    let engine = system("glicko2");
    let player = glicko2(1620.0, 80.0, 0.06);

    let updated = engine.calculate_rating(&player, &[]).unwrap();

    assert_eq!(updated.value(), 1620.0);
    assert!(updated.deviation().unwrap() > 80.0);
    assert_eq!(updated.volatility(), Some(0.06));
}

#[test]
fn test_elo_single_win() {
    let elo_system = system("elo");
    let updated = elo_system
        .calculate_rating(&elo(1500.0), &[Observation::against(elo(1500.0), 1.0)])
        .unwrap();

    assert_eq!(updated, elo(1516.0));
}

#[test]
fn test_points_through_registry() {
    let points = system("points");
    let start = points.default_rating();
    assert_eq!(start, AnyRating::from(PointsStanding::new(0.0, vec![])));

    let updated = points
        .calculate_rating(&start, &[Observation::points(10.0), Observation::points(7.5)])
        .unwrap();

    assert_eq!(updated.value(), 17.5);
}

#[test]
fn test_expected_outcome_is_complementary() {
    for name in ["elo", "glicko2"] {
        let rating_system = system(name);
        let a = rating_system.default_rating();
        let (b, _) = glickman_example();
        let b = if name == "elo" { elo(1700.0) } else { b };

        let p_ab = rating_system.expected_outcome(&a, &b).unwrap();
        let p_ba = rating_system.expected_outcome(&b, &a).unwrap();
        assert_close(p_ab + p_ba, 1.0, 1e-12);
    }
}

#[test]
fn test_wrong_rating_shape_is_invalid_input() {
    let elo_system = system("elo");
    let err = elo_system
        .calculate_rating(&glicko2(1500.0, 200.0, 0.06), &[])
        .unwrap_err();
    assert!(matches!(
        rating_error(&err),
        RatingError::InvalidInput { .. }
    ));

    let err = elo_system
        .calculate_rating(&elo(1500.0), &[Observation::points(3.0)])
        .unwrap_err();
    assert!(matches!(
        rating_error(&err),
        RatingError::InvalidInput { .. }
    ));

    let err = system("glicko2")
        .expected_outcome(&elo(1500.0), &elo(1500.0))
        .unwrap_err();
    assert!(matches!(
        rating_error(&err),
        RatingError::InvalidInput { .. }
    ));
}

#[test]
fn test_invalid_score_is_rejected_whole() {
    let (player, mut observations) = glickman_example();
    observations.push(Observation::against(glicko2(1500.0, 50.0, 0.06), -0.5));

    let err = system("glicko2")
        .calculate_rating(&player, &observations)
        .unwrap_err();
    assert!(matches!(
        rating_error(&err),
        RatingError::InvalidInput { .. }
    ));
}

#[test]
fn test_unknown_rating_system() {
    let err = default_registry().get("TrueSkill").unwrap_err();

    match rating_error(&err) {
        RatingError::UnknownRatingSystem { name, available } => {
            assert_eq!(name, "TrueSkill");
            assert_eq!(available, &vec!["elo", "glicko2", "points"]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("elo, glicko2, points"));
}

#[test]
fn test_custom_system_registration() {
    let mut registry = RatingSystemRegistry::new();
    registry.register("blitz", || {
        Ok(boxed(EloRatingSystem::new(EloConfig::with_k_factor(40.0))?))
    });

    let blitz = registry.get("blitz").unwrap();
    let updated = blitz
        .calculate_rating(&elo(1500.0), &[Observation::against(elo(1500.0), 0.0)])
        .unwrap();

    assert_eq!(updated, elo(1480.0));
    assert_eq!(registry.list_available(), vec!["blitz"]);
}

#[test]
fn test_config_file_drives_registry() {
    let path = std::env::temp_dir().join(format!(
        "leaderboard-ratings-{}.toml",
        std::process::id()
    ));
    std::fs::write(
        &path,
        r#"
[elo]
k_factor = 24.0

[glicko2]
tau = 0.3
"#,
    )
    .unwrap();

    let config = AppConfig::from_file(&path);
    std::fs::remove_file(&path).ok();
    let config = config.unwrap();

    let registry = RatingSystemRegistry::with_defaults(&config);
    assert_eq!(registry.get("elo").unwrap().display_name(), "Elo (K=24)");
    assert_eq!(
        registry.get("glicko2").unwrap().display_name(),
        "Glicko-2 (τ=0.3)"
    );
}

#[test]
fn test_history_of_a_short_series() {
    let engine = system("glicko2");
    let mut history = RatingHistory::new();
    let mut a = engine.default_rating();
    let mut b = engine.default_rating();

    history.track("a", "start", &a);
    history.track("b", "start", &b);

    for round in 1..=3 {
        let next_a = engine
            .calculate_rating(&a, &[Observation::against(b.clone(), 1.0)])
            .unwrap();
        let next_b = engine
            .calculate_rating(&b, &[Observation::against(a.clone(), 0.0)])
            .unwrap();
        a = next_a;
        b = next_b;

        history.track("a", format!("round {}", round), &a);
        history.track("b", format!("round {}", round), &b);
    }

    let a_history = history.entries("a").unwrap();
    assert_eq!(a_history.len(), 4);
    assert!(a_history.windows(2).all(|w| w[1].rating > w[0].rating));

    let finals = history.final_ratings();
    assert!(finals[0].1.rating > 1500.0);
    assert!(finals[1].1.rating < 1500.0);
    assert_close(finals[0].1.rating - 1500.0, 1500.0 - finals[1].1.rating, 1e-6);
}
