//! Command line demo for the rating systems
//!
//! Plays a sequence of head-to-head results between two participants through
//! the selected rating system and prints how both ratings evolve.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use leaderboard_ratings::config::AppConfig;
use leaderboard_ratings::history::RatingHistory;
use leaderboard_ratings::rating::{DynRatingSystem, RatingSystemRegistry};
use leaderboard_ratings::types::{AnyRating, Observation};
use std::path::PathBuf;
use tracing::{debug, info};

const PLAYER_A: &str = "a";
const PLAYER_B: &str = "b";

/// League points for a win and a draw when the points system is selected
const WIN_POINTS: f64 = 3.0;
const DRAW_POINTS: f64 = 1.0;

/// Leaderboard Ratings - Elo, Glicko-2 and points-based rating demo
#[derive(Parser)]
#[command(
    name = "leaderboard-ratings",
    version,
    about = "Run head-to-head results through a rating system",
    long_about = "Plays a sequence of results between participants `a` and `b`, both starting \
                 from the default rating, and prints the rating after every match. Each match \
                 is its own rating period and both sides are scored against the other's \
                 pre-match rating."
)]
struct Args {
    /// Rating system to use (defaults to the configured default system)
    #[arg(short, long, value_name = "NAME")]
    system: Option<String>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// List the registered rating systems and exit
    #[arg(long)]
    list_systems: bool,

    /// Print the history as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Match results in order, repeatable
    #[arg(short, long = "result", value_enum, value_name = "WINNER")]
    results: Vec<MatchResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MatchResult {
    /// Participant `a` wins
    A,
    /// Participant `b` wins
    B,
    Draw,
}

impl MatchResult {
    /// Score from `a`'s point of view
    fn score(self) -> f64 {
        match self {
            MatchResult::A => 1.0,
            MatchResult::B => 0.0,
            MatchResult::Draw => 0.5,
        }
    }
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment and apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    Ok(config)
}

/// Observation for one side of a match
fn observation(system_kind: &str, opponent: &AnyRating, score: f64) -> Observation {
    if system_kind == "points" {
        let earned = if score == 1.0 {
            WIN_POINTS
        } else if score == 0.5 {
            DRAW_POINTS
        } else {
            0.0
        };
        Observation::points(earned)
    } else {
        Observation::against(opponent.clone(), score)
    }
}

fn play(system: &dyn DynRatingSystem, results: &[MatchResult]) -> Result<RatingHistory> {
    let mut history = RatingHistory::new();
    let mut a = system.default_rating();
    let mut b = system.default_rating();
    let kind = a.kind();

    history.track(PLAYER_A, "start", &a);
    history.track(PLAYER_B, "start", &b);

    for (index, result) in results.iter().enumerate() {
        let label = format!("match {}", index + 1);
        let expected = system.expected_outcome(&a, &b)?;
        let score = result.score();

        let next_a = system.calculate_rating(&a, &[observation(kind, &b, score)])?;
        let next_b = system.calculate_rating(&b, &[observation(kind, &a, 1.0 - score)])?;

        debug!(
            match_number = index + 1,
            expected,
            score,
            "Match processed"
        );

        a = next_a;
        b = next_b;
        history.track(PLAYER_A, label.clone(), &a);
        history.track(PLAYER_B, label, &b);
    }

    Ok(history)
}

fn print_table(system: &dyn DynRatingSystem, history: &RatingHistory) {
    println!("{}", system.display_name());
    println!(
        "{:<10} {:<6} {:>10} {:>10} {:>10}",
        "label", "name", "rating", "deviation", "volatility"
    );

    let rounds = history.entries(PLAYER_A).map_or(0, |e| e.len());
    let intervals: Vec<usize> = (0..rounds).collect();

    for interval in history.snapshots_at(&intervals) {
        for (name, snapshot) in &interval.ratings {
            let deviation = snapshot
                .deviation
                .map_or_else(|| "-".to_string(), |d| format!("{:.1}", d));
            let volatility = snapshot
                .volatility
                .map_or_else(|| "-".to_string(), |v| format!("{:.6}", v));

            println!(
                "{:<10} {:<6} {:>10.1} {:>10} {:>10}",
                snapshot.label, name, snapshot.rating, deviation, volatility
            );
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let registry = RatingSystemRegistry::with_defaults(&config);

    if args.list_systems {
        for name in registry.list_available() {
            println!("{}", name);
        }
        return Ok(());
    }

    let name = args
        .system
        .as_deref()
        .unwrap_or(&config.service.default_system);
    let system = registry.get(name)?;
    info!(system = %system.display_name(), matches = args.results.len(), "Running demo");

    let history = play(system.as_ref(), &args.results)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&history)?);
    } else {
        print_table(system.as_ref(), &history);
    }

    Ok(())
}
