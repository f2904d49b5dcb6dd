//! Leaderboard Ratings - pluggable skill rating engines
//!
//! This crate provides Elo, Glicko-2 and points-based rating systems behind a
//! common trait, a name-based registry for choosing one at runtime, and a
//! history recorder for following ratings over time.

pub mod config;
pub mod error;
pub mod history;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use history::{RatingHistory, RatingSnapshot};
pub use rating::{DynRatingSystem, RatingSystem, RatingSystemRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
