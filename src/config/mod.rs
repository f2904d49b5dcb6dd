//! Configuration management for the rating systems
//!
//! This module holds the construction-time parameters of every engine,
//! their defaults and validation, and loading from files and environment.

pub mod app;
pub mod elo;
pub mod glicko2;
pub mod points;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use elo::EloConfig;
pub use glicko2::Glicko2Config;
pub use points::PointsConfig;
