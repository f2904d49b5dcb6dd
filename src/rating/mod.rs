//! Rating systems
//!
//! Each algorithm implements [`RatingSystem`] with its own rating and
//! observation types. The registry hands them out by name behind
//! [`DynRatingSystem`].

pub mod elo;
pub mod glicko2;
pub mod points;
pub mod registry;
pub mod system;
pub mod volatility;

// Re-export commonly used types
pub use elo::EloRatingSystem;
pub use glicko2::{from_glicko2_scale, to_glicko2_scale, Glicko2RatingSystem};
pub use points::{PointsRatingSystem, SeasonProjection, Trend};
pub use registry::RatingSystemRegistry;
pub use system::{boxed, DynRatingSystem, ErasedRatingSystem, RatingSystem};
