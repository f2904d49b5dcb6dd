//! Name-based lookup of rating systems
//!
//! Factories are stored rather than instances so every lookup hands out a
//! freshly configured system.

use crate::config::AppConfig;
use crate::error::{RatingError, Result};
use crate::rating::elo::EloRatingSystem;
use crate::rating::glicko2::Glicko2RatingSystem;
use crate::rating::points::PointsRatingSystem;
use crate::rating::system::{boxed, DynRatingSystem};
use std::collections::BTreeMap;
use tracing::{debug, info};

type Factory = Box<dyn Fn() -> Result<Box<dyn DynRatingSystem>> + Send + Sync>;

/// Registry of rating system factories keyed by case-sensitive name
#[derive(Default)]
pub struct RatingSystemRegistry {
    factories: BTreeMap<String, Factory>,
}

impl RatingSystemRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `elo`, `glicko2` and `points` built from `config`
    pub fn with_defaults(config: &AppConfig) -> Self {
        let mut registry = Self::new();

        let elo = config.elo.clone();
        registry.register("elo", move || Ok(boxed(EloRatingSystem::new(elo.clone())?)));

        let glicko2 = config.glicko2.clone();
        registry.register("glicko2", move || {
            Ok(boxed(Glicko2RatingSystem::new(glicko2.clone())?))
        });

        let points = config.points.clone();
        registry.register("points", move || {
            Ok(boxed(PointsRatingSystem::new(points.clone())?))
        });

        info!(
            systems = ?registry.list_available(),
            "Rating system registry initialized"
        );
        registry
    }

    /// Register a factory, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn DynRatingSystem>> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.insert(name.clone(), Box::new(factory)).is_some() {
            debug!(name = %name, "Replaced rating system factory");
        }
    }

    /// Build the system registered under `name`
    pub fn get(&self, name: &str) -> Result<Box<dyn DynRatingSystem>> {
        match self.factories.get(name) {
            Some(factory) => factory(),
            None => Err(RatingError::UnknownRatingSystem {
                name: name.to_string(),
                available: self.list_available(),
            }
            .into()),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn list_available(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}

impl std::fmt::Debug for RatingSystemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingSystemRegistry")
            .field("systems", &self.list_available())
            .finish()
    }
}
