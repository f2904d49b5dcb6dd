//! Rating system trait and its type-erased counterpart
//!
//! [`RatingSystem`] is what every algorithm implements, with its own rating and
//! observation types. [`DynRatingSystem`] is the object-safe view over
//! [`AnyRating`] and [`Observation`] that lets callers pick an algorithm at
//! runtime, e.g. from the registry.

use crate::error::Result;
use crate::types::{AnyRating, Observation};

/// Trait for calculating ratings from the results of one rating period.
///
/// Implementations are immutable after construction and every method is a
/// pure function of its arguments.
pub trait RatingSystem: Send + Sync {
    /// Per-participant state
    type Rating: Clone + std::fmt::Debug;
    /// One result folded into a rating period
    type Observation;

    /// Probability that `a` beats `b`.
    ///
    /// `expected_outcome(a, b) + expected_outcome(b, a)` is 1 for every pair.
    fn expected_outcome(&self, a: &Self::Rating, b: &Self::Rating) -> f64;

    /// Calculate the rating after one rating period.
    ///
    /// # Arguments
    /// * `current` - Rating at the start of the period
    /// * `observations` - Results from the period, possibly none
    ///
    /// # Returns
    /// The new rating, or an error if any input is malformed. Nothing is
    /// returned for partially valid input.
    fn calculate_rating(
        &self,
        current: &Self::Rating,
        observations: &[Self::Observation],
    ) -> Result<Self::Rating>;

    /// Get the rating for participants who have never played
    fn default_rating(&self) -> Self::Rating;

    /// Human readable name including the key parameters
    fn display_name(&self) -> String;
}

/// Object-safe rating system over the tagged rating and observation types.
///
/// Ratings or observations of the wrong shape for the underlying system are
/// rejected as invalid input.
pub trait DynRatingSystem: Send + Sync {
    fn expected_outcome(&self, a: &AnyRating, b: &AnyRating) -> Result<f64>;

    fn calculate_rating(
        &self,
        current: &AnyRating,
        observations: &[Observation],
    ) -> Result<AnyRating>;

    fn default_rating(&self) -> AnyRating;

    fn display_name(&self) -> String;
}

impl std::fmt::Debug for dyn DynRatingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynRatingSystem")
            .field("name", &self.display_name())
            .finish()
    }
}

/// Adapter exposing a [`RatingSystem`] as a [`DynRatingSystem`]
#[derive(Debug, Clone)]
pub struct ErasedRatingSystem<S> {
    inner: S,
}

impl<S> ErasedRatingSystem<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

/// Box a rating system behind the object-safe interface
pub fn boxed<S>(system: S) -> Box<dyn DynRatingSystem>
where
    S: RatingSystem + 'static,
    S::Rating: Into<AnyRating> + TryFrom<AnyRating, Error = anyhow::Error>,
    S::Observation: TryFrom<Observation, Error = anyhow::Error>,
{
    Box::new(ErasedRatingSystem::new(system))
}

impl<S> DynRatingSystem for ErasedRatingSystem<S>
where
    S: RatingSystem,
    S::Rating: Into<AnyRating> + TryFrom<AnyRating, Error = anyhow::Error>,
    S::Observation: TryFrom<Observation, Error = anyhow::Error>,
{
    fn expected_outcome(&self, a: &AnyRating, b: &AnyRating) -> Result<f64> {
        let a = S::Rating::try_from(a.clone())?;
        let b = S::Rating::try_from(b.clone())?;
        Ok(self.inner.expected_outcome(&a, &b))
    }

    fn calculate_rating(
        &self,
        current: &AnyRating,
        observations: &[Observation],
    ) -> Result<AnyRating> {
        let current = S::Rating::try_from(current.clone())?;
        let observations = observations
            .iter()
            .cloned()
            .map(S::Observation::try_from)
            .collect::<Result<Vec<_>>>()?;

        let updated = self.inner.calculate_rating(&current, &observations)?;
        Ok(updated.into())
    }

    fn default_rating(&self) -> AnyRating {
        self.inner.default_rating().into()
    }

    fn display_name(&self) -> String {
        self.inner.display_name()
    }
}
