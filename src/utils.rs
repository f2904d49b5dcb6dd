//! Utility functions shared by the rating engines

use crate::error::{RatingError, Result};

/// Logistic curve `1 / (1 + e^-x)`
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Reject a match score outside the closed interval [0, 1]
pub fn validate_score(score: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&score) {
        return Err(RatingError::invalid_input(format!(
            "score {} is outside [0, 1]",
            score
        ))
        .into());
    }
    Ok(())
}

/// Reject NaN and infinities
pub fn ensure_finite(what: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(
            RatingError::invalid_input(format!("{} must be finite, got {}", what, value)).into(),
        );
    }
    Ok(())
}

/// Reject anything that is not a finite, strictly positive number
pub fn ensure_positive(what: &str, value: f64) -> Result<()> {
    ensure_finite(what, value)?;
    if value <= 0.0 {
        return Err(
            RatingError::invalid_input(format!("{} must be positive, got {}", what, value)).into(),
        );
    }
    Ok(())
}
