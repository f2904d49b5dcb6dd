//! Error types for the rating systems
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Callers that need to branch on the failure category
//! downcast to [`RatingError`].

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Rating calculation did not converge: {reason}")]
    ConvergenceFailed { reason: String },

    #[error("Unknown rating system '{name}' (available: {})", .available.join(", "))]
    UnknownRatingSystem {
        name: String,
        available: Vec<String>,
    },

    #[error("Configuration error: {message}")]
    InvalidConfiguration { message: String },
}

impl RatingError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        RatingError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn convergence(reason: impl Into<String>) -> Self {
        RatingError::ConvergenceFailed {
            reason: reason.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        RatingError::InvalidConfiguration {
            message: message.into(),
        }
    }
}
