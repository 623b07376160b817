//! Error types for divergence detection.
//!
//! Only input problems reach the caller. Undefined arithmetic inside the
//! geometric checks is recovered where it happens and never surfaces here.

use thiserror::Error;

/// Errors that can occur when preparing or running divergence detection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DivergenceError {
    /// The input arrays cannot be scanned.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected.
        reason: String,
    },

    /// A configuration value failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// A series file could not be turned into aligned arrays.
    #[error("series error: {0}")]
    Series(String),
}

impl DivergenceError {
    /// Creates the error returned for an empty price series.
    #[must_use]
    pub fn empty_input() -> Self {
        Self::InvalidInput {
            reason: "price series is empty".to_string(),
        }
    }

    /// Creates the error returned when price and indicator lengths differ.
    #[must_use]
    pub fn length_mismatch(prices: usize, indicator: usize) -> Self {
        Self::InvalidInput {
            reason: format!(
                "length mismatch: {prices} prices, {indicator} indicator values"
            ),
        }
    }

    /// Returns true if this is an input rejection.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Convenience alias for results carrying a [`DivergenceError`].
pub type Result<T> = std::result::Result<T, DivergenceError>;
