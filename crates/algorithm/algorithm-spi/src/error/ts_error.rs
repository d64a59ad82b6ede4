//! Time series error types
//!
//! Defines the standardized error type for all algorithm operations.

use thiserror::Error;

/// Result type alias for algorithm operations
pub type Result<T> = std::result::Result<T, TsError>;

/// Errors that can occur during time series operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TsError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Invalid time series data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl TsError {
    /// Shorthand for [`TsError::InvalidParameter`]
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        TsError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than by
    /// the computation itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TsError::InsufficientData { .. }
                | TsError::InvalidParameter { .. }
                | TsError::InvalidData(_)
        )
    }
}
