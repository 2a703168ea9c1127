//! Validation Error Types

use thiserror::Error;

/// Errors during order validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Field could not be parsed from the submitted form
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}
