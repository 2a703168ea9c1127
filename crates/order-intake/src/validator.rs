//! Order Validator for Range Checking

use crate::error::ValidationError;
use crate::order::OrderDetails;
use serde::{Deserialize, Serialize};

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Agent age valid range (years)
    pub age_range: (f64, f64),
    /// Agent rating valid range (stars)
    pub rating_range: (f64, f64),
    /// Distance valid range (km)
    pub distance_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            age_range: (18.0, 65.0),
            rating_range: (1.0, 5.0),
            distance_range: (0.1, 100.0),
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for submitted orders
pub struct OrderValidator {
    config: ValidationConfig,
}

impl OrderValidator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range (bounds inclusive)
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate agent age
    pub fn validate_age(&self, age: f64) -> Result<(), ValidationError> {
        self.validate_range("agent_age", age, self.config.age_range)
    }

    /// Validate agent rating
    pub fn validate_rating(&self, rating: f64) -> Result<(), ValidationError> {
        self.validate_range("agent_rating", rating, self.config.rating_range)
    }

    /// Validate distance
    pub fn validate_distance(&self, distance: f64) -> Result<(), ValidationError> {
        self.validate_range("distance_km", distance, self.config.distance_range)
    }

    /// Validate a full order; enum and clock fields are closed sets by
    /// construction, so only the three numeric fields carry ranges.
    pub fn validate(&self, order: &OrderDetails) -> ValidationResult {
        let checks = [
            self.validate_age(order.agent_age as f64),
            self.validate_rating(order.agent_rating),
            self.validate_distance(order.distance_km),
        ];
        let fields_checked = checks.len();

        let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            ValidationResult::invalid(errors, fields_checked)
        }
    }
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
