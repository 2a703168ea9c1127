//! Order Intake
//!
//! Provides the order form's domain types, range validation, and the
//! construction of the single-row raw table fed to preprocessing.

mod error;
mod order;
mod validator;

pub use error::ValidationError;
pub use order::{Area, Category, OrderDetails, Traffic, Vehicle, Weather};
pub use validator::{OrderValidator, ValidationConfig, ValidationResult};
