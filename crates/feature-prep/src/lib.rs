//! Feature Preprocessing
//!
//! Turns a raw heterogeneous order row into the all-numeric layout the
//! trained regression model expects: calendar features derived from
//! datetime-named columns, categorical values encoded to integer codes, and
//! the result aligned against the trained feature schema.

mod align;
mod datetime;
mod encode;
mod prep;

pub use align::{align, AlignmentReport, FeatureSchema};
pub use datetime::{expand_datetime_columns, is_datetime_like};
pub use encode::{encode_categoricals, CategoryMap};
pub use prep::Preprocessor;

use thiserror::Error;

/// Errors while loading preprocessing artifacts
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("Failed to read artifact {path}: {source}")]
    ArtifactRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse artifact {path}: {source}")]
    ArtifactParse {
        path: String,
        source: serde_json::Error,
    },
}
