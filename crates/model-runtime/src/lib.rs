//! Model Runtime
//!
//! Loads the trained regression artifacts and runs the estimate pipeline:
//! preprocess the raw order row, align it to the trained feature schema,
//! and delegate to the model.

mod artifact;
mod runtime;

pub use artifact::{ModelArtifact, Tree, TreeNode};
pub use runtime::{Estimate, ModelRuntime};

use feature_prep::PrepError;
use thiserror::Error;

/// Errors during model loading and inference
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model {path}: {source}")]
    ModelRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse model {path}: {source}")]
    ModelParse {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Artifact(#[from] PrepError),
    #[error("Feature width mismatch: model expects {expected}, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },
    #[error("Malformed model: {0}")]
    Malformed(String),
}
