//! Model Artifact Representations

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One node of a regression tree; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Branch {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree stored as a node table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk the tree for one feature vector. Values below the threshold go
    /// left, the rest go right.
    fn output(&self, features: &[f64]) -> Result<f64, ModelError> {
        let mut index = 0;
        // A well-formed tree terminates within nodes.len() steps
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Branch {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().ok_or_else(|| {
                        ModelError::Malformed(format!(
                            "tree references feature {feature} outside input width {}",
                            features.len()
                        ))
                    })?;
                    index = if value < *threshold { *left } else { *right };
                }
                None => {
                    return Err(ModelError::Malformed(format!(
                        "tree references node {index} outside node table"
                    )))
                }
            }
        }
        Err(ModelError::Malformed("tree walk did not terminate".into()))
    }
}

/// Trained regression model loaded from the JSON artifact.
///
/// The rest of the system only uses `predict`; the representation is a
/// loader concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Linear regression: intercept + dot(coefficients, features)
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    /// Additive tree ensemble: base score + sum of tree outputs
    Forest {
        n_features: usize,
        base_score: f64,
        trees: Vec<Tree>,
    },
}

impl ModelArtifact {
    /// Load the model from a JSON artifact
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path_str = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(&path).map_err(|source| ModelError::ModelRead {
            path: path_str.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ModelError::ModelParse {
            path: path_str,
            source,
        })
    }

    /// Width of the feature vector the model expects
    pub fn input_width(&self) -> usize {
        match self {
            ModelArtifact::Linear { coefficients, .. } => coefficients.len(),
            ModelArtifact::Forest { n_features, .. } => *n_features,
        }
    }

    /// Artifact kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Linear { .. } => "linear",
            ModelArtifact::Forest { .. } => "forest",
        }
    }

    /// Run inference on an aligned feature vector
    pub fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.input_width() {
            return Err(ModelError::WidthMismatch {
                expected: self.input_width(),
                actual: features.len(),
            });
        }

        match self {
            ModelArtifact::Linear {
                intercept,
                coefficients,
            } => Ok(intercept
                + coefficients
                    .iter()
                    .zip(features)
                    .map(|(c, x)| c * x)
                    .sum::<f64>()),
            ModelArtifact::Forest {
                base_score, trees, ..
            } => {
                let mut total = *base_score;
                for tree in trees {
                    total += tree.output(features)?;
                }
                Ok(total)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> ModelArtifact {
        ModelArtifact::Linear {
            intercept: 1.5,
            coefficients: vec![0.5, -1.0, 2.0],
        }
    }

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> Tree {
        Tree {
            nodes: vec![
                TreeNode::Branch {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: low },
                TreeNode::Leaf { value: high },
            ],
        }
    }

    #[test]
    fn test_linear_predict() {
        let y = linear().predict(&[2.0, 3.0, 0.5]).unwrap();
        assert!((y - (1.5 + 1.0 - 3.0 + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_width_mismatch_is_an_error() {
        let err = linear().predict(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::WidthMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_forest_sums_tree_outputs() {
        let model = ModelArtifact::Forest {
            n_features: 2,
            base_score: 2.0,
            trees: vec![stump(0, 10.0, 1.0, 3.0), stump(1, 0.5, -1.0, 0.5)],
        };
        // feature 0 below threshold -> 1.0; feature 1 above -> 0.5
        let y = model.predict(&[5.0, 0.9]).unwrap();
        assert!((y - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_forest_rejects_bad_node_index() {
        let model = ModelArtifact::Forest {
            n_features: 1,
            base_score: 0.0,
            trees: vec![Tree {
                nodes: vec![TreeNode::Branch {
                    feature: 0,
                    threshold: 1.0,
                    left: 5,
                    right: 6,
                }],
            }],
        };
        assert!(matches!(
            model.predict(&[0.0]),
            Err(ModelError::Malformed(_))
        ));
    }

    #[test]
    fn test_artifact_round_trips_through_json() {
        let json = serde_json::to_string(&linear()).unwrap();
        let back: ModelArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, linear());
        assert_eq!(back.kind(), "linear");
        assert_eq!(back.input_width(), 3);
    }
}
