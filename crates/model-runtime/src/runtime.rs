//! Estimate Pipeline

use crate::{ModelArtifact, ModelError};
use feature_prep::{align, CategoryMap, FeatureSchema, Preprocessor};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tabular::Table;
use tracing::{debug, info, warn};

/// Model artifact file name inside the artifact directory
pub const MODEL_FILE: &str = "delivery_model.json";
/// Trained feature schema file name
pub const FEATURES_FILE: &str = "model_features.json";
/// Optional training-time category map file name
pub const CATEGORIES_FILE: &str = "category_maps.json";

/// One prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Predicted delivery time in hours
    pub hours: f64,
    /// Schema columns that had to be zero-filled during alignment
    pub defaulted_columns: Vec<String>,
}

/// Immutable inference context: model, trained schema, and preprocessor.
///
/// Built once at startup and shared read-only for the process lifetime.
#[derive(Debug)]
pub struct ModelRuntime {
    model: ModelArtifact,
    schema: FeatureSchema,
    prep: Preprocessor,
}

impl ModelRuntime {
    /// Assemble a runtime from already-loaded parts
    pub fn from_parts(
        model: ModelArtifact,
        schema: FeatureSchema,
        categories: Option<CategoryMap>,
    ) -> Result<Self, ModelError> {
        if model.input_width() != schema.len() {
            return Err(ModelError::WidthMismatch {
                expected: model.input_width(),
                actual: schema.len(),
            });
        }
        let prep = match categories {
            Some(map) => Preprocessor::with_categories(map),
            None => Preprocessor::new(),
        };
        Ok(Self {
            model,
            schema,
            prep,
        })
    }

    /// Load all artifacts from a directory.
    ///
    /// The model and feature schema are required; the category map is
    /// optional and its absence selects local per-table encoding.
    pub fn load<P: AsRef<Path>>(artifact_dir: P) -> Result<Self, ModelError> {
        let dir = artifact_dir.as_ref();

        let model = ModelArtifact::load(dir.join(MODEL_FILE))?;
        let schema = FeatureSchema::load(dir.join(FEATURES_FILE))?;

        let categories_path = dir.join(CATEGORIES_FILE);
        let categories = if categories_path.exists() {
            Some(CategoryMap::load(&categories_path)?)
        } else {
            info!("No category map artifact, falling back to local encoding");
            None
        };

        info!(
            "Loaded {} model with {} features from {}",
            model.kind(),
            schema.len(),
            dir.display()
        );
        Self::from_parts(model, schema, categories)
    }

    /// Number of features the trained schema defines
    pub fn feature_count(&self) -> usize {
        self.schema.len()
    }

    /// Model kind, for diagnostics
    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }

    /// Whether fixed training-time category codes are in use
    pub fn has_category_map(&self) -> bool {
        self.prep.has_categories()
    }

    /// Run the full pipeline on a raw order row: preprocess, align against
    /// the trained schema, predict. The model's own output is returned
    /// untouched.
    pub fn estimate(&self, raw: &Table) -> Result<Estimate, ModelError> {
        let processed = self.prep.run(raw);
        let (features, report) = align(&processed, &self.schema);

        if !report.defaulted.is_empty() {
            warn!(
                "Zero-filled {} schema column(s): {:?}",
                report.defaulted.len(),
                report.defaulted
            );
        }
        debug!(
            "Aligned row: {} features, {} dropped",
            features.len(),
            report.dropped.len()
        );

        let hours = self.model.predict(&features)?;
        Ok(Estimate {
            hours,
            defaulted_columns: report.defaulted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tabular::Value;

    /// Schema matching the preprocessed order row layout
    fn order_schema() -> FeatureSchema {
        FeatureSchema::new([
            "Agent_Age",
            "Agent_Rating",
            "Distance_km",
            "Weather",
            "Traffic",
            "Vehicle",
            "Area",
            "Category",
            "Order_Date_hour",
            "Order_Date_day",
            "Order_Date_weekday",
            "Order_Date_month",
            "Order_Time_hour",
            "Order_Time_day",
            "Order_Time_weekday",
            "Order_Time_month",
        ])
    }

    fn raw_order_row() -> Table {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let time = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Table::single_row([
            ("Agent_Age", Value::Int(30)),
            ("Agent_Rating", Value::Float(4.0)),
            ("Distance_km", Value::Float(5.0)),
            ("Weather", Value::from("Sunny")),
            ("Traffic", Value::from("Low")),
            ("Vehicle", Value::from("Bike")),
            ("Area", Value::from("Urban")),
            ("Category", Value::from("Electronics")),
            ("Order_Date", Value::Timestamp(date)),
            ("Order_Time", Value::Timestamp(time)),
        ])
    }

    #[test]
    fn test_width_checked_at_construction() {
        let model = ModelArtifact::Linear {
            intercept: 0.0,
            coefficients: vec![1.0, 1.0],
        };
        let err = ModelRuntime::from_parts(model, order_schema(), None).unwrap_err();
        assert!(matches!(err, ModelError::WidthMismatch { .. }));
    }

    #[test]
    fn test_estimate_delegates_to_the_model() {
        // Weighted sum the shell must reproduce exactly, no arithmetic of
        // its own beyond delegation.
        let coefficients = vec![
            0.1, 0.2, 0.3, 1.0, 1.0, 1.0, 1.0, 1.0, 0.05, 0.01, 0.4, 0.02, 0.05, 0.01, 0.4, 0.02,
        ];
        let model = ModelArtifact::Linear {
            intercept: 2.0,
            coefficients: coefficients.clone(),
        };
        let runtime = ModelRuntime::from_parts(model, order_schema(), None).unwrap();

        let estimate = runtime.estimate(&raw_order_row()).unwrap();
        assert!(estimate.defaulted_columns.is_empty());

        // Sole categorical values encode to 0; 2024-01-15 is a Monday.
        let features = [
            30.0, 4.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 15.0, 0.0, 1.0, 9.0, 15.0, 0.0, 1.0,
        ];
        let expected: f64 = 2.0
            + coefficients
                .iter()
                .zip(features.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>();
        assert!((estimate.hours - expected).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_reports_defaulted_columns() {
        let mut schema_cols: Vec<String> =
            order_schema().columns().to_vec();
        schema_cols.push("Courier_Tenure".to_string());
        let schema = FeatureSchema::new(schema_cols);

        let model = ModelArtifact::Linear {
            intercept: 0.0,
            coefficients: vec![0.0; schema.len()],
        };
        let runtime = ModelRuntime::from_parts(model, schema, None).unwrap();

        let estimate = runtime.estimate(&raw_order_row()).unwrap();
        assert_eq!(estimate.defaulted_columns, vec!["Courier_Tenure"]);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let model = ModelArtifact::Linear {
            intercept: 1.0,
            coefficients: vec![0.1; 16],
        };
        let runtime = ModelRuntime::from_parts(model, order_schema(), None).unwrap();
        let first = runtime.estimate(&raw_order_row()).unwrap();
        let second = runtime.estimate(&raw_order_row()).unwrap();
        assert_eq!(first, second);
    }
}
