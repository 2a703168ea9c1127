//! Trained-Schema Alignment

use crate::PrepError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tabular::Table;

/// Ordered list of column names the model was fit against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from an ordered name list
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Load the schema from a JSON artifact (a plain array of names)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PrepError> {
        let path_str = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(&path).map_err(|source| PrepError::ArtifactRead {
            path: path_str.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| PrepError::ArtifactParse {
            path: path_str,
            source,
        })
    }

    /// Column names in model order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of features the model expects
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema is empty
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// What alignment had to do to make the row fit the schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    /// Schema columns absent from the row, zero-filled (schema order)
    pub defaulted: Vec<String>,
    /// Row columns absent from the schema, discarded (row order)
    pub dropped: Vec<String>,
}

impl AlignmentReport {
    /// True when the row already matched the schema exactly
    pub fn is_clean(&self) -> bool {
        self.defaulted.is_empty() && self.dropped.is_empty()
    }
}

/// Reindex a processed one-row table against the trained schema.
///
/// Missing schema columns are synthesized with 0.0, extra columns are
/// discarded, and the output order is exactly the schema's. The report
/// makes the zero-fill visible to the caller instead of swallowing it.
pub fn align(table: &Table, schema: &FeatureSchema) -> (Vec<f64>, AlignmentReport) {
    let mut values = Vec::with_capacity(schema.len());
    let mut report = AlignmentReport::default();

    for name in schema.columns() {
        let cell = table
            .column(name)
            .and_then(|col| col.cells().first())
            .and_then(|cell| cell.as_f64());
        match cell {
            Some(v) => values.push(v),
            None => {
                values.push(0.0);
                report.defaulted.push(name.clone());
            }
        }
    }

    for name in table.column_names() {
        if !schema.columns().iter().any(|c| c == name) {
            report.dropped.push(name.to_string());
        }
    }

    (values, report)
}
