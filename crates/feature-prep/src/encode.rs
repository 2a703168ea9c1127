//! Categorical Encoding

use crate::PrepError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tabular::{Table, Value};
use tracing::debug;

/// Per-column category-to-code mapping persisted at training time.
///
/// When a column has an entry here, its codes are fixed across calls; values
/// never seen during training encode to -1, the same sentinel the training
/// library uses for unknown categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryMap {
    columns: HashMap<String, HashMap<String, i64>>,
}

impl CategoryMap {
    /// Load the mapping from a JSON artifact
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

    /// Register a code for a column/value pair
    pub fn insert(&mut self, column: &str, value: &str, code: i64) {
        self.columns
            .entry(column.to_string())
            .or_default()
            .insert(value.to_string(), code);
    }

    /// Whether a mapping exists for this column
    pub fn covers(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Code for a value in a covered column; -1 for unseen values
    pub fn code_for(&self, column: &str, value: &str) -> Option<i64> {
        self.columns
            .get(column)
            .map(|codes| codes.get(value).copied().unwrap_or(-1))
    }

    /// Number of mapped columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no columns are mapped
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Assign codes to the distinct values of one column, sorted
/// lexicographically and numbered from 0. Codes are stable for a given set
/// of values but not across tables with different value sets.
fn local_codes(cells: &[Value]) -> HashMap<&str, i64> {
    let distinct: BTreeSet<&str> = cells.iter().filter_map(Value::as_text).collect();
    distinct
        .into_iter()
        .enumerate()
        .map(|(code, value)| (value, code as i64))
        .collect()
}

/// Replace every text column's values with integer codes, in place.
///
/// Columns covered by `map` use the fixed training-time codes; the rest fall
/// back to per-table local assignment.
pub fn encode_categoricals(table: &mut Table, map: Option<&CategoryMap>) {
    let text_columns: Vec<String> = table
        .columns()
        .iter()
        .filter(|c| c.is_text())
        .map(|c| c.name().to_string())
        .collect();

    for name in text_columns {
        let Some(column) = table.column(&name) else {
            continue;
        };

        let codes: Vec<Value> = match map.filter(|m| m.covers(&name)) {
            Some(m) => column
                .cells()
                .iter()
                .map(|cell| {
                    let code = cell
                        .as_text()
                        .and_then(|text| m.code_for(&name, text))
                        .unwrap_or(-1);
                    Value::Int(code)
                })
                .collect(),
            None => {
                let local = local_codes(column.cells());
                column
                    .cells()
                    .iter()
                    .map(|cell| {
                        let code = cell.as_text().and_then(|t| local.get(t).copied()).unwrap_or(-1);
                        Value::Int(code)
                    })
                    .collect()
            }
        };

        if let Err(e) = table.replace_column(&name, codes) {
            debug!("Skipping encode for column {}: {}", name, e);
        }
    }
}
