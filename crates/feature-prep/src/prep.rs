//! Preprocessing Pipeline

use crate::datetime::expand_datetime_columns;
use crate::encode::{encode_categoricals, CategoryMap};
use tabular::Table;
use tracing::debug;

/// Runs the raw-row-to-numeric-row transformation.
///
/// Holds the optional training-time category map; without it, categorical
/// codes are assigned locally per table.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    categories: Option<CategoryMap>,
}

impl Preprocessor {
    /// Preprocessor with local per-table categorical encoding
    pub fn new() -> Self {
        Self::default()
    }

    /// Preprocessor using fixed training-time category codes
    pub fn with_categories(categories: CategoryMap) -> Self {
        Self {
            categories: Some(categories),
        }
    }

    /// Whether a fixed category map is in use
    pub fn has_categories(&self) -> bool {
        self.categories.is_some()
    }

    /// Produce the all-numeric table: datetime-named columns replaced by
    /// derived calendar features, text columns replaced by integer codes.
    /// Never fails; unparseable datetime columns are silently dropped.
    pub fn run(&self, raw: &Table) -> Table {
        let mut table = raw.clone();
        expand_datetime_columns(&mut table);
        encode_categoricals(&mut table, self.categories.as_ref());
        debug!(
            "Preprocessed {} raw columns into {} numeric columns",
            raw.n_cols(),
            table.n_cols()
        );
        table
    }
}
