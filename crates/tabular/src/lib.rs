//! Ordered-Column Table
//!
//! Provides the small heterogeneous table type carried through the feature
//! pipeline: raw order rows in, all-numeric feature rows out.

mod table;
mod value;

pub use table::{Column, Table};
pub use value::Value;

use thiserror::Error;

/// Errors during table construction
#[derive(Debug, Clone, Error)]
pub enum TableError {
    #[error("Column {name} has {actual} cells, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("No such column: {0}")]
    MissingColumn(String),
}
