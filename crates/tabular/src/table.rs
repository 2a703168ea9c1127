//! Table Implementation

use crate::{TableError, Value};
use serde::{Deserialize, Serialize};

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    cells: Vec<Value>,
}

impl Column {
    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cells, one per row
    pub fn cells(&self) -> &[Value] {
        &self.cells
    }

    /// Whether every cell is numeric
    pub fn is_numeric(&self) -> bool {
        self.cells.iter().all(Value::is_numeric)
    }

    /// Whether every cell is text
    pub fn is_text(&self) -> bool {
        self.cells.iter().all(|c| matches!(c, Value::Text(_)))
    }
}

/// Ordered collection of equally-sized columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a one-row table from (name, value) pairs, preserving order
    pub fn single_row<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let columns = pairs
            .into_iter()
            .map(|(name, value)| Column {
                name: name.into(),
                cells: vec![value],
            })
            .collect();
        Self { columns }
    }

    /// Number of rows (0 for an empty table)
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Columns in table order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Append a column at the end of the table
    pub fn push_column<S: Into<String>>(
        &mut self,
        name: S,
        cells: Vec<Value>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if self.column(&name).is_some() {
            return Err(TableError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && cells.len() != self.n_rows() {
            return Err(TableError::RaggedColumn {
                name,
                expected: self.n_rows(),
                actual: cells.len(),
            });
        }
        self.columns.push(Column { name, cells });
        Ok(())
    }

    /// Replace an existing column's cells in place, keeping its position
    pub fn replace_column(&mut self, name: &str, cells: Vec<Value>) -> Result<(), TableError> {
        let n_rows = self.n_rows();
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(col) if cells.len() == n_rows => {
                col.cells = cells;
                Ok(())
            }
            Some(_) => Err(TableError::RaggedColumn {
                name: name.to_string(),
                expected: n_rows,
                actual: cells.len(),
            }),
            None => Err(TableError::MissingColumn(name.to_string())),
        }
    }

    /// Remove a column by name; returns whether it existed
    pub fn drop_column(&mut self, name: &str) -> bool {
        let before = self.columns.len();
        self.columns.retain(|c| c.name != name);
        self.columns.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row_preserves_order() {
        let table = Table::single_row([
            ("Agent_Age", Value::Int(30)),
            ("Weather", Value::from("Sunny")),
            ("Distance_km", Value::Float(5.0)),
        ]);
        assert_eq!(table.n_rows(), 1);
        assert_eq!(
            table.column_names(),
            vec!["Agent_Age", "Weather", "Distance_km"]
        );
    }

    #[test]
    fn test_push_rejects_ragged_column() {
        let mut table = Table::single_row([("a", Value::Int(1))]);
        let err = table.push_column("b", vec![Value::Int(1), Value::Int(2)]);
        assert!(matches!(err, Err(TableError::RaggedColumn { .. })));
    }

    #[test]
    fn test_push_rejects_duplicate_name() {
        let mut table = Table::single_row([("a", Value::Int(1))]);
        let err = table.push_column("a", vec![Value::Int(2)]);
        assert!(matches!(err, Err(TableError::DuplicateColumn(_))));
    }

    #[test]
    fn test_drop_column() {
        let mut table = Table::single_row([("a", Value::Int(1)), ("b", Value::Int(2))]);
        assert!(table.drop_column("a"));
        assert!(!table.drop_column("a"));
        assert_eq!(table.column_names(), vec!["b"]);
    }

    #[test]
    fn test_replace_column_keeps_position() {
        let mut table = Table::single_row([("a", Value::from("Low")), ("b", Value::Int(2))]);
        table.replace_column("a", vec![Value::Int(0)]).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.column("a").unwrap().cells()[0], Value::Int(0));
    }
}
