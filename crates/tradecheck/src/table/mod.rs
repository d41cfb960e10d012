//! In-memory table model.

mod types;
mod value;

pub use types::ColumnType;
pub use value::Value;

use crate::error::{Result, TradecheckError};

/// Name and type of a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// An immutable tabular snapshot: ordered named columns plus rows of values.
///
/// Invariant: every row holds exactly one value (possibly [`Value::Null`])
/// per declared column. Rows are padded or truncated on insert.
#[derive(Debug, Clone)]
pub struct Table {
    /// Table name, used in log messages and errors.
    pub name: String,
    /// Column definitions in declaration order.
    pub columns: Vec<ColumnDef>,
    /// Row data in row-major order.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding missing cells with null and truncating extras.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        let expected = self.columns.len();
        while row.len() < expected {
            row.push(Value::Null);
        }
        row.truncate(expected);
        self.rows.push(row);
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Position of a column by name, or `ColumnNotFound`.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| TradecheckError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Declared type of a column by index.
    pub fn column_type(&self, index: usize) -> ColumnType {
        self.columns.get(index).map(|c| c.ty).unwrap_or_default()
    }

    /// Iterate over all values of a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        static NULL: Value = Value::Null;
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&NULL))
    }

    /// New table containing only rows whose flag is false, preserving order.
    ///
    /// Flags shorter than the row count leave trailing rows unflagged.
    pub fn retain_rows(&self, flagged: &[bool]) -> Table {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| !flagged.get(*i).copied().unwrap_or(false))
            .map(|(_, row)| row.clone())
            .collect();
        Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table = Table::new(
            "users",
            vec![
                ColumnDef::new("id", ColumnType::Integer),
                ColumnDef::new("currency", ColumnType::Text),
            ],
        );
        table.push_row(vec![Value::Int(1), Value::Text("USD".into())]);
        table.push_row(vec![Value::Int(2), Value::Text("EUR".into())]);
        table
    }

    #[test]
    fn test_column_lookup() {
        let table = sample_table();
        assert_eq!(table.column_index("currency"), Some(1));
        assert_eq!(table.column_index("missing"), None);
        assert!(table.require_column("id").is_ok());
    }

    #[test]
    fn test_require_column_names_table_and_column() {
        let table = sample_table();
        let err = table.require_column("volume").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("volume"));
        assert!(message.contains("users"));
    }

    #[test]
    fn test_push_row_pads_and_truncates() {
        let mut table = sample_table();
        table.push_row(vec![Value::Int(3)]);
        table.push_row(vec![
            Value::Int(4),
            Value::Text("GBP".into()),
            Value::Int(99),
        ]);
        assert_eq!(table.rows[2], vec![Value::Int(3), Value::Null]);
        assert_eq!(table.rows[3].len(), 2);
    }

    #[test]
    fn test_retain_rows() {
        let table = sample_table();
        let kept = table.retain_rows(&[true, false]);
        assert_eq!(kept.row_count(), 1);
        assert_eq!(kept.rows[0][0], Value::Int(2));
    }
}
