//! Referential-integrity checking between two tables.

use indexmap::IndexSet;
use serde::Serialize;

use crate::error::{Result, TradecheckError};
use crate::table::{Table, Value};

/// Result of a foreign-key check.
#[derive(Debug, Clone, Serialize)]
pub struct ForeignKeyReport {
    /// True when every child key tuple exists among the parent key tuples.
    pub all_valid: bool,
    /// Distinct child key tuples absent from the parent, in first-seen order.
    pub mismatched: Vec<Vec<Value>>,
}

/// Compare the child table's key tuples against the parent table's.
///
/// Column lists correspond positionally and must have equal length. Tuples
/// are matched as sets (duplicates collapse, no row back-reference); a null
/// component is an ordinary tuple member and matches null on the other side.
pub fn check_foreign_key(
    child: &Table,
    child_columns: &[String],
    parent: &Table,
    parent_columns: &[String],
) -> Result<ForeignKeyReport> {
    if child_columns.len() != parent_columns.len() {
        return Err(TradecheckError::KeyArityMismatch {
            child: child_columns.len(),
            parent: parent_columns.len(),
        });
    }

    let child_indices: Vec<usize> = child_columns
        .iter()
        .map(|name| child.require_column(name))
        .collect::<Result<_>>()?;
    let parent_indices: Vec<usize> = parent_columns
        .iter()
        .map(|name| parent.require_column(name))
        .collect::<Result<_>>()?;

    let valid_keys: IndexSet<Vec<Value>> = parent
        .rows
        .iter()
        .map(|row| project(row, &parent_indices))
        .collect();

    let child_keys: IndexSet<Vec<Value>> = child
        .rows
        .iter()
        .map(|row| project(row, &child_indices))
        .collect();

    let mismatched: Vec<Vec<Value>> = child_keys
        .into_iter()
        .filter(|key| !valid_keys.contains(key))
        .collect();

    Ok(ForeignKeyReport {
        all_valid: mismatched.is_empty(),
        mismatched,
    })
}

fn project(row: &[Value], indices: &[usize]) -> Vec<Value> {
    indices
        .iter()
        .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnDef, ColumnType};

    fn keyed_table(name: &str, keys: Vec<(i64, &str)>) -> Table {
        let mut table = Table::new(
            name,
            vec![
                ColumnDef::new("login_hash", ColumnType::Integer),
                ColumnDef::new("server_hash", ColumnType::Text),
            ],
        );
        for (login, server) in keys {
            table.push_row(vec![Value::Int(login), Value::Text(server.into())]);
        }
        table
    }

    fn key_columns() -> Vec<String> {
        vec!["login_hash".to_string(), "server_hash".to_string()]
    }

    #[test]
    fn test_mismatched_tuples_are_reported() {
        let child = keyed_table("trades", vec![(1, "A"), (2, "B"), (3, "A")]);
        let parent = keyed_table("users", vec![(1, "A"), (2, "B")]);

        let report = check_foreign_key(&child, &key_columns(), &parent, &key_columns()).unwrap();
        assert!(!report.all_valid);
        assert_eq!(
            report.mismatched,
            vec![vec![Value::Int(3), Value::Text("A".into())]]
        );
    }

    #[test]
    fn test_all_tuples_valid() {
        let child = keyed_table("trades", vec![(1, "A"), (1, "A"), (2, "B")]);
        let parent = keyed_table("users", vec![(1, "A"), (2, "B"), (3, "C")]);

        let report = check_foreign_key(&child, &key_columns(), &parent, &key_columns()).unwrap();
        assert!(report.all_valid);
        assert!(report.mismatched.is_empty());
    }

    #[test]
    fn test_empty_child_is_vacuously_valid() {
        let child = keyed_table("trades", vec![]);
        let parent = keyed_table("users", vec![(1, "A")]);

        let report = check_foreign_key(&child, &key_columns(), &parent, &key_columns()).unwrap();
        assert!(report.all_valid);
        assert!(report.mismatched.is_empty());
    }

    #[test]
    fn test_duplicate_mismatches_collapse() {
        let child = keyed_table("trades", vec![(9, "Z"), (9, "Z"), (9, "Z")]);
        let parent = keyed_table("users", vec![(1, "A")]);

        let report = check_foreign_key(&child, &key_columns(), &parent, &key_columns()).unwrap();
        assert_eq!(report.mismatched.len(), 1);
    }

    #[test]
    fn test_null_components_match_null() {
        let mut child = keyed_table("trades", vec![]);
        child.push_row(vec![Value::Null, Value::Text("A".into())]);
        let mut parent = keyed_table("users", vec![]);
        parent.push_row(vec![Value::Null, Value::Text("A".into())]);

        let report = check_foreign_key(&child, &key_columns(), &parent, &key_columns()).unwrap();
        assert!(report.all_valid);
    }

    #[test]
    fn test_arity_mismatch() {
        let child = keyed_table("trades", vec![(1, "A")]);
        let parent = keyed_table("users", vec![(1, "A")]);
        let single = vec!["login_hash".to_string()];

        let err = check_foreign_key(&child, &key_columns(), &parent, &single).unwrap_err();
        assert!(matches!(
            err,
            TradecheckError::KeyArityMismatch {
                child: 2,
                parent: 1
            }
        ));
    }

    #[test]
    fn test_missing_column_names_offender() {
        let child = keyed_table("trades", vec![(1, "A")]);
        let parent = keyed_table("users", vec![(1, "A")]);
        let bad = vec!["login_hash".to_string(), "country_hash".to_string()];

        let err = check_foreign_key(&child, &key_columns(), &parent, &bad).unwrap_err();
        assert!(err.to_string().contains("country_hash"));
        assert!(err.to_string().contains("users"));
    }
}
