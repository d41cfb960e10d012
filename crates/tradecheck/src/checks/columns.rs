//! Column-level predicates: type conformance, mandatory presence, ordering.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;
use crate::table::{Table, Value};

/// Per-column null presence plus the aggregate verdict.
#[derive(Debug, Clone, Serialize)]
pub struct MandatoryReport {
    /// True when no requested column contains a null value.
    pub all_mandatory: bool,
    /// For each requested column, whether at least one value is null.
    pub null_status: IndexMap<String, bool>,
}

/// True iff every non-null value in the column is 0 or 1.
///
/// Null rows are excluded from the evaluation, not rejected.
pub fn is_binary_column(table: &Table, column: &str) -> Result<bool> {
    let index = table.require_column(column)?;
    Ok(table
        .column_values(index)
        .filter(|v| !v.is_null())
        .all(Value::is_binary))
}

/// True iff the column's declared element type is numeric.
pub fn is_numeric_column(table: &Table, column: &str) -> Result<bool> {
    let index = table.require_column(column)?;
    Ok(table.column_type(index).is_numeric())
}

/// True iff the column's declared element type is a date/time type.
pub fn is_timestamp_column(table: &Table, column: &str) -> Result<bool> {
    let index = table.require_column(column)?;
    Ok(table.column_type(index).is_temporal())
}

/// Report null presence for the requested columns (default: all columns).
pub fn check_mandatory_columns(
    table: &Table,
    columns: Option<&[String]>,
) -> Result<MandatoryReport> {
    let requested: Vec<String> = match columns {
        Some(names) => names.to_vec(),
        None => table.column_names().iter().map(|s| s.to_string()).collect(),
    };

    let mut null_status = IndexMap::with_capacity(requested.len());
    for name in &requested {
        let index = table.require_column(name)?;
        let has_null = table.column_values(index).any(Value::is_null);
        null_status.insert(name.clone(), has_null);
    }

    let all_mandatory = null_status.values().all(|has_null| !has_null);
    Ok(MandatoryReport {
        all_mandatory,
        null_status,
    })
}

/// True iff every row satisfies `column_a > column_b` strictly, or
/// `column_a > 0` when `column_b` is omitted.
///
/// Uses the values' native ordering (numeric or timestamp). A null on either
/// side, or an unordered pair of variants, fails that row. An empty table is
/// vacuously true.
pub fn compare_column_greater_than(
    table: &Table,
    column_a: &str,
    column_b: Option<&str>,
) -> Result<bool> {
    let index_a = table.require_column(column_a)?;
    let index_b = match column_b {
        Some(name) => Some(table.require_column(name)?),
        None => None,
    };

    let zero = Value::Int(0);
    Ok(table.rows.iter().all(|row| {
        let lhs = row.get(index_a).unwrap_or(&Value::Null);
        let rhs = match index_b {
            Some(i) => row.get(i).unwrap_or(&Value::Null),
            None => &zero,
        };
        matches!(lhs.partial_cmp(rhs), Some(std::cmp::Ordering::Greater))
    }))
}
