//! Duplicate row detection and removal.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::{Table, Value};

/// Which occurrence within a group of equal keys survives unflagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepPolicy {
    /// Flag all but the first occurrence (by original row order).
    First,
    /// Flag all but the last occurrence.
    Last,
    /// Flag every row belonging to a group with more than one member.
    None,
}

/// Per-row duplicate flags plus the count of flagged rows.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    /// One flag per row, in original row order.
    pub flags: Vec<bool>,
    /// Number of flagged rows.
    pub count: usize,
}

/// Flag duplicate rows under equality on the key subset.
///
/// `subset = None` groups on all columns. Rows group by structural equality
/// of the projected values; null equals null for grouping purposes.
pub fn find_duplicates(
    table: &Table,
    subset: Option<&[String]>,
    keep: KeepPolicy,
) -> Result<DuplicateReport> {
    let key_indices: Vec<usize> = match subset {
        Some(names) => names
            .iter()
            .map(|name| table.require_column(name))
            .collect::<Result<_>>()?,
        None => (0..table.column_count()).collect(),
    };

    let mut groups: IndexMap<Vec<Value>, Vec<usize>> = IndexMap::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        let key: Vec<Value> = key_indices
            .iter()
            .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
            .collect();
        groups.entry(key).or_default().push(row_idx);
    }

    let mut flags = vec![false; table.row_count()];
    for members in groups.values() {
        if members.len() < 2 {
            continue;
        }
        let survivor = match keep {
            KeepPolicy::First => Some(members[0]),
            KeepPolicy::Last => Some(members[members.len() - 1]),
            KeepPolicy::None => Option::None,
        };
        for &row_idx in members {
            if Some(row_idx) != survivor {
                flags[row_idx] = true;
            }
        }
    }

    let count = flags.iter().filter(|&&f| f).count();
    Ok(DuplicateReport { flags, count })
}

/// Remove flagged duplicates, returning the cleaned table and the report.
///
/// Row order is preserved. Re-running the check on the cleaned table with
/// the same key subset yields a zero count.
pub fn drop_duplicates(
    table: &Table,
    subset: Option<&[String]>,
    keep: KeepPolicy,
) -> Result<(Table, DuplicateReport)> {
    let report = find_duplicates(table, subset, keep)?;
    let cleaned = table.retain_rows(&report.flags);
    Ok((cleaned, report))
}
