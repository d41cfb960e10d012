//! Declarative check descriptors and the built-in rule sets.
//!
//! Business rules are data, not code: each table gets a [`RuleSet`] of
//! [`Check`] descriptors iterated by a single generic runner, so adding a
//! table or a rule never duplicates control flow.

use serde::Serialize;
use serde_json::json;

use crate::checks::{
    KeepPolicy, check_foreign_key, check_mandatory_columns, compare_column_greater_than,
    find_duplicates, is_binary_column, is_numeric_column, is_timestamp_column,
};
use crate::error::Result;
use crate::report::{CheckOutcome, LogSink};
use crate::table::Table;

/// A single column-level or row-set check against one table.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Check {
    /// Duplicate rows under equality on the key subset (default: all columns).
    Duplicates {
        subset: Option<Vec<String>>,
        keep: KeepPolicy,
    },
    /// Every non-null value in the column is 0 or 1.
    BinaryColumn { column: String },
    /// The column's element type is numeric.
    NumericColumn { column: String },
    /// The column's element type is a date/time type.
    TimestampColumn { column: String },
    /// None of the listed columns contains a null value.
    MandatoryColumns { columns: Vec<String> },
    /// Every row satisfies `column > other` strictly.
    GreaterThanColumn { column: String, other: String },
    /// Every row satisfies `column > 0`.
    GreaterThanZero { column: String },
}

impl Check {
    /// Human-readable description of the check against the given table.
    pub fn describe(&self, table: &str) -> String {
        match self {
            Check::Duplicates { subset: None, .. } => {
                format!("Check duplicates in {table} on all columns")
            }
            Check::Duplicates {
                subset: Some(columns),
                ..
            } => format!(
                "Check duplicates in {table} on columns {}",
                quoted_list(columns)
            ),
            Check::BinaryColumn { column } => {
                format!("Check if column '{column}' only contains 0s and 1s")
            }
            Check::NumericColumn { column } => {
                format!("Check if column '{column}' is numerical")
            }
            Check::TimestampColumn { column } => {
                format!("Check if column '{column}' is of timestamp type")
            }
            Check::MandatoryColumns { columns } => {
                format!("Check if columns {} are mandatory", quoted_list(columns))
            }
            Check::GreaterThanColumn { column, other } => format!(
                "Check if column '{column}' is always greater than column '{other}'"
            ),
            Check::GreaterThanZero { column } => {
                format!("Check if column '{column}' is always greater than 0")
            }
        }
    }

    /// Execute against a table, logging the step and its result.
    ///
    /// A failing check is reported through the outcome, never an error;
    /// only contract violations (unknown column names) propagate.
    pub fn run(&self, table: &Table, step: usize, sink: &dyn LogSink) -> Result<CheckOutcome> {
        let description = self.describe(&table.name);
        sink.text(format!("{step}. {description}"));

        let outcome = match self {
            Check::Duplicates { subset, keep } => {
                let report = find_duplicates(table, subset.as_deref(), *keep)?;
                sink.text(format!("Number of duplicates found: {}", report.count));
                CheckOutcome::new(description, report.count == 0)
                    .with_detail(json!({ "duplicates": report.count }))
            }
            Check::BinaryColumn { column } => {
                let result = is_binary_column(table, column)?;
                sink.text(format!(
                    "Column '{column}' contains only 0s and 1s: {result}"
                ));
                CheckOutcome::new(description, result)
            }
            Check::NumericColumn { column } => {
                let result = is_numeric_column(table, column)?;
                sink.text(format!("Column '{column}' is of numerical type: {result}"));
                CheckOutcome::new(description, result)
            }
            Check::TimestampColumn { column } => {
                let result = is_timestamp_column(table, column)?;
                sink.text(format!("Column '{column}' is of timestamp type: {result}"));
                CheckOutcome::new(description, result)
            }
            Check::MandatoryColumns { columns } => {
                let report = check_mandatory_columns(table, Some(columns))?;
                sink.text(format!(
                    "Columns {} are mandatory: {}",
                    quoted_list(columns),
                    report.all_mandatory
                ));
                sink.text("Null status for columns:".to_string());
                sink.structured(json!(report.null_status));
                CheckOutcome::new(description, report.all_mandatory)
                    .with_detail(json!({ "null_status": report.null_status }))
            }
            Check::GreaterThanColumn { column, other } => {
                let result = compare_column_greater_than(table, column, Some(other))?;
                sink.text(format!(
                    "Column '{column}' is always greater than column '{other}': {result}"
                ));
                CheckOutcome::new(description, result)
            }
            Check::GreaterThanZero { column } => {
                let result = compare_column_greater_than(table, column, None)?;
                sink.text(format!(
                    "Column '{column}' is always greater than 0: {result}"
                ));
                CheckOutcome::new(description, result)
            }
        };

        Ok(outcome)
    }
}

/// The checks to run against a single named table.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSet {
    /// Table the rules apply to.
    pub table: String,
    /// Checks in execution order.
    pub checks: Vec<Check>,
}

/// A cross-table referential-integrity rule.
#[derive(Debug, Clone, Serialize)]
pub struct ForeignKeyRule {
    pub child_table: String,
    pub child_columns: Vec<String>,
    pub parent_table: String,
    pub parent_columns: Vec<String>,
}

impl ForeignKeyRule {
    /// Human-readable description of the rule.
    pub fn describe(&self) -> String {
        format!(
            "Check if the values of columns {} in {} table are also in {} table",
            quoted_list(&self.child_columns),
            self.child_table,
            self.parent_table
        )
    }

    /// Execute against the two tables, logging the step and its result.
    pub fn run(
        &self,
        child: &Table,
        parent: &Table,
        step: usize,
        sink: &dyn LogSink,
    ) -> Result<CheckOutcome> {
        let description = self.describe();
        sink.text(format!("{step}. {description}"));

        let report = check_foreign_key(child, &self.child_columns, parent, &self.parent_columns)?;
        sink.text(format!(
            "All values of columns {} are valid: {}",
            quoted_list(&self.child_columns),
            report.all_valid
        ));
        sink.text(format!(
            "Mismatched values of columns {}:",
            quoted_list(&self.child_columns)
        ));
        sink.structured(json!(report.mismatched));

        Ok(CheckOutcome::new(description, report.all_valid)
            .with_detail(json!({ "mismatched_keys": report.mismatched })))
    }
}

/// Built-in rules for the `users` table.
pub fn users_rules() -> RuleSet {
    RuleSet {
        table: "users".to_string(),
        checks: vec![
            Check::Duplicates {
                subset: None,
                keep: KeepPolicy::First,
            },
            Check::BinaryColumn {
                column: "enable".to_string(),
            },
            Check::MandatoryColumns {
                columns: names(&["login_hash", "server_hash", "country_hash", "currency", "enable"]),
            },
        ],
    }
}

/// Built-in rules for the `trades` table.
pub fn trades_rules() -> RuleSet {
    RuleSet {
        table: "trades".to_string(),
        checks: vec![
            Check::Duplicates {
                subset: None,
                keep: KeepPolicy::First,
            },
            Check::Duplicates {
                subset: Some(names(&["login_hash", "ticket_hash", "server_hash", "open_time"])),
                keep: KeepPolicy::First,
            },
            Check::NumericColumn {
                column: "digits".to_string(),
            },
            Check::NumericColumn {
                column: "cmd".to_string(),
            },
            Check::NumericColumn {
                column: "volume".to_string(),
            },
            Check::BinaryColumn {
                column: "cmd".to_string(),
            },
            Check::TimestampColumn {
                column: "open_time".to_string(),
            },
            Check::TimestampColumn {
                column: "close_time".to_string(),
            },
            Check::MandatoryColumns {
                columns: names(&[
                    "login_hash",
                    "ticket_hash",
                    "server_hash",
                    "symbol",
                    "digits",
                    "cmd",
                    "volume",
                    "open_time",
                    "open_price",
                    "contractsize",
                ]),
            },
            Check::GreaterThanZero {
                column: "volume".to_string(),
            },
            Check::GreaterThanColumn {
                column: "close_time".to_string(),
                other: "open_time".to_string(),
            },
        ],
    }
}

/// Built-in cross-reference rule: trade keys must exist among users.
pub fn trades_to_users_fk() -> ForeignKeyRule {
    ForeignKeyRule {
        child_table: "trades".to_string(),
        child_columns: names(&["login_hash", "server_hash"]),
        parent_table: "users".to_string(),
        parent_columns: names(&["login_hash", "server_hash"]),
    }
}

fn names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn quoted_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
