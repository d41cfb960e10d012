//! Reusable validation primitives over in-memory tables.

mod columns;
mod duplicates;
mod foreign_key;

pub use columns::{
    MandatoryReport, check_mandatory_columns, compare_column_greater_than, is_binary_column,
    is_numeric_column, is_timestamp_column,
};
pub use duplicates::{DuplicateReport, KeepPolicy, drop_duplicates, find_duplicates};
pub use foreign_key::{ForeignKeyReport, check_foreign_key};
