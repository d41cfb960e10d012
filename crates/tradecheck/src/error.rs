//! Error types for the tradecheck library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tradecheck operations.
#[derive(Debug, Error)]
pub enum TradecheckError {
    /// A requested column name is absent from a table's declared columns.
    #[error("column '{column}' does not exist in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Foreign-key and primary-key column lists have different lengths.
    #[error("foreign key arity mismatch: {child} child column(s) vs {parent} parent column(s)")]
    KeyArityMismatch { child: usize, parent: usize },

    /// Failure to establish a data-source connection.
    #[error("connection error: {message}")]
    Connection { message: String },

    /// A query failed during execution.
    #[error("query against '{table}' failed: {message}")]
    Query { table: String, message: String },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tradecheck operations.
pub type Result<T> = std::result::Result<T, TradecheckError>;
