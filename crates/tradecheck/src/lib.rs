//! Tradecheck: data-quality validation for trading platform tables.
//!
//! Tradecheck loads the `users` and `trades` tables from a relational store
//! (or CSV files) and runs a fixed battery of column-level and cross-table
//! checks, logging every step and result to a timestamped sink.
//!
//! # Design
//!
//! - **Declarative rules**: business rules are [`rules::Check`] descriptors
//!   iterated by one generic runner, not bespoke code per table
//! - **Immutable snapshots**: checks never mutate a table; duplicate
//!   dropping produces a new table value
//! - **Typed failures**: a failed query surfaces as an error, never as a
//!   silently absent table
//!
//! # Example
//!
//! ```no_run
//! use tradecheck::report::ConsoleSink;
//! use tradecheck::runner::QaRunner;
//! use tradecheck::source::CsvSource;
//!
//! let mut source = CsvSource::new()
//!     .with_table("users", "users.csv")
//!     .with_table("trades", "trades.csv");
//!
//! let report = QaRunner::new().run(&mut source, &ConsoleSink).unwrap();
//! println!("{} of {} checks passed", report.summary.passed, report.summary.total);
//! ```

pub mod checks;
pub mod error;
pub mod report;
pub mod rules;
pub mod runner;
pub mod source;
pub mod table;

pub use checks::{DuplicateReport, ForeignKeyReport, KeepPolicy, MandatoryReport};
pub use error::{Result, TradecheckError};
pub use report::{CheckOutcome, ConsoleSink, LogMessage, LogSink, MemorySink, RunSummary};
pub use rules::{Check, ForeignKeyRule, RuleSet};
pub use runner::{QaConfig, QaReport, QaRunner};
pub use source::{CsvSource, DataSource, PostgresConfig, PostgresSource};
pub use table::{ColumnDef, ColumnType, Table, Value};
