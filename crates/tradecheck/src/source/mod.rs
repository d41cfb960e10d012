//! Data-source collaborators that materialize tables.

mod csv;
mod postgres;

pub use csv::CsvSource;
pub use postgres::{PostgresConfig, PostgresSource};

use crate::error::Result;
use crate::table::Table;

/// A collaborator that, given a query, returns a materialized table.
///
/// `name` labels the resulting table for log messages and errors; the query
/// text is interpreted by the implementation (SQL for Postgres, ignored by
/// file-backed sources).
pub trait DataSource {
    fn fetch(&mut self, name: &str, query: &str) -> Result<Table>;
}
