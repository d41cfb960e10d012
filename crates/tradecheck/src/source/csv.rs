//! CSV-backed data source with per-column type inference.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use indexmap::IndexMap;

use crate::error::{Result, TradecheckError};
use crate::table::{ColumnDef, ColumnType, Table, Value};

use super::DataSource;

/// Maps table names to CSV files, for offline runs and tests.
///
/// The query text is ignored; the file registered under the requested table
/// name is parsed in full. Column types are inferred from content.
#[derive(Debug, Default)]
pub struct CsvSource {
    tables: IndexMap<String, PathBuf>,
}

impl CsvSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a CSV file under a table name.
    pub fn with_table(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.tables.insert(name.into(), path.into());
        self
    }
}

impl DataSource for CsvSource {
    fn fetch(&mut self, name: &str, _query: &str) -> Result<Table> {
        let path = self
            .tables
            .get(name)
            .ok_or_else(|| TradecheckError::Query {
                table: name.to_string(),
                message: "no CSV file registered for this table".to_string(),
            })?
            .clone();
        read_csv(name, &path)
    }
}

/// Parse a CSV file into a typed table.
pub fn read_csv(name: &str, path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|e| TradecheckError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        raw_rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    let types: Vec<ColumnType> = (0..headers.len())
        .map(|col| infer_column_type(&raw_rows, col))
        .collect();

    let columns = headers
        .iter()
        .zip(&types)
        .map(|(name, ty)| ColumnDef::new(name, *ty))
        .collect();

    let mut table = Table::new(name, columns);
    for raw in raw_rows {
        let row = raw
            .iter()
            .enumerate()
            .map(|(col, cell)| convert_cell(cell, types.get(col).copied().unwrap_or_default()))
            .collect();
        table.push_row(row);
    }
    Ok(table)
}

/// Check if a raw cell represents a missing/null value.
fn is_null_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
}

/// Infer a column type from its non-null cells.
///
/// Precedence: integer, float, boolean, timestamp, text. A column with no
/// non-null cells stays [`ColumnType::Unknown`].
fn infer_column_type(rows: &[Vec<String>], col: usize) -> ColumnType {
    let cells: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get(col).map(|s| s.trim()))
        .filter(|s| !is_null_token(s))
        .collect();

    if cells.is_empty() {
        return ColumnType::Unknown;
    }
    if cells.iter().all(|c| c.parse::<i64>().is_ok()) {
        return ColumnType::Integer;
    }
    if cells.iter().all(|c| c.parse::<f64>().is_ok()) {
        return ColumnType::Float;
    }
    if cells
        .iter()
        .all(|c| c.eq_ignore_ascii_case("true") || c.eq_ignore_ascii_case("false"))
    {
        return ColumnType::Boolean;
    }
    if cells.iter().all(|c| parse_timestamp(c).is_some()) {
        return ColumnType::Timestamp;
    }
    ColumnType::Text
}

fn convert_cell(cell: &str, ty: ColumnType) -> Value {
    let trimmed = cell.trim();
    if is_null_token(trimmed) {
        return Value::Null;
    }
    match ty {
        ColumnType::Integer => trimmed
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or(Value::Null),
        ColumnType::Float => trimmed
            .parse::<f64>()
            .map(Value::Float)
            .unwrap_or(Value::Null),
        ColumnType::Boolean => Value::Bool(trimmed.eq_ignore_ascii_case("true")),
        ColumnType::Timestamp => parse_timestamp(trimmed)
            .map(Value::Timestamp)
            .unwrap_or(Value::Null),
        ColumnType::Text | ColumnType::Unknown => Value::Text(trimmed.to_string()),
    }
}

/// Parse a timestamp in `YYYY-MM-DD HH:MM:SS`, RFC 3339, or `YYYY-MM-DD` form.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ndt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}
