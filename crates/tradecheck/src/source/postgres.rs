//! PostgreSQL-backed data source.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use postgres::types::Type;
use postgres::{Client, NoTls, Row};
use tracing::{debug, error};

use crate::error::{Result, TradecheckError};
use crate::table::{ColumnDef, ColumnType, Table, Value};

use super::DataSource;

/// Connection parameters for a PostgreSQL database.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

/// Synchronous Postgres source holding at most one live connection.
///
/// The connection is acquired lazily on first fetch, reused for the run,
/// and released by [`PostgresSource::close`] (or on drop).
pub struct PostgresSource {
    config: PostgresConfig,
    client: Option<Client>,
}

impl PostgresSource {
    pub fn new(config: PostgresConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Establish the connection if none is open. Idempotent.
    fn ensure_connected(&mut self) -> Result<&mut Client> {
        if self.client.is_none() {
            let mut pg = postgres::Config::new();
            pg.host(&self.config.host)
                .port(self.config.port)
                .dbname(&self.config.dbname)
                .user(&self.config.user)
                .password(&self.config.password);

            let client = pg.connect(NoTls).map_err(|e| {
                error!(host = %self.config.host, "failed to connect: {e}");
                TradecheckError::Connection {
                    message: e.to_string(),
                }
            })?;
            debug!(host = %self.config.host, dbname = %self.config.dbname, "connection established");
            self.client = Some(client);
        }
        Ok(self.client.as_mut().expect("connection just established"))
    }

    /// Close the connection if one is open.
    pub fn close(&mut self) {
        if self.client.take().is_some() {
            debug!("connection closed");
        }
    }
}

impl DataSource for PostgresSource {
    fn fetch(&mut self, name: &str, query: &str) -> Result<Table> {
        let client = self.ensure_connected()?;

        // A failed query surfaces as a typed error instead of an empty result.
        let rows = client.query(query, &[]).map_err(|e| TradecheckError::Query {
            table: name.to_string(),
            message: e.to_string(),
        })?;

        let columns: Vec<ColumnDef> = match rows.first() {
            Some(first) => first
                .columns()
                .iter()
                .map(|c| ColumnDef::new(c.name(), map_pg_type(c.type_())))
                .collect(),
            None => Vec::new(),
        };

        let mut table = Table::new(name, columns);
        for row in &rows {
            let values = extract_row(row).map_err(|message| TradecheckError::Query {
                table: name.to_string(),
                message,
            })?;
            table.push_row(values);
        }
        debug!(table = name, rows = table.row_count(), "table loaded");
        Ok(table)
    }
}

fn map_pg_type(ty: &Type) -> ColumnType {
    if *ty == Type::BOOL {
        ColumnType::Boolean
    } else if *ty == Type::INT2 || *ty == Type::INT4 || *ty == Type::INT8 {
        ColumnType::Integer
    } else if *ty == Type::FLOAT4 || *ty == Type::FLOAT8 {
        ColumnType::Float
    } else if *ty == Type::TIMESTAMP || *ty == Type::TIMESTAMPTZ || *ty == Type::DATE {
        ColumnType::Timestamp
    } else if *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BPCHAR {
        ColumnType::Text
    } else {
        ColumnType::Unknown
    }
}

fn extract_row(row: &Row) -> std::result::Result<Vec<Value>, String> {
    let mut values = Vec::with_capacity(row.len());
    for (idx, column) in row.columns().iter().enumerate() {
        values.push(extract_cell(row, idx, column.type_()).map_err(|e| {
            format!("column '{}' ({}): {e}", column.name(), column.type_())
        })?);
    }
    Ok(values)
}

fn extract_cell(
    row: &Row,
    idx: usize,
    ty: &Type,
) -> std::result::Result<Value, postgres::Error> {
    let value = if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx)?.map(Value::Bool)
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)?
            .map(|v| Value::Int(v as i64))
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)?
            .map(|v| Value::Int(v as i64))
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)?.map(Value::Int)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)?
            .map(|v| Value::Float(v as f64))
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)?.map(Value::Float)
    } else if *ty == Type::TIMESTAMP {
        row.try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(|ndt| Value::Timestamp(Utc.from_utc_datetime(&ndt)))
    } else if *ty == Type::TIMESTAMPTZ {
        row.try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(Value::Timestamp)
    } else if *ty == Type::DATE {
        row.try_get::<_, Option<NaiveDate>>(idx)?.map(|date| {
            let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
            Value::Timestamp(Utc.from_utc_datetime(&midnight))
        })
    } else {
        // Unmapped types fall back to their text representation.
        row.try_get::<_, Option<String>>(idx)?.map(Value::Text)
    };
    Ok(value.unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pg_type_mapping() {
        assert_eq!(map_pg_type(&Type::INT8), ColumnType::Integer);
        assert_eq!(map_pg_type(&Type::FLOAT8), ColumnType::Float);
        assert_eq!(map_pg_type(&Type::TIMESTAMP), ColumnType::Timestamp);
        assert_eq!(map_pg_type(&Type::VARCHAR), ColumnType::Text);
        assert_eq!(map_pg_type(&Type::JSONB), ColumnType::Unknown);
    }
}
