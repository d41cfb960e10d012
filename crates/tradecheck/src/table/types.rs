//! Column type definitions.

use serde::{Deserialize, Serialize};

/// Declared or inferred element type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Text/string values.
    Text,
    /// Date and/or time values.
    Timestamp,
    /// Unable to determine type.
    Unknown,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Timestamp)
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Unknown
    }
}
