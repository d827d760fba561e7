//! Core data model types.
//!
//! Uploaded files are loaded into an in-memory [`Table`]: an ordered list of typed [`Field`]s
//! (the [`Schema`]) plus row-major [`Value`] storage.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SweepError, SweepResult};

/// Number of rows shown by a default preview (see [`Table::head`]).
pub const PREVIEW_ROWS: usize = 5;

/// Logical data type of a column, decided once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl DataType {
    /// `true` for `Int64` and `Float64`.
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }
}

/// A single named, typed column in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Column data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value; `None` for nulls and non-numeric values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. Every row
/// has exactly one cell per field, so the row count is well-defined even for a table with zero
/// columns (its rows are empty vectors).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from schema and rows without checking row widths.
    ///
    /// Use [`Table::try_new`] for rows that come from outside the crate.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Create a table, rejecting rows whose width differs from the schema.
    pub fn try_new(schema: Schema, rows: Vec<Vec<Value>>) -> SweepResult<Self> {
        let width = schema.fields.len();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(SweepError::malformed(format!(
                "row {idx} has {} cells, expected {width}",
                row.len()
            )));
        }
        Ok(Self { schema, rows })
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the table.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.schema.field_names().map(str::to_owned).collect()
    }

    /// Iterate the cells of column `idx` top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Names of the numeric (`Int64`/`Float64`) columns, in order.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.schema
            .fields
            .iter()
            .filter(|f| f.data_type.is_numeric())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Copy of the first `n` rows, for previews.
    pub fn head(&self, n: usize) -> Self {
        Self {
            schema: self.schema.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// Supported tabular encodings, used both as load source and conversion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TableFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Office Open XML workbook (single worksheet).
    Xlsx,
}

impl TableFormat {
    /// Parse a format from a file extension (case-insensitive, with or without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// Infer the format from a file name's extension.
    pub fn from_file_name(name: &str) -> SweepResult<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SweepError::unsupported(format!("'{name}' has no file extension")))?;
        Self::from_extension(ext)
            .ok_or_else(|| SweepError::unsupported(format!("extension '.{ext}' of '{name}'")))
    }

    /// File extension (without the dot) used for converted output.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// MIME type offered alongside converted output.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Accepts extensions (`csv`, `.xlsx`) and the labels a UI typically shows (`CSV`, `Excel`).
impl FromStr for TableFormat {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.eq_ignore_ascii_case("excel") {
            return Ok(Self::Xlsx);
        }
        Self::from_extension(label).ok_or_else(|| SweepError::unsupported(label))
    }
}

impl TryFrom<String> for TableFormat {
    type Error = SweepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TableFormat> for String {
    fn from(value: TableFormat) -> Self {
        value.extension().to_owned()
    }
}
