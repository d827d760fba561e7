//! Chart-ready numeric series.
//!
//! The presentation layer draws a bar chart of the first few numeric columns; this module only
//! extracts that data.

use crate::types::Table;

/// Default number of numeric columns offered for charting.
pub const CHART_COLUMNS: usize = 2;

/// One numeric column as `f64` values, nulls kept as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// The first `limit` numeric columns of `table`, in column order.
pub fn numeric_series(table: &Table, limit: usize) -> Vec<NumericSeries> {
    table
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.data_type.is_numeric())
        .take(limit)
        .map(|(idx, f)| NumericSeries {
            name: f.name.clone(),
            values: table.column(idx).map(|v| v.as_f64()).collect(),
        })
        .collect()
}
