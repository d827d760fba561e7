//! Duplicate row removal.

use std::collections::HashSet;

use crate::types::{Table, Value};

/// Hashable view of a cell. Floats compare by bit pattern after folding `-0.0` into `0.0`.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Null,
    Int64(i64),
    Float64(u64),
    Bool(bool),
    Utf8(&'a str),
}

fn cell_key(v: &Value) -> CellKey<'_> {
    match v {
        Value::Null => CellKey::Null,
        Value::Int64(i) => CellKey::Int64(*i),
        Value::Float64(f) if *f == 0.0 => CellKey::Float64(0.0f64.to_bits()),
        Value::Float64(f) => CellKey::Float64(f.to_bits()),
        Value::Bool(b) => CellKey::Bool(*b),
        Value::Utf8(s) => CellKey::Utf8(s.as_str()),
    }
}

/// Returns a new [`Table`] without rows that repeat an earlier row.
///
/// Rows are compared across all columns; the first occurrence is kept and the relative order of
/// kept rows is preserved. Running it again on its own output is a no-op.
pub fn remove_duplicates(table: &Table) -> Table {
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(table.row_count());
    let mut rows = Vec::new();
    for row in &table.rows {
        if seen.insert(row.iter().map(cell_key).collect()) {
            rows.push(row.clone());
        }
    }

    Table::new(table.schema.clone(), rows)
}
