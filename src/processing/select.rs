//! Column projection.

use std::collections::HashSet;

use crate::error::{SweepError, SweepResult};
use crate::types::{Schema, Table, Value};

/// Returns a new [`Table`] with exactly the requested columns, in the requested order.
///
/// `columns` is treated as an ordered set: a name listed twice keeps its first position. The
/// row count is always preserved, even when no column is selected. Naming a column that does not
/// exist fails with [`SweepError::UnknownColumn`]. A row too short for a selected column gets
/// a null in that position.
pub fn select_columns<S: AsRef<str>>(table: &Table, columns: &[S]) -> SweepResult<Table> {
    let mut requested: HashSet<&str> = HashSet::with_capacity(columns.len());
    let mut idxs: Vec<usize> = Vec::with_capacity(columns.len());

    for name in columns.iter().map(AsRef::as_ref) {
        if !requested.insert(name) {
            continue;
        }
        match table.schema.index_of(name) {
            Some(idx) => idxs.push(idx),
            None => {
                return Err(SweepError::UnknownColumn {
                    column: name.to_owned(),
                    available: table.column_names(),
                });
            }
        }
    }

    let schema = Schema::new(
        idxs.iter()
            .map(|&i| table.schema.fields[i].clone())
            .collect(),
    );
    let rows = table
        .rows
        .iter()
        .map(|row| {
            idxs.iter()
                .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(Table::new(schema, rows))
}
