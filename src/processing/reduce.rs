//! Reduction operations for [`crate::types::Table`] columns.

use crate::types::{DataType, Table, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Count null cells.
    NullCount,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Arithmetic mean of numeric values, ignoring nulls. Always a `Float64`.
    Mean,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For `Sum`/`Mean`, returns `Some(Value::Null)` if there are no non-null values or the column
///   is not numeric.
/// - For `Count`/`NullCount`, always returns `Some(Value::Int64(..))`.
pub fn reduce(table: &Table, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = table.schema.index_of(column)?;
    let data_type = table.schema.fields.get(idx)?.data_type;

    let out = match op {
        ReduceOp::Count => Value::Int64(table.row_count() as i64),
        ReduceOp::NullCount => Value::Int64(table.column(idx).filter(|v| v.is_null()).count() as i64),
        ReduceOp::Sum | ReduceOp::Mean => reduce_numeric(table, idx, data_type, op),
    };
    Some(out)
}

fn reduce_numeric(table: &Table, idx: usize, data_type: DataType, op: ReduceOp) -> Value {
    match data_type {
        DataType::Int64 => {
            // i128 cannot overflow for any realistic row count of i64 values.
            let mut acc: Option<(i128, usize)> = None;
            for v in table.column(idx) {
                if let Value::Int64(v) = v {
                    let (sum, n) = acc.unwrap_or((0, 0));
                    acc = Some((sum + *v as i128, n + 1));
                }
            }
            match (op, acc) {
                (_, None) => Value::Null,
                (ReduceOp::Sum, Some((sum, _))) => match i64::try_from(sum) {
                    Ok(s) => Value::Int64(s),
                    Err(_) => Value::Float64(sum as f64),
                },
                (_, Some((sum, n))) => Value::Float64(sum as f64 / n as f64),
            }
        }
        DataType::Float64 => {
            let values = table.column(idx).filter_map(|v| match v {
                Value::Float64(v) => Some(*v),
                _ => None,
            });
            let mut acc: Option<(f64, usize)> = None;
            for v in values {
                let (total, n) = acc.unwrap_or((0.0, 0));
                let n = n + 1;
                // Mean: running average, finite for any finite inputs.
                let total = match op {
                    ReduceOp::Sum => total + v,
                    _ => total + (v - total) / n as f64,
                };
                acc = Some((total, n));
            }
            match acc {
                None => Value::Null,
                Some((total, _)) => Value::Float64(total),
            }
        }
        _ => Value::Null,
    }
}
