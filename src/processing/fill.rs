//! Mean imputation for numeric columns.
//!
//! Policies:
//!
//! - Only `Int64`/`Float64` columns are touched; every other column keeps its nulls.
//! - A numeric column with no non-null values has no mean and keeps its nulls.
//! - An `Int64` column whose mean is a whole number stays `Int64`. Otherwise the column is
//!   promoted to `Float64` (existing values converted) before it is filled.

use crate::types::{DataType, Table, Value};

use super::reduce::{reduce, ReduceOp};

/// What [`fill_missing_numeric_with_report`] changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    /// Number of null cells replaced.
    pub cells_filled: usize,
    /// `(column, mean)` for every column that had nulls replaced.
    pub filled_columns: Vec<(String, f64)>,
    /// Numeric columns left with nulls because they had no non-null value.
    pub unfilled_columns: Vec<String>,
}

/// Replace nulls in numeric columns with the column mean.
///
/// See the module docs for the exact policies. Running it twice gives the same table as running
/// it once.
pub fn fill_missing_numeric(table: &Table) -> Table {
    fill_missing_numeric_with_report(table).0
}

/// Like [`fill_missing_numeric`], also returning a [`FillReport`].
pub fn fill_missing_numeric_with_report(table: &Table) -> (Table, FillReport) {
    let mut out = table.clone();
    let mut report = FillReport::default();

    for (idx, field) in table.schema.fields.iter().enumerate() {
        if !field.data_type.is_numeric() {
            continue;
        }
        let nulls = table.column(idx).filter(|v| v.is_null()).count();
        if nulls == 0 {
            continue;
        }
        let mean = match reduce(table, &field.name, ReduceOp::Mean) {
            Some(Value::Float64(m)) => m,
            _ => {
                report.unfilled_columns.push(field.name.clone());
                continue;
            }
        };

        let fill = match field.data_type {
            DataType::Int64 if mean.fract() == 0.0 => Value::Int64(mean as i64),
            DataType::Int64 => {
                promote_to_float(&mut out, idx);
                Value::Float64(mean)
            }
            _ => Value::Float64(mean),
        };

        for row in &mut out.rows {
            if let Some(cell) = row.get_mut(idx) {
                if cell.is_null() {
                    *cell = fill.clone();
                }
            }
        }

        report.cells_filled += nulls;
        report.filled_columns.push((field.name.clone(), mean));
    }

    (out, report)
}

fn promote_to_float(table: &mut Table, idx: usize) {
    table.schema.fields[idx].data_type = DataType::Float64;
    for row in &mut table.rows {
        if let Some(cell) = row.get_mut(idx) {
            if let Value::Int64(v) = *cell {
                *cell = Value::Float64(v as f64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, Schema};

    fn single(name: &str, dt: DataType, values: Vec<Value>) -> Table {
        let schema = Schema::new(vec![Field::new(name, dt)]);
        Table::new(schema, values.into_iter().map(|v| vec![v]).collect())
    }

    #[test]
    fn fills_with_mean_of_non_null_values() {
        let t = single(
            "n",
            DataType::Int64,
            vec![Value::Int64(10), Value::Null, Value::Int64(20)],
        );
        let out = fill_missing_numeric(&t);
        assert_eq!(out.schema.fields[0].data_type, DataType::Int64);
        assert_eq!(
            out.rows,
            vec![vec![Value::Int64(10)], vec![Value::Int64(15)], vec![Value::Int64(20)]]
        );
    }

    #[test]
    fn fractional_mean_promotes_int_column_to_float() {
        let t = single(
            "n",
            DataType::Int64,
            vec![Value::Int64(1), Value::Null, Value::Int64(2)],
        );
        let (out, report) = fill_missing_numeric_with_report(&t);
        assert_eq!(out.schema.fields[0].data_type, DataType::Float64);
        assert_eq!(
            out.rows,
            vec![
                vec![Value::Float64(1.0)],
                vec![Value::Float64(1.5)],
                vec![Value::Float64(2.0)]
            ]
        );
        assert_eq!(report.cells_filled, 1);
        assert_eq!(report.filled_columns, vec![("n".to_string(), 1.5)]);
    }

    #[test]
    fn float_column_is_filled() {
        let t = single(
            "x",
            DataType::Float64,
            vec![Value::Null, Value::Float64(1.0), Value::Null, Value::Float64(2.0)],
        );
        let out = fill_missing_numeric(&t);
        assert_eq!(out.rows[0][0], Value::Float64(1.5));
        assert_eq!(out.rows[2][0], Value::Float64(1.5));
    }

    #[test]
    fn huge_values_fill_with_a_finite_mean() {
        let t = single(
            "x",
            DataType::Float64,
            vec![Value::Float64(1e308), Value::Float64(1e308), Value::Null],
        );
        let out = fill_missing_numeric(&t);
        assert_eq!(out.rows[2][0], Value::Float64(1e308));
    }

    #[test]
    fn all_null_numeric_column_stays_null() {
        let t = single("x", DataType::Float64, vec![Value::Null, Value::Null]);
        let (out, report) = fill_missing_numeric_with_report(&t);
        assert_eq!(out, t);
        assert_eq!(report.cells_filled, 0);
        assert_eq!(report.unfilled_columns, vec!["x".to_string()]);
    }

    #[test]
    fn non_numeric_columns_are_untouched() {
        let schema = Schema::new(vec![
            Field::new("name", DataType::Utf8),
            Field::new("ok", DataType::Bool),
            Field::new("n", DataType::Float64),
        ]);
        let t = Table::new(
            schema,
            vec![
                vec![Value::Null, Value::Null, Value::Float64(4.0)],
                vec![Value::Utf8("b".into()), Value::Bool(true), Value::Null],
            ],
        );
        let out = fill_missing_numeric(&t);
        assert_eq!(out.rows[0][0], Value::Null);
        assert_eq!(out.rows[0][1], Value::Null);
        assert_eq!(out.rows[1][2], Value::Float64(4.0));
    }

    #[test]
    fn second_run_is_a_no_op() {
        let t = single(
            "n",
            DataType::Int64,
            vec![Value::Int64(1), Value::Null, Value::Int64(4), Value::Null],
        );
        let once = fill_missing_numeric(&t);
        let (twice, report) = fill_missing_numeric_with_report(&once);
        assert_eq!(twice, once);
        assert_eq!(report.cells_filled, 0);
        assert!(once.column(0).all(|v| !v.is_null()));
    }
}
