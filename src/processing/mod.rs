//! In-memory cleaning stages.
//!
//! The processing layer operates on [`crate::types::Table`] values produced by loading. Every
//! stage takes a table by reference and returns a new one, so stages compose in any order; the
//! per-file pipeline applies them as duplicates → missing-value fill → column projection.
//!
//! Currently implemented:
//!
//! - [`remove_duplicates()`]: drop rows that repeat an earlier row
//! - [`fill_missing_numeric()`]: replace numeric nulls with the column mean
//! - [`select_columns()`]: project onto an ordered subset of columns
//! - [`reduce()`]: column reductions (count/null count/sum/mean)
//! - [`numeric_series()`]: chart-ready numeric columns
//!
//! ## Example: dedupe → fill → select
//!
//! ```rust
//! use data_sweeper::processing::{fill_missing_numeric, remove_duplicates, select_columns};
//! use data_sweeper::types::{DataType, Field, Schema, Table, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("id", DataType::Int64),
//!     Field::new("score", DataType::Int64),
//!     Field::new("name", DataType::Utf8),
//! ]);
//! let t = Table::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::Int64(10), Value::Utf8("a".into())],
//!         vec![Value::Int64(1), Value::Int64(10), Value::Utf8("a".into())],
//!         vec![Value::Int64(2), Value::Null, Value::Utf8("b".into())],
//!         vec![Value::Int64(3), Value::Int64(20), Value::Null],
//!     ],
//! );
//!
//! let t = remove_duplicates(&t);
//! let t = fill_missing_numeric(&t);
//! let t = select_columns(&t, &["name", "score"]).unwrap();
//!
//! assert_eq!(t.row_count(), 3);
//! assert_eq!(t.rows[1], vec![Value::Utf8("b".into()), Value::Int64(15)]);
//! assert_eq!(t.rows[2][0], Value::Null);
//! ```

pub mod chart;
pub mod dedup;
pub mod fill;
pub mod reduce;
pub mod select;

pub use chart::{numeric_series, NumericSeries, CHART_COLUMNS};
pub use dedup::remove_duplicates;
pub use fill::{fill_missing_numeric, fill_missing_numeric_with_report, FillReport};
pub use reduce::{reduce, ReduceOp};
pub use select::select_columns;
