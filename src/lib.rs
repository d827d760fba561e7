//! `data-sweeper` loads uploaded CSV and Excel (XLSX) files into an in-memory [`types::Table`],
//! applies optional cleaning stages, and converts the result to CSV or XLSX bytes ready for
//! download.
//!
//! The primary entrypoint is [`pipeline::process_file`], which runs the whole per-file pipeline
//! (load → clean → convert) for one [`pipeline::FileInput`]. Batches go through
//! [`pipeline::process_batch`] (sequential) or [`execution::BatchExecutor`] (parallel); a failed
//! file never stops the others.
//!
//! ## File formats
//!
//! The source format is chosen from the file extension (case-insensitive):
//!
//! - **CSV**: `.csv` (comma-delimited, first row is the header)
//! - **XLSX** (requires the Cargo feature `excel`, on by default): `.xlsx`, first worksheet only
//!
//! Anything else is [`SweepError::UnsupportedFormat`].
//!
//! ## Column types
//!
//! There is no user-provided schema: each column's [`types::DataType`] is inferred from its
//! non-null values. Supported logical types are:
//!
//! - [`types::DataType::Int64`]
//! - [`types::DataType::Float64`]
//! - [`types::DataType::Bool`]
//! - [`types::DataType::Utf8`]
//!
//! Empty cells and whitespace-only text map to [`types::Value::Null`].
//!
//! ## Cleaning stages
//!
//! Enabled stages always run in this order (see [`pipeline::CleaningOptions`]):
//!
//! 1. [`processing::remove_duplicates`]: drop rows that repeat an earlier row
//! 2. [`processing::fill_missing_numeric`]: replace nulls in numeric columns with the column mean
//! 3. [`processing::select_columns`]: keep only the requested columns, in the requested order
//!
//! ## Quick example
//!
//! ```rust
//! use data_sweeper::pipeline::{process_file, CleaningOptions, FileInput, SweepRequest};
//! use data_sweeper::types::TableFormat;
//!
//! # fn main() -> Result<(), data_sweeper::SweepError> {
//! let input = FileInput::new("people.csv", b"id,name\n1,Ada\n1,Ada\n2,Grace\n".to_vec());
//! let request = SweepRequest {
//!     cleaning: CleaningOptions {
//!         remove_duplicates: true,
//!         ..Default::default()
//!     },
//!     ..SweepRequest::new(TableFormat::Csv)
//! };
//!
//! let processed = process_file(&input, &request)?;
//! assert_eq!(processed.output.bytes, b"id,name\n1,Ada\n2,Grace\n");
//! assert_eq!(processed.stats.duplicates_removed, 1);
//! # Ok(())
//! # }
//! ```
//!
//! The stages can also be used on their own:
//!
//! ```rust
//! use data_sweeper::ingestion::load;
//! use data_sweeper::processing::{reduce, ReduceOp};
//! use data_sweeper::types::{TableFormat, Value};
//!
//! let table = load(b"id,score\n1,10\n2,\n3,20\n", TableFormat::Csv).unwrap();
//! assert_eq!(reduce(&table, "score", ReduceOp::NullCount), Some(Value::Int64(1)));
//! assert_eq!(reduce(&table, "score", ReduceOp::Mean), Some(Value::Float64(15.0)));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: byte/path loaders and type inference
//! - [`processing`]: cleaning stages plus preview helpers (reduce, chart series)
//! - [`export`]: CSV/XLSX writers, output file naming
//! - [`pipeline`]: per-file pipeline, request options, observers
//! - [`execution`]: parallel batch runs with metrics
//! - [`types`]: table, schema and format types
//! - [`error`]: error types used across the crate

pub mod error;
pub mod execution;
pub mod export;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{ErrorKind, SweepError, SweepResult};
