//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load`] or [`load_named`] (from [`unified`]), which dispatch on a
//! [`crate::types::TableFormat`] and produce an in-memory [`crate::types::Table`] with inferred
//! column types.
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (requires the `excel` feature)
//!
//! Type inference lives in [`inference`] and is shared by every format.

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod inference;
pub mod unified;

pub use inference::{infer_column_type, normalize_headers, RawCell, NA_MARKERS};
pub use unified::{load, load_from_path, load_named};
