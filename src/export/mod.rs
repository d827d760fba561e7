//! Conversion of a [`crate::types::Table`] into downloadable bytes.
//!
//! Most callers should use [`convert`] plus [`output_file_name`] and
//! [`crate::types::TableFormat::mime_type`]. Format-specific writers live under [`csv`] and
//! `excel` (requires the `excel` feature).

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod unified;

pub use unified::{convert, output_file_name};
