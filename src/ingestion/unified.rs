//! Unified loading entrypoint.
//!
//! - [`load`] parses bytes in an explicit [`TableFormat`].
//! - [`load_named`] infers the format from an uploaded file's name first.
//! - [`load_from_path`] reads a file from disk and infers the format from its extension.

use std::path::Path;

use crate::error::{SweepError, SweepResult};
use crate::types::{Table, TableFormat};

use super::csv;

/// Parse `bytes` as `format` into a [`Table`].
///
/// # Examples
///
/// ```rust
/// use data_sweeper::ingestion::load;
/// use data_sweeper::types::{DataType, TableFormat, Value};
///
/// # fn main() -> Result<(), data_sweeper::SweepError> {
/// let table = load(b"id,name\n1,Ada\n2,\n", TableFormat::Csv)?;
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.schema.fields[0].data_type, DataType::Int64);
/// assert_eq!(table.rows[1][1], Value::Null);
/// # Ok(())
/// # }
/// ```
pub fn load(bytes: &[u8], format: TableFormat) -> SweepResult<Table> {
    match format {
        TableFormat::Csv => csv::load_csv(bytes),
        TableFormat::Xlsx => load_xlsx_dispatch(bytes),
    }
}

/// Parse an uploaded file, choosing the format from the extension of `file_name`.
///
/// Unknown extensions fail with [`SweepError::UnsupportedFormat`] before any parsing happens.
pub fn load_named(file_name: &str, bytes: &[u8]) -> SweepResult<Table> {
    let format = TableFormat::from_file_name(file_name)?;
    load(bytes, format)
}

/// Read and parse a file from disk, choosing the format from its extension.
pub fn load_from_path(path: impl AsRef<Path>) -> SweepResult<Table> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| SweepError::unsupported(format!("path has no file name ({})", path.display())))?;
    let format = TableFormat::from_file_name(name)?;
    let bytes = std::fs::read(path)?;
    load(&bytes, format)
}

fn load_xlsx_dispatch(bytes: &[u8]) -> SweepResult<Table> {
    #[cfg(feature = "excel")]
    {
        super::excel::load_xlsx(bytes)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = bytes;
        Err(SweepError::unsupported(
            "xlsx (enable cargo feature 'excel')",
        ))
    }
}
