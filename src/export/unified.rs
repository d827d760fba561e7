//! Unified conversion entrypoint.

use std::path::Path;

use crate::error::SweepResult;
use crate::types::{Table, TableFormat};

use super::csv;

/// Serialize `table` into `format`.
///
/// The output loads back with [`crate::ingestion::load`] into a table with the same column
/// names, order, row count and cell values, up to column type inference.
///
/// # Examples
///
/// ```rust
/// use data_sweeper::export::convert;
/// use data_sweeper::ingestion::load;
/// use data_sweeper::types::TableFormat;
///
/// # fn main() -> Result<(), data_sweeper::SweepError> {
/// let table = load(b"id,note\n1,\"a,b\"\n", TableFormat::Csv)?;
/// let bytes = convert(&table, TableFormat::Csv)?;
/// assert_eq!(bytes, b"id,note\n1,\"a,b\"\n");
/// assert_eq!(load(&bytes, TableFormat::Csv)?, table);
/// # Ok(())
/// # }
/// ```
pub fn convert(table: &Table, format: TableFormat) -> SweepResult<Vec<u8>> {
    match format {
        TableFormat::Csv => csv::write_csv(table),
        TableFormat::Xlsx => convert_xlsx_dispatch(table),
    }
}

/// Download name for a converted file: `original` with its last extension replaced.
///
/// `report.v1.csv` becomes `report.v1.xlsx`; a name without an extension gets one appended.
pub fn output_file_name(original: &str, target: TableFormat) -> String {
    Path::new(original)
        .with_extension(target.extension())
        .to_string_lossy()
        .into_owned()
}

fn convert_xlsx_dispatch(table: &Table) -> SweepResult<Vec<u8>> {
    #[cfg(feature = "excel")]
    {
        super::excel::write_xlsx(table)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = table;
        Err(crate::error::SweepError::UnsupportedFormat {
            format: "xlsx (enable cargo feature 'excel')".to_string(),
        })
    }
}
