//! CSV loading.

use std::path::Path;

use crate::error::{SweepError, SweepResult};
use crate::types::Table;

use super::inference::{build_table, RawCell};

const ZIP_LOCAL_HEADER: &[u8] = b"PK\x03\x04";

/// Load CSV bytes into a [`Table`].
///
/// Rules:
///
/// - The first record is the header row.
/// - Every record must have as many fields as the header.
/// - Input must be UTF-8 text; binary content (e.g. an `.xlsx` archive) is rejected.
/// - Column types are inferred, see [`super::inference`].
pub fn load_csv(bytes: &[u8]) -> SweepResult<Table> {
    if bytes.starts_with(ZIP_LOCAL_HEADER) {
        return Err(SweepError::malformed(
            "content is a ZIP archive (spreadsheet?), not delimited text",
        ));
    }
    if bytes.contains(&0) {
        return Err(SweepError::malformed("content contains NUL bytes, not delimited text"));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    load_csv_from_reader(&mut rdr)
}

/// Load a CSV file from disk.
pub fn load_csv_from_path(path: impl AsRef<Path>) -> SweepResult<Table> {
    let bytes = std::fs::read(path)?;
    load_csv(&bytes)
}

/// Load CSV data from an existing CSV reader (which must be configured with headers).
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> SweepResult<Table> {
    let headers = rdr.headers().map_err(|e| csv_error(1, e))?.clone();
    if headers.is_empty() {
        return Err(SweepError::malformed("no columns to parse (missing header row)"));
    }
    let headers: Vec<String> = headers.iter().map(str::to_owned).collect();

    let mut rows: Vec<Vec<RawCell>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result.map_err(|e| csv_error(user_row, e))?;
        rows.push(
            record
                .iter()
                .map(|raw| {
                    if raw.is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(raw.to_owned())
                    }
                })
                .collect(),
        );
    }

    Ok(build_table(headers, rows))
}

fn csv_error(row: usize, err: csv::Error) -> SweepError {
    if matches!(err.kind(), csv::ErrorKind::Io(_)) {
        return SweepError::Io(err.into());
    }
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => {
            format!("row {row} has {len} fields, header has {expected_len}")
        }
        csv::ErrorKind::Utf8 { .. } => format!("row {row} is not valid UTF-8"),
        _ => format!("row {row}: {err}"),
    };
    SweepError::malformed(message)
}
