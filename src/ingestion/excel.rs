#![cfg(feature = "excel")]

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, ExcelDateTime, Range, Reader, Xlsx};

use crate::error::{SweepError, SweepResult};
use crate::types::Table;

use super::inference::{build_table, RawCell};

/// Load an `.xlsx` workbook into a [`Table`].
///
/// Behavior:
/// - Reads the first worksheet only
/// - Detects the first non-empty row as the header row
/// - Reads remaining rows (blank rows inside the data are kept as all-null rows)
/// - An empty worksheet yields a table with no columns and no rows
pub fn load_xlsx(bytes: &[u8]) -> SweepResult<Table> {
    let mut workbook: Xlsx<Cursor<&[u8]>> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e| SweepError::malformed(format!("invalid xlsx workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SweepError::malformed("workbook has no worksheets"))?
        .map_err(|e| SweepError::malformed(format!("cannot read first worksheet: {e}")))?;

    Ok(table_from_range(&range))
}

/// Load an `.xlsx` file from disk.
pub fn load_xlsx_from_path(path: impl AsRef<Path>) -> SweepResult<Table> {
    let bytes = std::fs::read(path)?;
    load_xlsx(&bytes)
}

fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();

    let header = rows.find(|row| row.iter().any(|c| !matches!(c, Data::Empty)));
    let Some(header) = header else {
        return Table::default();
    };
    let headers: Vec<String> = header.iter().map(cell_to_header_string).collect();

    let data: Vec<Vec<RawCell>> = rows
        .map(|row| row.iter().map(raw_cell).collect())
        .collect();

    build_table(headers, data)
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{f:.0}"),
        Data::Empty => String::new(),
        Data::DateTime(dt) => format_excel_datetime(dt),
        other => other.to_string(),
    }
}

fn raw_cell(c: &Data) -> RawCell {
    match c {
        Data::Empty => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => RawCell::Temporal(format_excel_datetime(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Temporal(s.clone()),
        other => RawCell::Text(other.to_string()),
    }
}

/// Render a serial date as `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or, for durations, `H:MM:SS`.
fn format_excel_datetime(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        let total = (dt.as_f64() * 86_400.0).round() as i64;
        let sign = if total < 0 { "-" } else { "" };
        let total = total.abs();
        return format!("{sign}{}:{:02}:{:02}", total / 3600, total % 3600 / 60, total % 60);
    }

    let (y, mo, d, h, mi, s, ms) = dt.to_ymd_hms_milli();
    match (h, mi, s, ms) {
        (0, 0, 0, 0) => format!("{y:04}-{mo:02}-{d:02}"),
        (_, _, _, 0) => format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}"),
        _ => format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}.{ms:03}"),
    }
}
