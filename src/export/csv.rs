//! CSV writing.

use std::borrow::Cow;

use crate::error::{SweepError, SweepResult};
use crate::types::{Table, Value};

/// Serialize a [`Table`] to CSV bytes.
///
/// - A header row with the column names, then one record per row.
/// - Fields containing the delimiter, a quote or a line break are quoted (quotes doubled).
/// - Nulls are written as empty fields. A record made of one empty field is written as `""` so
///   it is not mistaken for a blank line.
/// - Floats always carry a fraction or exponent (`1.0`, `1e20`) so they load back as floats.
/// - A table with no columns produces empty output.
pub fn write_csv(table: &Table) -> SweepResult<Vec<u8>> {
    if table.column_count() == 0 {
        return Ok(Vec::new());
    }

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(table.schema.field_names())
        .map_err(write_error)?;
    for row in &table.rows {
        for cell in row {
            wtr.write_field(format_cell(cell).as_bytes())
                .map_err(write_error)?;
        }
        wtr.write_record(None::<&[u8]>).map_err(write_error)?;
    }

    wtr.into_inner().map_err(|e| SweepError::Io(e.into_error()))
}

/// Text form of a cell as written to CSV.
pub fn format_cell(v: &Value) -> Cow<'_, str> {
    match v {
        Value::Null => Cow::Borrowed(""),
        Value::Int64(i) => Cow::Owned(i.to_string()),
        Value::Float64(f) => Cow::Owned(format!("{f:?}")),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Utf8(s) => Cow::Borrowed(s.as_str()),
    }
}

fn write_error(err: csv::Error) -> SweepError {
    SweepError::Encode {
        message: err.to_string(),
    }
}
