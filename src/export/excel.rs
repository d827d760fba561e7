#![cfg(feature = "excel")]

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::error::{SweepError, SweepResult};
use crate::types::{Table, Value};

/// Name of the single worksheet written by [`write_xlsx`].
pub const SHEET_NAME: &str = "Sheet1";

const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Serialize a [`Table`] to an `.xlsx` workbook with one worksheet.
///
/// - Row 1 holds the column names as strings.
/// - Integers and floats are written as numbers, booleans as booleans, text as strings.
/// - Nulls are left as blank cells.
///
/// Spreadsheet numbers are all `f64`: integers beyond 2^53 lose precision, and a float column
/// whose values are all whole numbers loads back as `Int64`.
pub fn write_xlsx(table: &Table) -> SweepResult<Vec<u8>> {
    if table.column_count() > MAX_COLS {
        return Err(SweepError::Encode {
            message: format!(
                "{} columns exceed the worksheet limit of {MAX_COLS}",
                table.column_count()
            ),
        });
    }
    if table.row_count() + 1 > MAX_ROWS {
        return Err(SweepError::Encode {
            message: format!(
                "{} rows (plus header) exceed the worksheet limit of {MAX_ROWS}",
                table.row_count()
            ),
        });
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME).map_err(write_error)?;

        for (col, field) in table.schema.fields.iter().enumerate() {
            sheet
                .write_string(0, col as u16, field.name.as_str())
                .map_err(write_error)?;
        }

        for (r, row) in table.rows.iter().enumerate() {
            let r = (r + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                let col = col as u16;
                match value {
                    Value::Null => {}
                    Value::Int64(v) => {
                        sheet.write_number(r, col, *v as f64).map_err(write_error)?;
                    }
                    Value::Float64(v) => {
                        sheet.write_number(r, col, *v).map_err(write_error)?;
                    }
                    Value::Bool(v) => {
                        sheet.write_boolean(r, col, *v).map_err(write_error)?;
                    }
                    Value::Utf8(s) => {
                        sheet.write_string(r, col, s.as_str()).map_err(write_error)?;
                    }
                }
            }
        }
    }

    workbook.save_to_buffer().map_err(write_error)
}

fn write_error(err: XlsxError) -> SweepError {
    SweepError::Encode {
        message: err.to_string(),
    }
}
