#![cfg(feature = "excel")]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use data_sweeper::export::convert;
use data_sweeper::ingestion::excel::{load_xlsx, load_xlsx_from_path};
use data_sweeper::ingestion::{load, load_from_path};
use data_sweeper::pipeline::{process_file, CleaningOptions, FileInput, SweepRequest};
use data_sweeper::types::{DataType, Field, Schema, Table, TableFormat, Value};
use data_sweeper::ErrorKind;

mod common;

use common::{same_value, sample_tables};

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("data-sweeper-{name}-{nanos}.xlsx"))
}

fn write_people_xlsx(path: &PathBuf) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("People").unwrap();

    // header
    ws.write_string(0, 0, "id").unwrap();
    ws.write_string(0, 1, "name").unwrap();
    ws.write_string(0, 2, "score").unwrap();
    ws.write_string(0, 3, "active").unwrap();

    ws.write_number(1, 0, 1).unwrap();
    ws.write_string(1, 1, "Ada").unwrap();
    ws.write_number(1, 2, 98.5).unwrap();
    ws.write_boolean(1, 3, true).unwrap();

    ws.write_number(2, 0, 2).unwrap();
    ws.write_string(2, 1, "Grace").unwrap();
    // score left blank
    ws.write_boolean(2, 3, false).unwrap();

    // A second sheet is never read.
    let other = wb.add_worksheet();
    other.write_string(0, 0, "ignored").unwrap();

    wb.save(path).unwrap();
}

fn people_table() -> Table {
    Table::new(
        Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("score", DataType::Float64),
            Field::new("active", DataType::Bool),
        ]),
        vec![
            vec![
                Value::Int64(1),
                Value::Utf8("Ada".into()),
                Value::Float64(98.5),
                Value::Bool(true),
            ],
            vec![
                Value::Int64(2),
                Value::Utf8("Grace".into()),
                Value::Null,
                Value::Bool(false),
            ],
            vec![
                Value::Int64(3),
                Value::Null,
                Value::Float64(-0.25),
                Value::Null,
            ],
        ],
    )
}

#[test]
fn load_xlsx_from_path_reads_first_sheet() {
    let path = tmp_file("people");
    write_people_xlsx(&path);

    let table = load_xlsx_from_path(&path).unwrap();
    assert_eq!(table.column_names(), vec!["id", "name", "score", "active"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.schema.fields[0].data_type, DataType::Int64);
    assert_eq!(table.schema.fields[3].data_type, DataType::Bool);
    assert_eq!(
        table.rows[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Ada".into()),
            Value::Float64(98.5),
            Value::Bool(true),
        ]
    );
    assert_eq!(table.rows[1][2], Value::Null);

    // Extension-based dispatch gives the same table.
    assert_eq!(load_from_path(&path).unwrap(), table);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn xlsx_round_trip_preserves_names_order_and_values() {
    let table = people_table();
    let bytes = convert(&table, TableFormat::Xlsx).unwrap();
    assert!(bytes.starts_with(b"PK\x03\x04"));

    let loaded = load(&bytes, TableFormat::Xlsx).unwrap();
    assert_eq!(loaded, table);
}

#[test]
fn integral_floats_reload_as_integers_through_xlsx() {
    let table = Table::new(
        Schema::new(vec![Field::new("x", DataType::Float64)]),
        vec![vec![Value::Float64(1.0)], vec![Value::Float64(2.0)]],
    );
    let loaded = load_xlsx(&convert(&table, TableFormat::Xlsx).unwrap()).unwrap();

    assert_eq!(loaded.schema.fields[0].data_type, DataType::Int64);
    assert_eq!(loaded.rows, vec![vec![Value::Int64(1)], vec![Value::Int64(2)]]);
}

#[test]
fn integral_floats_stay_floats_through_csv() {
    let table = Table::new(
        Schema::new(vec![Field::new("x", DataType::Float64)]),
        vec![vec![Value::Float64(1.0)], vec![Value::Float64(2.0)]],
    );
    let bytes = convert(&table, TableFormat::Csv).unwrap();
    assert_eq!(bytes, b"x\n1.0\n2.0\n");
    assert_eq!(load(&bytes, TableFormat::Csv).unwrap(), table);
}

#[test]
fn header_only_table_round_trips() {
    let table = load(b"a,b\n", TableFormat::Csv).unwrap();
    let loaded = load(&convert(&table, TableFormat::Xlsx).unwrap(), TableFormat::Xlsx).unwrap();
    assert_eq!(loaded, table);
}

#[test]
fn csv_to_xlsx_to_csv_is_stable() {
    let csv_in = std::fs::read("tests/fixtures/people.csv").unwrap();
    let table = load(&csv_in, TableFormat::Csv).unwrap();

    let xlsx = convert(&table, TableFormat::Xlsx).unwrap();
    let back = load(&xlsx, TableFormat::Xlsx).unwrap();
    assert_eq!(convert(&back, TableFormat::Csv).unwrap(), csv_in);
}

#[test]
fn xlsx_bytes_uploaded_as_csv_are_malformed() {
    let xlsx = convert(&people_table(), TableFormat::Xlsx).unwrap();
    let input = FileInput::new("report.csv", xlsx);

    let err = process_file(&input, &SweepRequest::new(TableFormat::Csv)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn csv_bytes_uploaded_as_xlsx_are_malformed() {
    let input = FileInput::new("report.xlsx", b"id,name\n1,Ada\n".to_vec());

    let err = process_file(&input, &SweepRequest::new(TableFormat::Csv)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn csv_upload_converts_to_xlsx_download() {
    let csv_in = std::fs::read("tests/fixtures/people.csv").unwrap();
    let input = FileInput::new("people.csv", csv_in);

    let processed = process_file(&input, &SweepRequest::new(TableFormat::Xlsx)).unwrap();
    assert_eq!(processed.output.file_name, "people.xlsx");
    assert_eq!(
        processed.output.mime_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(processed.output.format, TableFormat::Xlsx);
    assert_eq!(processed.stats.bytes_out, processed.output.bytes.len());

    let reloaded = load_xlsx(&processed.output.bytes).unwrap();
    assert_eq!(reloaded, load_from_path("tests/fixtures/people.csv").unwrap());
}

fn write_dates_xlsx() -> Vec<u8> {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    let date = Format::new().set_num_format("yyyy-mm-dd");

    ws.write_string(0, 0, "shipped").unwrap();
    ws.write_string(0, 1, "qty").unwrap();

    let first = ExcelDateTime::from_ymd(2024, 1, 15).unwrap();
    ws.write_datetime_with_format(1, 0, &first, &date).unwrap();
    ws.write_number(1, 1, 4).unwrap();

    // shipped left blank
    ws.write_number(2, 1, 6).unwrap();

    let last = ExcelDateTime::from_ymd(2024, 3, 1).unwrap();
    ws.write_datetime_with_format(3, 0, &last, &date).unwrap();

    wb.save_to_buffer().unwrap()
}

#[test]
fn date_column_loads_as_text() {
    let table = load_xlsx(&write_dates_xlsx()).unwrap();

    assert_eq!(table.schema.fields[0].data_type, DataType::Utf8);
    assert_eq!(table.schema.fields[1].data_type, DataType::Int64);
    assert_eq!(
        table.column(0).cloned().collect::<Vec<_>>(),
        vec![
            Value::Utf8("2024-01-15".into()),
            Value::Null,
            Value::Utf8("2024-03-01".into()),
        ]
    );
}

#[test]
fn mean_fill_skips_date_columns() {
    let input = FileInput::new("shipments.xlsx", write_dates_xlsx());
    let request = SweepRequest {
        cleaning: CleaningOptions {
            fill_missing_numeric_with_mean: true,
            ..Default::default()
        },
        ..SweepRequest::new(TableFormat::Csv)
    };

    let processed = process_file(&input, &request).unwrap();
    assert_eq!(processed.stats.cells_filled, 1);
    assert_eq!(
        processed.output.bytes,
        b"shipped,qty\n2024-01-15,4\n,6\n2024-03-01,5\n"
    );
}

#[test]
fn trailing_all_null_rows_are_not_kept_by_xlsx() {
    let table = Table::new(
        Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
        ]),
        vec![
            vec![Value::Null, Value::Null],
            vec![Value::Int64(1), Value::Utf8("a".into())],
            vec![Value::Null, Value::Null],
            vec![Value::Null, Value::Null],
        ],
    );
    let loaded = load_xlsx(&convert(&table, TableFormat::Xlsx).unwrap()).unwrap();

    // Blank rows before the last written row survive; blank rows after it are not stored.
    assert_eq!(loaded.row_count(), 2);
    assert_eq!(loaded.rows[..], table.rows[..2]);

    // CSV keeps them.
    let csv = load(&convert(&table, TableFormat::Csv).unwrap(), TableFormat::Csv).unwrap();
    assert_eq!(csv.row_count(), 4);
}

#[test]
fn xlsx_round_trip_for_sample_tables() {
    for table in sample_tables() {
        let loaded = load_xlsx(&convert(&table, TableFormat::Xlsx).unwrap()).unwrap();

        assert_eq!(loaded.column_names(), table.column_names());
        assert_eq!(loaded.row_count(), table.row_count());
        for (got, want) in loaded.rows.iter().zip(&table.rows) {
            assert_eq!(got.len(), want.len());
            assert!(
                got.iter().zip(want).all(|(a, b)| same_value(a, b)),
                "{got:?} != {want:?}"
            );
        }
    }
}
