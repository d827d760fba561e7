use data_sweeper::ingestion::load;
use data_sweeper::pipeline::{
    clean, process_batch, process_file, process_path, CleaningOptions, FileInput, SweepRequest,
};
use data_sweeper::processing::{fill_missing_numeric, remove_duplicates, select_columns};
use data_sweeper::types::{DataType, Field, Schema, Table, TableFormat, Value};
use data_sweeper::ErrorKind;

mod common;

use common::sample_tables;

fn id_name_table() -> Table {
    Table::new(
        Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
        ]),
        vec![
            vec![Value::Int64(1), Value::Utf8("a".into())],
            vec![Value::Int64(1), Value::Utf8("a".into())],
            vec![Value::Int64(2), Value::Utf8("b".into())],
        ],
    )
}

#[test]
fn remove_duplicates_scenario() {
    let out = remove_duplicates(&id_name_table());
    assert_eq!(
        out.rows,
        vec![
            vec![Value::Int64(1), Value::Utf8("a".into())],
            vec![Value::Int64(2), Value::Utf8("b".into())],
        ]
    );
}

#[test]
fn fill_missing_numeric_scenario() {
    // A quoted empty field, since the CSV reader skips blank lines.
    let table = load(b"n\n10\n\"\"\n20\n", TableFormat::Csv).unwrap();
    assert_eq!(table.rows[1], vec![Value::Null]);

    let out = fill_missing_numeric(&table);
    assert_eq!(
        out.rows,
        vec![vec![Value::Int64(10)], vec![Value::Int64(15)], vec![Value::Int64(20)]]
    );
}

#[test]
fn filled_huge_floats_reload_as_floats() {
    let table = load(b"x\n1e308\n1e308\n\"\"\n", TableFormat::Csv).unwrap();
    let out = fill_missing_numeric(&table);

    let bytes = data_sweeper::export::convert(&out, TableFormat::Csv).unwrap();
    let reloaded = load(&bytes, TableFormat::Csv).unwrap();
    assert_eq!(reloaded.schema.fields[0].data_type, DataType::Float64);
    assert_eq!(reloaded.rows[2], vec![Value::Float64(1e308)]);
}

#[test]
fn select_no_columns_keeps_row_count() {
    let table = load(b"a,b,c\n1,2,3\n4,5,6\n", TableFormat::Csv).unwrap();
    let out = select_columns::<&str>(&table, &[]).unwrap();
    assert_eq!(out.column_count(), 0);
    assert_eq!(out.row_count(), 2);
}

#[test]
fn dedup_is_idempotent() {
    for table in sample_tables() {
        let once = remove_duplicates(&table);
        assert_eq!(remove_duplicates(&once), once);
    }
}

#[test]
fn fill_is_idempotent_and_leaves_no_fillable_nulls() {
    for table in sample_tables() {
        let once = fill_missing_numeric(&table);
        assert_eq!(fill_missing_numeric(&once), once);

        for (idx, field) in once.schema.fields.iter().enumerate() {
            let has_value = once.column(idx).any(|v| !v.is_null());
            if field.data_type.is_numeric() && has_value {
                assert!(once.column(idx).all(|v| !v.is_null()), "column {}", field.name);
            }
        }
    }
}

#[test]
fn projection_is_exact() {
    let table = load(
        b"order_id,customer,amount,quantity\n1,Ada,10.5,2\n2,Grace,,1\n",
        TableFormat::Csv,
    )
    .unwrap();
    let cols = ["quantity", "order_id", "customer"];
    let out = select_columns(&table, &cols).unwrap();

    assert_eq!(out.column_names(), cols);
    for (out_idx, name) in cols.iter().enumerate() {
        let src_idx = table.schema.index_of(name).unwrap();
        assert_eq!(out.schema.fields[out_idx], table.schema.fields[src_idx]);
        assert!(out.column(out_idx).eq(table.column(src_idx)));
    }
}

#[test]
fn unknown_column_lists_available_columns() {
    let table = id_name_table();
    let err = select_columns(&table, &["id", "email"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownColumn);
    let msg = err.to_string();
    assert!(msg.contains("email"));
    assert!(msg.contains("name"));
}

#[test]
fn orders_fixture_end_to_end() {
    let request = SweepRequest::from_json_str(
        r#"{"cleaning": {"remove_duplicates": true, "fill_missing_numeric_with_mean": true}, "target": "CSV"}"#,
    )
    .unwrap();

    let processed = process_path("tests/fixtures/orders.csv", &request).unwrap();
    assert_eq!(processed.output.file_name, "orders.csv");
    assert_eq!(processed.output.mime_type, "text/csv");

    let stats = processed.stats;
    assert_eq!(stats.rows_loaded, 5);
    assert_eq!(stats.duplicates_removed, 1);
    assert_eq!(stats.cells_filled, 2);
    assert_eq!(stats.rows_out, 4);
    assert_eq!(stats.columns_out, 4);

    let out = load(&processed.output.bytes, TableFormat::Csv).unwrap();
    assert_eq!(out.rows[1][2], Value::Float64(46.0 / 3.0));
    assert_eq!(
        out.rows[2],
        vec![
            Value::Int64(3),
            Value::Utf8("Linus".into()),
            Value::Float64(20.0),
            Value::Int64(2),
        ]
    );
    // Text nulls are not filled.
    assert_eq!(out.rows[3][1], Value::Null);
}

#[test]
fn clean_matches_process_file_output() {
    let bytes = std::fs::read("tests/fixtures/orders.csv").unwrap();
    let options = CleaningOptions {
        remove_duplicates: true,
        fill_missing_numeric_with_mean: true,
        selected_columns: Some(vec!["amount".into(), "customer".into()]),
    };
    let request = SweepRequest {
        cleaning: options.clone(),
        ..SweepRequest::new(TableFormat::Csv)
    };

    let (cleaned, _) = clean(&load(&bytes, TableFormat::Csv).unwrap(), &options).unwrap();
    let processed = process_file(&FileInput::new("orders.csv", bytes), &request).unwrap();
    assert_eq!(load(&processed.output.bytes, TableFormat::Csv).unwrap(), cleaned);
}

#[test]
fn csv_round_trip_for_sample_tables() {
    for table in sample_tables() {
        let bytes = data_sweeper::export::convert(&table, TableFormat::Csv).unwrap();
        let loaded = load(&bytes, TableFormat::Csv).unwrap();
        assert_eq!(loaded.column_names(), table.column_names());
        assert_eq!(loaded.row_count(), table.row_count());
        assert_eq!(loaded.rows, table.rows);
    }
}

#[test]
fn batch_continues_after_failures() {
    let inputs = vec![
        FileInput::new("a.csv", b"id\n1\n".to_vec()),
        FileInput::new("b.pdf", b"%PDF-1.7".to_vec()),
        FileInput::new("c.csv", b"id\n2\n2\n".to_vec()),
    ];
    let request = SweepRequest {
        cleaning: CleaningOptions {
            remove_duplicates: true,
            ..Default::default()
        },
        ..SweepRequest::new(TableFormat::Csv)
    };

    let outcomes = process_batch(&inputs, &request);
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_ok());
    assert_eq!(
        outcomes[1].result.as_ref().unwrap_err().kind(),
        ErrorKind::UnsupportedFormat
    );

    // The failed file leaves nothing behind for the next one.
    let c = outcomes[2].result.as_ref().unwrap();
    assert_eq!(c.output.bytes, b"id\n2\n");
    assert_eq!(c.stats.rows_loaded, 2);
}

#[test]
fn output_name_replaces_only_the_last_extension() {
    let input = FileInput::new("csv.report.v1.csv", b"a\n1\n".to_vec());
    let processed = process_file(&input, &SweepRequest::new(TableFormat::Csv)).unwrap();
    assert_eq!(processed.output.file_name, "csv.report.v1.csv");

    #[cfg(feature = "excel")]
    {
        let processed = process_file(&input, &SweepRequest::new(TableFormat::Xlsx)).unwrap();
        assert_eq!(processed.output.file_name, "csv.report.v1.xlsx");
    }
}

#[test]
fn process_path_missing_file_is_io() {
    let err = process_path("tests/fixtures/does_not_exist.csv", &SweepRequest::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
