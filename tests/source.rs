mod common;

use common::{ORDERS_CSV, SheetCell, TestWorkspace};
use sku_tally::{
    ReportError,
    report,
    source::{Cell, LoadOptions, Table},
};

#[test]
fn spreadsheet_sheet_can_be_picked_by_index() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_xlsx(
        "orders.xlsx",
        "Orders",
        &[
            vec![SheetCell::Text("Seller SKU"), SheetCell::Text("Qty")],
            vec![SheetCell::Text("A1"), SheetCell::Number(2.0)],
        ],
    );

    let by_index = LoadOptions {
        sheet: Some("0".to_string()),
        ..LoadOptions::default()
    };
    let table = Table::from_path(&path, &by_index).expect("sheet 0");
    assert_eq!(table.headers(), ["Seller SKU", "Qty"]);
    assert_eq!(table.rows()[0], vec![Cell::Text("A1".into()), Cell::Float(2.0)]);

    let out_of_range = LoadOptions {
        sheet: Some("3".to_string()),
        ..LoadOptions::default()
    };
    let err = Table::from_path(&path, &out_of_range).unwrap_err();
    assert!(matches!(err, ReportError::Decode { .. }));
}

#[test]
fn decoder_is_chosen_from_the_file_extension() {
    let workspace = TestWorkspace::new();
    let workbook = workspace.write_xlsx(
        "orders.xlsx",
        "Orders",
        &[
            vec![SheetCell::Text("sellerSku")],
            vec![SheetCell::Text("A1")],
        ],
    );
    let table = Table::from_path(&workbook, &LoadOptions::default()).expect("workbook");
    assert_eq!(table.headers(), ["sellerSku"]);

    let text = workspace.write("orders.txt", ORDERS_CSV);
    let table = Table::from_path(&text, &LoadOptions::default()).expect("delimited");
    assert_eq!(table.headers(), ["Order ID", "Seller SKU", "Qty"]);
    assert_eq!(table.row_count(), 4);
}

#[test]
fn blank_spreadsheet_rows_are_excluded() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_xlsx(
        "orders.xlsx",
        "Sheet1",
        &[
            vec![SheetCell::Text("sku")],
            vec![SheetCell::Text("A")],
            vec![SheetCell::Blank],
            vec![SheetCell::Text("A")],
        ],
    );

    let table = Table::from_path(&path, &LoadOptions::default()).expect("table");
    assert_eq!(table.row_count(), 2);
    let report = report::build(&table, None).expect("report");
    assert_eq!(report.summary.as_pairs(), vec![("A", 2)]);
}

#[test]
fn latin1_text_decodes_with_encoding_option() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_bytes("orders.csv", b"sku\ncaf\xe9\ncaf\xe9\n");

    let err = Table::from_path(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, ReportError::Decode { .. }));

    let options = LoadOptions {
        encoding: encoding_rs::WINDOWS_1252,
        ..LoadOptions::default()
    };
    let table = Table::from_path(&path, &options).expect("table");
    let report = report::build(&table, None).expect("report");
    assert_eq!(report.summary.as_pairs(), vec![("café", 2)]);
}

#[test]
fn summary_total_matches_loaded_rows() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("orders.csv", ORDERS_CSV);

    let table = Table::from_path(&path, &LoadOptions::default()).expect("table");
    let report = report::build(&table, None).expect("report");
    assert_eq!(report.column.name, "Seller SKU");
    assert_eq!(report.summary.total(), table.row_count());
    assert_eq!(report.summary.as_pairs(), vec![("A1", 3), ("B2", 1)]);
}
