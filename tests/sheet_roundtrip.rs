// tests/sheet_roundtrip.rs
use std::fs;
use std::path::PathBuf;

use html_report::dataset::{Dataset, Value};
use html_report::sheet::{adjust_column_widths, read_column_widths, read_first_sheet, write_rows};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("html_report_sheet_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn rows(list: &[&[&str]]) -> Vec<Vec<String>> {
    list.iter().map(|r| r.iter().map(|c| c.to_string()).collect()).collect()
}

#[test]
fn first_written_row_becomes_the_header() {
    let path = tmp_dir("header").join("table.xlsx");
    let written = rows(&[
        &["Assesslet Name", "Failed"],
        &["Login", "1"],
        &["Logout", "0"],
        &["Profile", "1"],
    ]);
    write_rows(&path, &written).unwrap();

    let ds = Dataset::from_grid(&read_first_sheet(&path).unwrap());
    assert_eq!(ds.shape(), (written.len() - 1, 2));
    assert_eq!(ds.column_names(), vec!["Assesslet Name", "Failed"]);
    assert_eq!(ds.column("Failed").unwrap().values[0], Value::Number(1.0));
    assert_eq!(ds.column("Assesslet Name").unwrap().values[2], Value::Text("Profile".into()));
}

#[test]
fn ragged_rows_and_blank_headers() {
    let path = tmp_dir("ragged").join("ragged.xlsx");
    write_rows(&path, &rows(&[&["", "A", "A"], &["1", "2", "3", "4"], &["x"]])).unwrap();

    let grid = read_first_sheet(&path).unwrap();
    assert_eq!(grid.width(), 4);
    let ds = Dataset::from_grid(&grid);
    assert_eq!(ds.column_names(), vec!["Unnamed: 0", "A", "A.1", "Unnamed: 3"]);
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.column("A").unwrap().values, vec![Value::Number(2.0), Value::Empty]);
    assert_eq!(ds.column("Unnamed: 3").unwrap().values[0], Value::Number(4.0));
}

#[test]
fn width_pass_is_idempotent() {
    let path = tmp_dir("widths").join("widths.xlsx");
    write_rows(&path, &rows(&[&["Assesslet Name", "Failed"], &["Login", "1"], &["A much longer name", ""]])).unwrap();

    let first = adjust_column_widths(&path).unwrap();
    assert_eq!(first, vec!["A much longer name".len() + 2, "Failed".len() + 2]);
    let grid_after_first = read_first_sheet(&path).unwrap();
    let cols_after_first = read_column_widths(&path).unwrap();

    let second = adjust_column_widths(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(read_column_widths(&path).unwrap(), cols_after_first);
    assert_eq!(read_first_sheet(&path).unwrap(), grid_after_first);
    assert_eq!(cols_after_first, vec![(0, 20.0), (1, 8.0)]);
}

#[test]
fn rewriting_overwrites_the_previous_file() {
    let path = tmp_dir("overwrite").join("same.xlsx");
    write_rows(&path, &rows(&[&["a"], &["1"], &["2"]])).unwrap();
    write_rows(&path, &rows(&[&["b"], &["9"]])).unwrap();

    let ds = Dataset::from_grid(&read_first_sheet(&path).unwrap());
    assert_eq!(ds.column_names(), vec!["b"]);
    assert_eq!(ds.row_count(), 1);
}

#[test]
fn missing_file_is_an_error() {
    let path = tmp_dir("missing").join("nope.xlsx");
    assert!(read_first_sheet(&path).is_err());
}
