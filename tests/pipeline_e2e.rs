// tests/pipeline_e2e.rs
use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use lopdf::Document;

use html_report::config::{options::ReportOptions, state::Upload};
use html_report::error::ReportError;
use html_report::pipeline::{run_at, RunOutcome, NO_TABLE_WARNING};
use html_report::progress::RecordingProgress;
use html_report::sheet::read_column_widths;

const PAGE: &str = "<html><body><table>\
    <tr><th>Assesslet Name</th><th>Failed</th></tr>\
    <tr><td>Login</td><td>1</td></tr>\
    <tr><td>Logout</td><td>0</td></tr>\
    </table></body></html>";

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("html_report_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn pdf_text(path: &std::path::Path) -> Vec<u8> {
    let doc = Document::load(path).unwrap();
    let mut all = Vec::new();
    for (_, id) in doc.get_pages() {
        all.extend(doc.get_page_content(id).unwrap());
    }
    all
}

fn occurrences(hay: &[u8], needle: &str) -> usize {
    hay.windows(needle.len()).filter(|w| *w == needle.as_bytes()).count()
}

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap()
}

#[test]
fn login_logout_end_to_end() {
    let dir = tmp_dir("login");
    let opts = ReportOptions { save_charts: true, ..ReportOptions::default() }.with_out_dir(&dir);
    let upload = Upload::new("results.v2.html", PAGE.as_bytes().to_vec()).unwrap();
    let mut prog = RecordingProgress::default();

    let outcome = run_at(&upload, &opts, at(), Some(&mut prog)).unwrap();
    let RunOutcome::Completed(report) = outcome else { panic!("expected a report") };

    assert_eq!(report.table_rows, 3);
    assert_eq!(report.spreadsheet, dir.join("results.xlsx"));
    assert!(report.spreadsheet.exists());
    assert_eq!(read_column_widths(&report.spreadsheet).unwrap().len(), 2);

    assert_eq!(report.dataset.row_count(), 2);
    assert_eq!(report.description.rows, 2);
    assert_eq!(report.description.columns, 2);
    assert_eq!(report.counts.categories, vec!["Login", "Logout"]);
    assert_eq!(report.coverage.failed_categories, 1);
    assert_eq!(report.coverage.label(), "92.31%");

    assert_eq!((report.count_chart.width(), report.count_chart.height()), opts.chart_size);
    assert_eq!(report.chart_files.len(), 2);
    assert!(report.chart_files.iter().all(|p| p.exists()));

    assert_eq!(report.pdf, dir.join("report_2024-01-02_03-04-05.pdf"));
    let text = pdf_text(&report.pdf);
    // Header plus the two data rows, then the review paragraph
    for cell in ["(Assesslet Name)", "(Failed)", "(Login)", "(Logout)"] {
        assert_eq!(occurrences(&text, cell), 1, "{cell}");
    }
    assert_eq!(occurrences(&text, "(92.31%)"), 1);
    assert_eq!(occurrences(&text, "(Downloaded on: 2024-01-02 03:04:05)"), 1);

    assert!(prog.finished);
    assert_eq!(prog.steps, vec!["extract", "spreadsheet", "widths", "describe", "charts", "pdf"]);
    let spreadsheet = report.spreadsheet.display().to_string();
    assert!(prog.lines.contains(&format!(
        "Successfully scraped and saved the first table from uploaded HTML file to {spreadsheet}"
    )));
    assert!(prog.lines.contains(&format!("Column widths adjusted for {spreadsheet}")));
    assert_eq!(prog.lines.last().map(String::as_str), Some("Conversion completed."));
}

#[test]
fn no_table_stops_before_writing() {
    let dir = tmp_dir("no_table");
    let opts = ReportOptions::default().with_out_dir(&dir);
    let upload = Upload::new("empty.html", b"<html><body><p>nothing</p></body></html>".to_vec()).unwrap();
    let mut prog = RecordingProgress::default();

    let outcome = run_at(&upload, &opts, at(), Some(&mut prog)).unwrap();
    assert!(matches!(outcome, RunOutcome::NoTable));
    assert!(!dir.join("empty.xlsx").exists());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    assert_eq!(prog.lines.last().map(String::as_str), Some(NO_TABLE_WARNING));
}

#[test]
fn missing_column_aborts_after_reload() {
    let dir = tmp_dir("missing_col");
    let opts = ReportOptions { indicator_column: "Status".into(), ..ReportOptions::default() }.with_out_dir(&dir);
    let upload = Upload::new("page.html", PAGE.as_bytes().to_vec()).unwrap();

    let err = run_at(&upload, &opts, at(), None).unwrap_err();
    assert!(matches!(err, ReportError::MissingColumn { ref column, .. } if column == "Status"));
    // Spreadsheet was written; no report followed
    assert!(dir.join("page.xlsx").exists());
    assert!(!fs::read_dir(&dir).unwrap().any(|e| e.unwrap().file_name().to_string_lossy().ends_with(".pdf")));
}

#[test]
fn invalid_utf8_is_rejected() {
    let dir = tmp_dir("utf8");
    let opts = ReportOptions::default().with_out_dir(&dir);
    let upload = Upload::new("bad.html", vec![0x3c, 0xff, 0xfe]).unwrap();
    assert!(matches!(run_at(&upload, &opts, at(), None), Err(ReportError::Decode(_))));
}
