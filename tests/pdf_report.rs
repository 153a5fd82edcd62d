// tests/pdf_report.rs
use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use lopdf::Document;

use html_report::coverage::Coverage;
use html_report::dataset::{Column, Dataset, Value};
use html_report::pdf::write_report;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("html_report_pdf_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 5, 3).unwrap()
}

fn page_text(doc: &Document) -> Vec<u8> {
    let mut all = Vec::new();
    for (_, id) in doc.get_pages() {
        all.extend(doc.get_page_content(id).unwrap());
    }
    all
}

fn contains(hay: &[u8], needle: &str) -> bool {
    hay.windows(needle.len()).any(|w| w == needle.as_bytes())
}

fn sample(rows: usize) -> Dataset {
    Dataset::new(vec![
        Column { name: "Unnamed: 0".into(), values: (0..rows).map(|i| Value::Number(i as f64)).collect() },
        Column {
            name: "Assesslet Name".into(),
            values: (0..rows).map(|i| Value::Text(if i == 0 { "Login".into() } else { format!("Case {i}") })).collect(),
        },
        Column { name: "Failed".into(), values: (0..rows).map(|i| Value::Number((i % 2) as f64)).collect() },
    ])
}

#[test]
fn report_holds_grid_review_and_timestamp() {
    let dir = tmp_dir("basic");
    let coverage = Coverage::new(1, 13).unwrap();
    let path = write_report(&sample(2), &coverage, &dir, at()).unwrap();

    assert_eq!(path, dir.join("report_2024-05-01_09-05-03.pdf"));
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.5"));

    let doc = Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    let text = page_text(&doc);
    assert!(contains(&text, "(Assesslet Name)"));
    assert!(contains(&text, "(Login)"));
    assert!(contains(&text, "(92.31%)"));
    assert!(contains(&text, "(Downloaded on: 2024-05-01 09:05:03)"));
    // Index artifact column is dropped before layout
    assert!(!contains(&text, "Unnamed: 0"));
}

#[test]
fn long_tables_span_pages() {
    let dir = tmp_dir("long");
    let path = write_report(&sample(120), &Coverage::new(0, 13).unwrap(), &dir, at()).unwrap();
    let doc = Document::load(&path).unwrap();
    assert!(doc.get_pages().len() >= 3);
    assert!(contains(&page_text(&doc), "(100.00%)"));
}
