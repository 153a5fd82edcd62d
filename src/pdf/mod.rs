// src/pdf/mod.rs
//
// Report assembly: dataset grid, review paragraph and timestamp written
// as a standard-font PDF with lopdf.

pub mod layout;
pub mod metrics;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use lopdf::content::Content;
use lopdf::{dictionary, Document, Object, Stream};

use crate::{
    config::consts::{DOWNLOAD_STAMP_FORMAT, INDEX_ARTIFACT_COLUMN, REPORT_PREFIX, REPORT_STAMP_FORMAT},
    coverage::Coverage,
    dataset::Dataset,
    error::ReportError,
    file::ensure_directory,
};
use layout::{Canvas, Span, BLACK, FONT_RESOURCE, PAGE_HEIGHT, PAGE_WIDTH, RED};

/// Gap between the table and the review paragraph.
pub const SPACER: f32 = 12.0;

const REVIEW: &str = "Review: The table above displays the data extracted from the uploaded HTML file. \
    The count plot shows the distribution of failed test cases among the assesslet names. \
    The pie chart illustrates the coverage percentage based on the failed test cases. \
    The coverage percentage is ";

/// `report_2024-05-01_13-45-00.pdf`
pub fn report_file_name(at: NaiveDateTime) -> String {
    format!("{REPORT_PREFIX}{}.pdf", at.format(REPORT_STAMP_FORMAT))
}

pub fn review_spans(coverage: &Coverage) -> Vec<Span> {
    vec![
        Span::new(REVIEW, BLACK),
        Span::new(coverage.label(), RED),
        Span::new(".", BLACK),
    ]
}

pub fn downloaded_line(at: NaiveDateTime) -> String {
    format!("Downloaded on: {}", at.format(DOWNLOAD_STAMP_FORMAT))
}

/// Lay out the report pages into an in-memory document.
pub fn build_document(
    grid: &[Vec<String>],
    coverage: &Coverage,
    generated_at: NaiveDateTime,
) -> Result<Document, ReportError> {
    let mut canvas = Canvas::new();
    canvas.table(grid);
    canvas.spacer(SPACER);
    canvas.paragraph(&review_spans(coverage));
    canvas.paragraph(&[Span::new(downloaded_line(generated_at), BLACK)]);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT_RESOURCE => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in canvas.into_pages() {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    Ok(doc)
}

/// Write `report_<stamp>.pdf` into `out_dir` and return its path.
/// Columns named `Unnamed: 0` are dropped from the grid first.
pub fn write_report(
    dataset: &Dataset,
    coverage: &Coverage,
    out_dir: &Path,
    generated_at: NaiveDateTime,
) -> Result<PathBuf, ReportError> {
    let table = dataset.clone().without_column(INDEX_ARTIFACT_COLUMN);
    let grid = table.to_text_grid();

    let mut doc = build_document(&grid, coverage, generated_at)?;
    ensure_directory(out_dir)?;
    let path = out_dir.join(report_file_name(generated_at));
    doc.save(&path)?;

    logf!("PDF: {} row(s) + header → {}", table.row_count(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(13, 45, 7))
            .unwrap()
    }

    #[test]
    fn file_name_uses_filesystem_safe_stamp() {
        assert_eq!(report_file_name(at()), "report_2024-05-01_13-45-07.pdf");
        assert_eq!(downloaded_line(at()), "Downloaded on: 2024-05-01 13:45:07");
    }

    #[test]
    fn coverage_is_the_only_red_run() {
        let spans = review_spans(&Coverage::new(1, 13).unwrap());
        let red: Vec<_> = spans.iter().filter(|s| s.color == RED).collect();
        assert_eq!(red.len(), 1);
        assert_eq!(red[0].text, "92.31%");
    }

    #[test]
    fn document_has_one_page_per_canvas_page() {
        let grid = vec![vec![s!("A"), s!("B")], vec![s!("1"), s!("2")]];
        let doc = build_document(&grid, &Coverage::new(0, 13).unwrap(), at()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
