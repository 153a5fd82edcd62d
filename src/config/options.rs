// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::error::ReportError;

/// Knobs for one report run. Frontends mutate a copy and hand it to the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    pub out_dir: PathBuf,
    pub category_column: String,
    pub indicator_column: String,
    pub expected_categories: usize,
    pub chart_size: (u32, u32),
    /// Also write both chart PNGs next to the report.
    pub save_charts: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            category_column: s!(CATEGORY_COLUMN),
            indicator_column: s!(INDICATOR_COLUMN),
            expected_categories: EXPECTED_CATEGORIES,
            chart_size: (CHART_WIDTH, CHART_HEIGHT),
            save_charts: false,
        }
    }
}

impl ReportOptions {
    pub fn with_out_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.out_dir = dir.as_ref().to_path_buf();
        self
    }

    /// `<out_dir>/<stem>.xlsx` for an uploaded file name.
    pub fn spreadsheet_path(&self, upload_name: &str) -> PathBuf {
        self.out_dir.join(format!("{}.xlsx", upload_stem(upload_name)))
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.expected_categories == 0 {
            return Err(ReportError::InvalidExpectedTotal);
        }
        Ok(())
    }
}

/// File name up to its first `.`; `report.v2.html` → `report`.
pub fn upload_stem(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = base.split('.').next().unwrap_or("").trim();
    if stem.is_empty() { s!(FALLBACK_STEM) } else { s!(stem) }
}

/// Extension filter applied to uploads. Content is not inspected.
pub fn accepts_upload(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| UPLOAD_EXTENSIONS.iter().any(|ok| e.eq_ignore_ascii_case(ok)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_stops_at_first_dot() {
        assert_eq!(upload_stem("results.html"), "results");
        assert_eq!(upload_stem("report.v2.html"), "report");
        assert_eq!(upload_stem("/tmp/in/run.htm"), "run");
        assert_eq!(upload_stem(".html"), FALLBACK_STEM);
    }

    #[test]
    fn upload_filter_is_extension_only() {
        assert!(accepts_upload("a.html"));
        assert!(accepts_upload("A.HTM"));
        assert!(!accepts_upload("a.xlsx"));
        assert!(!accepts_upload("html"));
    }

    #[test]
    fn zero_expected_total_is_rejected() {
        let opts = ReportOptions { expected_categories: 0, ..ReportOptions::default() };
        assert!(matches!(opts.validate(), Err(ReportError::InvalidExpectedTotal)));
    }
}
