// src/config/consts.rs

// Output
pub const DEFAULT_OUT_DIR: &str = "out";
pub const FALLBACK_STEM: &str = "table";
pub const SHEET_NAME: &str = "Sheet1";
pub const REPORT_PREFIX: &str = "report_";
pub const REPORT_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
pub const DOWNLOAD_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const COUNT_CHART_FILE: &str = "count_chart.png";
pub const COVERAGE_CHART_FILE: &str = "coverage_chart.png";

// Upload
pub const UPLOAD_EXTENSIONS: &[&str] = &["html", "htm"];

// Dataset
pub const CATEGORY_COLUMN: &str = "Assesslet Name";
pub const INDICATOR_COLUMN: &str = "Failed";
pub const INDEX_ARTIFACT_COLUMN: &str = "Unnamed: 0";
pub const PREVIEW_ROWS: usize = 5;

// Expected number of distinct categories a full run covers.
pub const EXPECTED_CATEGORIES: usize = 13;

// Spreadsheet column sizing
pub const WIDTH_PADDING: usize = 2;

// Charts (pixels)
pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 600;

// Logging
pub const LOG_FILE_NAME: &str = "debug.log";
pub const DEFAULT_LOG_FILTER: &str = "info";
