// src/error.rs
use thiserror::Error;

/// Everything that can abort a report run.
///
/// Library code returns `Result<_, ReportError>` and propagates with `?`;
/// the frontends decide how to surface it (status line, eyre report).
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Upload rejected: {0}")]
    Upload(String),

    #[error("No file uploaded")]
    NoUpload,

    #[error("A conversion is already running")]
    Busy,

    #[error("Column '{column}' not found (available: {available})")]
    MissingColumn { column: String, available: String },

    #[error("Spreadsheet part missing: {0}")]
    MissingPart(String),

    #[error("Invalid cell reference: {0}")]
    CellReference(String),

    #[error("Expected category total must be positive")]
    InvalidExpectedTotal,

    #[error("Pie slice sizes must be non-negative (got {0:.2})")]
    NegativeSlice(f64),

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("{0}")]
    Usage(String),

    #[error("Background conversion stopped unexpectedly")]
    WorkerLost,

    // Standard library errors
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Uploaded file is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    ParseInt(#[from] std::num::ParseIntError),

    // Third-party library errors
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncoding(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Pdf(#[from] lopdf::Error),
}

impl ReportError {
    /// Precondition failure for a named column, listing what the sheet does have.
    pub fn missing_column(column: &str, available: &[String]) -> Self {
        ReportError::MissingColumn {
            column: s!(column),
            available: available.join(", "),
        }
    }
}
