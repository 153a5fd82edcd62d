// src/describe.rs
use std::{fmt, path::Path};

use crate::{
    config::consts::PREVIEW_ROWS,
    dataset::Dataset,
    error::ReportError,
    sheet,
};

/// Shape and preview of a reloaded spreadsheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Description {
    pub rows: usize,
    pub columns: usize,
    pub preview: Dataset,
}

impl Description {
    pub fn of(dataset: &Dataset) -> Self {
        let (rows, columns) = dataset.shape();
        Self { rows, columns, preview: dataset.head(PREVIEW_ROWS) }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of Rows: {}", self.rows)?;
        writeln!(f, "Number of Columns: {}", self.columns)?;
        writeln!(f, "Sample Data:")?;
        for row in self.preview.to_text_grid() {
            writeln!(f, "  {}", row.join(" | "))?;
        }
        Ok(())
    }
}

/// Reload `path` with its first row as the header and describe it.
pub fn load_and_describe(path: &Path) -> Result<(Dataset, Description), ReportError> {
    let grid = sheet::read_first_sheet(path)?;
    let dataset = Dataset::from_grid(&grid);
    let description = Description::of(&dataset);
    logf!(
        "Describe: {} → {} row(s) × {} column(s)",
        path.display(),
        description.rows,
        description.columns
    );
    Ok((dataset, description))
}
