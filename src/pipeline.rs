// src/pipeline.rs
// One report run: extract → spreadsheet → widths → describe → charts → PDF.
// Steps run strictly in order; the first error aborts the run.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};

use crate::{
    chart::{self, CategoryCounts, Chart},
    config::{
        consts::{COUNT_CHART_FILE, COVERAGE_CHART_FILE},
        options::ReportOptions,
        state::Upload,
    },
    coverage::{self, Coverage},
    dataset::Dataset,
    describe::{self, Description},
    error::ReportError,
    extract, pdf,
    progress::Progress,
    sheet,
};

pub const STEPS: [&str; 6] = ["extract", "spreadsheet", "widths", "describe", "charts", "pdf"];

pub const NO_TABLE_WARNING: &str = "No table found in the uploaded HTML file.";
pub const DONE_MESSAGE: &str = "Conversion completed.";

/// Everything a completed run produced.
#[derive(Debug)]
pub struct Report {
    /// Rows in the extracted table (header row included)
    pub table_rows: usize,
    pub spreadsheet: PathBuf,
    pub column_widths: Vec<usize>,
    pub dataset: Dataset,
    pub description: Description,
    pub counts: CategoryCounts,
    pub coverage: Coverage,
    pub count_chart: Chart,
    pub coverage_chart: Chart,
    /// PNG copies of the charts, when requested
    pub chart_files: Vec<PathBuf>,
    pub pdf: PathBuf,
}

#[derive(Debug)]
pub enum RunOutcome {
    /// The upload had no `<table>`; nothing was written.
    NoTable,
    Completed(Box<Report>),
}

impl RunOutcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            RunOutcome::Completed(r) => Some(r),
            RunOutcome::NoTable => None,
        }
    }
}

/// Run the whole pipeline, stamping the PDF with the local time.
pub fn run(
    upload: &Upload,
    opts: &ReportOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunOutcome, ReportError> {
    run_at(upload, opts, Local::now().naive_local(), progress)
}

/// As [`run`], with an explicit generation time.
pub fn run_at(
    upload: &Upload,
    opts: &ReportOptions,
    generated_at: NaiveDateTime,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunOutcome, ReportError> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(STEPS.len());
    }
    let result = run_steps(upload, opts, generated_at, &mut progress);
    if let Some(p) = progress.as_deref_mut() {
        match &result {
            Ok(RunOutcome::Completed(_)) => p.log(DONE_MESSAGE),
            Ok(RunOutcome::NoTable) => p.log(NO_TABLE_WARNING),
            Err(e) => p.log(&format!("Error: {e}")),
        }
        p.finish();
    }
    result
}

fn run_steps(
    upload: &Upload,
    opts: &ReportOptions,
    generated_at: NaiveDateTime,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<RunOutcome, ReportError> {
    opts.validate()?;
    logf!("Run: {} ({} bytes) → {}", upload.name, upload.bytes.len(), opts.out_dir.display());

    // 1. Extract
    let html = upload.html()?;
    let Some(table) = extract::first_table(&html) else {
        logw!("Run: {}", NO_TABLE_WARNING);
        return Ok(RunOutcome::NoTable);
    };
    logd!("Run: Extracted {} row(s), widest {}", table.row_count(), table.max_width());
    step(progress, STEPS[0], None);

    // 2. Spreadsheet
    let spreadsheet = opts.spreadsheet_path(&upload.name);
    sheet::write_rows(&spreadsheet, &table.rows)?;
    step(
        progress,
        STEPS[1],
        Some(format!(
            "Successfully scraped and saved the first table from uploaded HTML file to {}",
            spreadsheet.display()
        )),
    );

    // 3. Column widths
    let column_widths = sheet::adjust_column_widths(&spreadsheet)?;
    step(progress, STEPS[2], Some(format!("Column widths adjusted for {}", spreadsheet.display())));

    // 4. Describe, then the named-column precondition
    let (dataset, description) = describe::load_and_describe(&spreadsheet)?;
    dataset.require_columns(&[opts.category_column.as_str(), opts.indicator_column.as_str()])?;
    step(progress, STEPS[3], Some(description.to_string()));

    // 5. Coverage once, then both charts
    let coverage = coverage::compute(
        &dataset,
        &opts.category_column,
        &opts.indicator_column,
        opts.expected_categories,
    )?;
    let counts = chart::tally(&dataset, &opts.category_column, &opts.indicator_column)?;
    let count_chart =
        chart::render_count_chart(&counts, &opts.category_column, &opts.indicator_column, opts.chart_size)?;
    let coverage_chart = chart::render_coverage_chart(&coverage, opts.chart_size)?;

    let mut chart_files = Vec::new();
    if opts.save_charts {
        for (chart, name) in [(&count_chart, COUNT_CHART_FILE), (&coverage_chart, COVERAGE_CHART_FILE)] {
            let path = opts.out_dir.join(name);
            chart.save_png(&path)?;
            chart_files.push(path);
        }
    }
    step(progress, STEPS[4], Some(format!("Coverage Percentage: {}", coverage.label())));

    // 6. PDF
    let pdf = pdf::write_report(&dataset, &coverage, &opts.out_dir, generated_at)?;
    step(progress, STEPS[5], Some(format!("Report written to {}", pdf.display())));

    Ok(RunOutcome::Completed(Box::new(Report {
        table_rows: table.row_count(),
        spreadsheet,
        column_widths,
        dataset,
        description,
        counts,
        coverage,
        count_chart,
        coverage_chart,
        chart_files,
        pdf,
    })))
}

fn step(progress: &mut Option<&mut dyn Progress>, name: &str, msg: Option<String>) {
    if let Some(m) = &msg {
        logf!("{}", m);
    }
    if let Some(p) = progress.as_deref_mut() {
        if let Some(m) = &msg {
            p.log(m);
        }
        p.step_done(name);
    }
}
