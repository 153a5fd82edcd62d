// src/cli.rs
use std::{env, path::PathBuf};

use crate::{
    config::{options::ReportOptions, state::Upload},
    error::ReportError,
    pipeline::{self, RunOutcome},
    progress::Progress,
};

pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, PartialEq)]
pub enum Command {
    Help,
    Run { input: PathBuf, options: ReportOptions },
}

/// Prints each status line as it arrives.
pub struct PrintProgress;

impl Progress for PrintProgress {
    fn log(&mut self, msg: &str) { println!("{msg}"); }
}

pub fn run() -> Result<(), ReportError> {
    match parse_args(env::args().skip(1))? {
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
        Command::Run { input, options } => {
            crate::log::init(&options.out_dir);
            let upload = Upload::from_path(&input)?;
            let outcome = pipeline::run(&upload, &options, Some(&mut PrintProgress))?;
            if let RunOutcome::Completed(report) = &outcome {
                println!("Spreadsheet: {}", report.spreadsheet.display());
                println!("Report: {}", report.pdf.display());
                for png in &report.chart_files {
                    println!("Chart: {}", png.display());
                }
            }
            Ok(())
        }
    }
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, ReportError> {
    let mut options = ReportOptions::default();
    let mut input: Option<PathBuf> = None;
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "-o" | "--out-dir" => options.out_dir = PathBuf::from(value(&mut args, &a)?),
            "--expected" => {
                options.expected_categories = value(&mut args, &a)?.parse()?;
                options.validate()?;
            }
            "--category" => options.category_column = value(&mut args, &a)?,
            "--indicator" => options.indicator_column = value(&mut args, &a)?,
            "--charts" => options.save_charts = true,
            "-h" | "--help" => return Ok(Command::Help),
            flag if flag.starts_with('-') => {
                return Err(ReportError::Usage(format!("Unknown arg: {flag}")));
            }
            _ if input.is_some() => {
                return Err(ReportError::Usage(format!("Only one input file is supported (got {a})")));
            }
            _ => input = Some(PathBuf::from(a)),
        }
    }

    let input = input.ok_or_else(|| ReportError::Usage(s!("Missing input .html file (see --help)")))?;
    Ok(Command::Run { input, options })
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, ReportError> {
    args.next().ok_or_else(|| ReportError::Usage(format!("Missing value for {flag}")))
}
