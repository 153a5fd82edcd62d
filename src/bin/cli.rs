// src/bin/cli.rs
use color_eyre::eyre::WrapErr;
use html_report::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run().wrap_err("Report run failed")?;
    Ok(())
}
