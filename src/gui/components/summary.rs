// src/gui/components/summary.rs
//
// Row/column counts, the sample rows and the coverage line of the last run.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::{gui::app::App, pipeline::RunOutcome};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(outcome) = app.state.session.outcome() else {
        ui.label("Upload an HTML file and press Convert.");
        return;
    };

    let report = match outcome {
        Ok(RunOutcome::Completed(report)) => report,
        Ok(RunOutcome::NoTable) => {
            ui.colored_label(egui::Color32::from_rgb(200, 120, 0), crate::pipeline::NO_TABLE_WARNING);
            return;
        }
        Err(e) => {
            ui.colored_label(egui::Color32::RED, format!("Error: {e}"));
            return;
        }
    };

    ui.label(format!("Number of Rows: {}", report.description.rows));
    ui.label(format!("Number of Columns: {}", report.description.columns));
    ui.label("Sample Data:");

    let grid = report.description.preview.to_text_grid();
    let cols = grid.first().map(Vec::len).unwrap_or(0);
    if cols > 0 {
        egui::ScrollArea::horizontal().id_salt("preview_hscroll").show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(Column::auto().resizable(true).at_least(40.0), cols)
                .header(20.0, |mut header| {
                    for name in &grid[0] {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for row in &grid[1..] {
                        body.row(18.0, |mut r| {
                            for cell in row {
                                r.col(|ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    }
                });
        });
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label("Coverage Percentage:");
        ui.label(RichText::new(report.coverage.label()).color(egui::Color32::RED).strong());
    });
    ui.label(format!("Spreadsheet: {}", report.spreadsheet.display()));
}
