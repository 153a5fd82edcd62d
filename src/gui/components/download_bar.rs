// src/gui/components/download_bar.rs
use eframe::egui;

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ready = app
        .state
        .session
        .outcome()
        .and_then(|o| o.as_ref().ok())
        .and_then(|o| o.report())
        .map(|r| r.pdf.clone());

    ui.horizontal(|ui| {
        let Some(pdf) = ready else {
            ui.label("The PDF report appears here after a successful conversion.");
            return;
        };
        ui.label(format!("Report: {}", pdf.display()));
        ui.label("Save as:");
        ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.save_path_text)
                .font(egui::TextStyle::Monospace),
        );
        if ui.button("Download PDF Report").clicked() {
            actions::save_report(app);
        }
    });
}
