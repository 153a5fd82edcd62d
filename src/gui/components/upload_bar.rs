// src/gui/components/upload_bar.rs
//
// Upload field, run options and the Convert button with its busy indicator.

use eframe::egui;

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("HTML to Excel Converter");

    let processing = app.state.session.is_processing();

    ui.horizontal(|ui| {
        ui.label("Upload HTML file:");
        let field = ui.add_enabled(
            !processing,
            egui::TextEdit::singleline(&mut app.state.gui.upload_path_text)
                .hint_text("path/to/page.html, or drop a file on the window")
                .font(egui::TextStyle::Monospace),
        );
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.add_enabled(!processing, egui::Button::new("Load")).clicked() || submitted {
            actions::upload_path(app);
        }
    });

    if let Some(upload) = app.state.session.upload() {
        ui.label(format!("Selected: {} ({} bytes)", upload.name, upload.bytes.len()));
    }

    ui.add_enabled_ui(!processing, |ui| {
        ui.horizontal(|ui| {
            let opts = &mut app.state.options;
            ui.label("Expected categories:");
            if ui.add(egui::DragValue::new(&mut opts.expected_categories).range(1..=10_000)).changed() {
                logf!("UI: expected_categories → {}", opts.expected_categories);
            }
            ui.label("Output folder:");
            let mut out = opts.out_dir.to_string_lossy().into_owned();
            if ui.text_edit_singleline(&mut out).changed() {
                opts.out_dir = crate::file::normalize_separators(&out);
            }
        });
    });

    ui.horizontal(|ui| {
        let can = app.state.session.can_convert();
        if ui
            .add_enabled(can, egui::Button::new("Convert to Excel and Generate Report"))
            .clicked()
        {
            actions::convert(app, ui.ctx());
        }
        if app.state.session.is_processing() {
            ui.add(egui::Spinner::new());
            ui.label("Converting...");
        }
    });

    ui.label(format!("Status: {}", app.status_text()));
}
