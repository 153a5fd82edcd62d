// src/gui/components/charts.rs
use eframe::egui;

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(charts) = &app.charts else { return };
    let width = ui.available_width().min(900.0);

    ui.label("Count Plot:");
    ui.add(egui::Image::new(&charts.count).max_width(width));
    ui.add_space(8.0);
    ui.label("Coverage:");
    ui.add(egui::Image::new(&charts.coverage).max_width(width));
}
