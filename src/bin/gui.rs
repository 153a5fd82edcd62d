// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use std::path::Path;

use eframe::egui::ViewportBuilder;
use html_report::{
    config::{consts::DEFAULT_OUT_DIR, state::GuiState},
    gui, log, loge,
};

fn main() {
    // Moves with the output folder on each conversion
    log::init(Path::new(DEFAULT_OUT_DIR));

    let size = GuiState::default();
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([size.window_w as f32, size.window_h as f32])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        loge!("GUI failed: {}", e);
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
