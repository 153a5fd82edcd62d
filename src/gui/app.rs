// src/gui/app.rs
use std::{
    error::Error,
    sync::{mpsc::Receiver, Arc, Mutex},
};

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

use crate::{
    chart::Chart,
    config::state::AppState,
    error::ReportError,
    gui::{actions, components},
    pipeline::RunOutcome,
};

pub const WINDOW_TITLE: &str = "HTML to Excel Converter";

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub type RunResult = Result<RunOutcome, ReportError>;

/// GPU copies of the two charts of the last completed run.
pub struct ChartTextures {
    pub count: TextureHandle,
    pub coverage: TextureHandle,
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // status line (the worker writes here)
    pub status: Arc<Mutex<String>>,

    // result channel of the running conversion, if any
    pub worker: Option<Receiver<RunResult>>,

    pub charts: Option<ChartTextures>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        logf!("Init: out_dir={}, expected={}", state.options.out_dir.display(), state.options.expected_categories);
        Self {
            state,
            status: Arc::new(Mutex::new(s!("Idle"))),
            worker: None,
            charts: None,
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Upload chart bitmaps as textures; replaces the previous pair.
    pub fn load_charts(&mut self, ctx: &egui::Context, count: &Chart, coverage: &Chart) {
        self.charts = Some(ChartTextures {
            count: texture(ctx, "count_chart", count),
            coverage: texture(ctx, "coverage_chart", coverage),
        });
    }
}

fn texture(ctx: &egui::Context, name: &str, chart: &Chart) -> TextureHandle {
    let size = [chart.width() as usize, chart.height() as usize];
    ctx.load_texture(name, ColorImage::from_rgb(size, chart.rgb()), TextureOptions::LINEAR)
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        actions::poll(self, ctx);
        actions::upload_dropped(self, ctx);

        egui::TopBottomPanel::top("upload").show(ctx, |ui| {
            components::upload_bar::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("download").show(ctx, |ui| {
            components::download_bar::draw(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                components::summary::draw(ui, self);
                ui.separator();
                components::charts::draw(ui, self);
            });
        });
    }
}
