// src/gui/actions/convert.rs
use std::{
    sync::mpsc::{self, TryRecvError},
    thread,
};

use eframe::egui;

use crate::{
    gui::{app::App, progress::GuiProgress},
    pipeline::{self, RunOutcome},
};

/// Start a run on a worker thread. The session admits one run at a time.
pub fn convert(app: &mut App, ctx: &egui::Context) {
    if let Err(e) = app.state.options.validate() {
        app.status(format!("Error: {e}"));
        return;
    }
    let upload = match app.state.session.begin() {
        Ok(u) => u,
        Err(e) => {
            app.status(format!("Error: {e}"));
            return;
        }
    };

    crate::log::set_dir(&app.state.options.out_dir);
    logf!("Convert: Begin {}", upload.name);
    app.charts = None;

    let options = app.state.options.clone();
    let status = app.status.clone();
    let ctx2 = ctx.clone();
    let (tx, rx) = mpsc::channel();
    app.worker = Some(rx);

    thread::spawn(move || {
        let mut prog = GuiProgress::new(status);
        // → This is where the conversion happens ←
        let result = pipeline::run(&upload, &options, Some(&mut prog));
        if tx.send(result).is_err() {
            loge!("Convert: UI went away before the result arrived");
        }
        ctx2.request_repaint();
    });
}

/// Pick up a finished run and hand it to the session.
pub fn poll(app: &mut App, ctx: &egui::Context) {
    let Some(rx) = &app.worker else { return };
    let result = match rx.try_recv() {
        Ok(result) => result,
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Disconnected) => Err(crate::error::ReportError::WorkerLost),
    };
    app.worker = None;

    match &result {
        Ok(RunOutcome::Completed(report)) => {
            app.load_charts(ctx, &report.count_chart, &report.coverage_chart);
            if let Some(name) = report.pdf.file_name() {
                app.state.gui.save_path_text = name.to_string_lossy().into_owned();
            }
        }
        Ok(RunOutcome::NoTable) => {}
        Err(e) => app.status(format!("Error: {e}")),
    }
    app.state.session.complete(result);
}
