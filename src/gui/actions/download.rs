// src/gui/actions/download.rs
use crate::{
    file::{copy_report, normalize_separators},
    gui::app::App,
};

/// Copy the generated PDF to the path in the save field.
pub fn save_report(app: &mut App) {
    let Some(src) = app
        .state
        .session
        .outcome()
        .and_then(|o| o.as_ref().ok())
        .and_then(|o| o.report())
        .map(|r| r.pdf.clone())
    else {
        app.status("No report to save yet");
        return;
    };

    let dest = normalize_separators(&app.state.gui.save_path_text);
    if dest.as_os_str().is_empty() {
        app.status("Enter where to save the report");
        return;
    }

    match copy_report(&src, &dest) {
        Ok(path) => app.status(format!("Saved report to {}", path.display())),
        Err(e) => {
            loge!("Download: {} → {} failed: {}", src.display(), dest.display(), e);
            app.status(format!("Error: {e}"));
        }
    }
}
