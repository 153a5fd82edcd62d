// src/gui/actions/upload.rs
use eframe::egui;

use crate::{config::state::Upload, file::normalize_separators, gui::app::App};

/// Load the file named in the upload field.
pub fn upload_path(app: &mut App) {
    let path = normalize_separators(&app.state.gui.upload_path_text);
    if path.as_os_str().is_empty() {
        app.status("Enter the path of an .html file first");
        return;
    }
    match Upload::from_path(&path) {
        Ok(upload) => accept(app, upload),
        Err(e) => {
            loge!("Upload: {} rejected: {}", path.display(), e);
            app.status(format!("Error: {e}"));
        }
    }
}

/// Files dropped onto the window; only the first one counts.
pub fn upload_dropped(app: &mut App, ctx: &egui::Context) {
    let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
    let Some(file) = dropped else { return };

    let result = match (&file.path, &file.bytes) {
        (Some(path), _) => {
            app.state.gui.upload_path_text = path.to_string_lossy().into_owned();
            Upload::from_path(path)
        }
        (None, Some(bytes)) => Upload::new(file.name.clone(), bytes.to_vec()),
        (None, None) => return,
    };

    match result {
        Ok(upload) => accept(app, upload),
        Err(e) => {
            loge!("Upload: Dropped file rejected: {}", e);
            app.status(format!("Error: {e}"));
        }
    }
}

fn accept(app: &mut App, upload: Upload) {
    let name = upload.name.clone();
    let size = upload.bytes.len();
    match app.state.session.accept_upload(upload) {
        Ok(()) => {
            logf!("Upload: Accepted {} ({} bytes)", name, size);
            app.charts = None;
            app.status(format!("Uploaded {name}. Press Convert to start."));
        }
        Err(e) => app.status(format!("Error: {e}")),
    }
}
