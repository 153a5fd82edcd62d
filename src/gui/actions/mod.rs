// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{upload_*, convert, poll, save_report}.

mod convert;  // src/gui/actions/convert.rs
mod download; // src/gui/actions/download.rs
mod upload;   // src/gui/actions/upload.rs

pub use convert::{convert, poll};
pub use download::save_report;
pub use upload::{upload_dropped, upload_path};
