// src/gui/components/mod.rs
pub mod charts;
pub mod download_bar;
pub mod summary;
pub mod upload_bar;
