// src/chart/mod.rs
//
// Chart rendering into in-memory RGB bitmaps (plotters' bitmap backend).
// Data shaping lives in `counts`; `bar` and `pie` only draw.

pub mod bar;
pub mod counts;
pub mod pie;

use std::{fmt::Display, path::Path, sync::OnceLock};

use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::{error::ReportError, file::ensure_parent};

pub use bar::render_count_chart;
pub use counts::{tally, CategoryCounts};
pub use pie::render_coverage_chart;

/// A rendered chart.
#[derive(Clone, Debug)]
pub struct Chart {
    pub title: String,
    pub image: RgbImage,
}

impl Chart {
    pub fn width(&self) -> u32 { self.image.width() }
    pub fn height(&self) -> u32 { self.image.height() }

    /// Raw RGB8 pixels, row-major.
    pub fn rgb(&self) -> &[u8] { self.image.as_raw() }

    pub fn save_png(&self, path: &Path) -> Result<(), ReportError> {
        ensure_parent(path)?;
        self.image.save_with_format(path, ImageFormat::Png)?;
        logd!("Chart: Saved '{}' → {}", self.title, path.display());
        Ok(())
    }
}

/// Bundled so chart text renders the same everywhere.
static FONT_BYTES: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/DejaVuSans.ttf"));
static FONT: OnceLock<Result<(), String>> = OnceLock::new();

/// Register the bundled face as `sans-serif` once per process.
fn ensure_font() -> Result<(), ReportError> {
    FONT.get_or_init(|| {
        plotters::style::register_font("sans-serif", plotters::style::FontStyle::Normal, FONT_BYTES)
            .map_err(|_| s!("bundled font rejected"))
    })
    .clone()
    .map_err(ReportError::Chart)
}

pub(crate) fn chart_error<E: Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}

/// Allocate a white canvas, let `draw` paint it, wrap the pixels.
pub(crate) fn render<F>(title: &str, (w, h): (u32, u32), draw: F) -> Result<Chart, ReportError>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<(), ReportError>,
{
    ensure_font()?;
    let mut buf = vec![255u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;
        draw(&root)?;
        root.present().map_err(chart_error)?;
    }
    let image = RgbImage::from_raw(w, h, buf)
        .ok_or_else(|| ReportError::Chart(format!("bitmap size mismatch for {w}x{h}")))?;
    Ok(Chart { title: s!(title), image })
}
