// src/chart/pie.rs
// Donut chart drawn from polygons in pixel space. Angles are degrees,
// counter-clockwise from the positive x axis; screen y grows downward.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{chart_error, render, Chart};
use crate::{coverage::Coverage, error::ReportError};

pub const COVERAGE_CHART_TITLE: &str = "Coverage";

const LABELS: [&str; 2] = ["Coverage", "Remaining"];
const COLORS: [RGBColor; 2] = [RGBColor(0xff, 0x99, 0x99), RGBColor(0x66, 0xb3, 0xff)];
const EXPLODE: [f64; 2] = [0.1, 0.0];
const START_ANGLE: f64 = 90.0;
const HOLE_RATIO: f64 = 0.70;
const LABEL_DISTANCE: f64 = 1.1;
const PCT_DISTANCE: f64 = 0.6;
// Degrees per polygon segment along the arc
const ARC_STEP: f64 = 1.0;

/// `[coverage, 100 - coverage]`; a negative slice cannot be drawn.
pub fn slice_sizes(coverage: &Coverage) -> Result<[f64; 2], ReportError> {
    let sizes = [coverage.percent, coverage.remaining()];
    if let Some(bad) = sizes.iter().copied().find(|s| *s < 0.0) {
        return Err(ReportError::NegativeSlice(bad));
    }
    Ok(sizes)
}

/// `(start, end)` angle of each slice, laid out counter-clockwise from `start`.
pub fn slice_angles(sizes: &[f64], start: f64) -> Vec<(f64, f64)> {
    let total: f64 = sizes.iter().sum();
    let mut at = start;
    sizes
        .iter()
        .map(|s| {
            let sweep = if total > 0.0 { 360.0 * s / total } else { 0.0 };
            let span = (at, at + sweep);
            at += sweep;
            span
        })
        .collect()
}

/// Point at `radius` and `deg` from `center`, in screen coordinates.
pub fn polar((cx, cy): (f64, f64), radius: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (cx + radius * rad.cos(), cy - radius * rad.sin())
}

fn wedge(center: (f64, f64), radius: f64, (a0, a1): (f64, f64)) -> Vec<(i32, i32)> {
    let mut pts = vec![px(center)];
    let steps = ((a1 - a0) / ARC_STEP).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let deg = a0 + (a1 - a0) * i as f64 / steps as f64;
        pts.push(px(polar(center, radius, deg)));
    }
    pts
}

fn px((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

/// Two-slice donut of coverage vs remaining, first slice exploded.
pub fn render_coverage_chart(coverage: &Coverage, size: (u32, u32)) -> Result<Chart, ReportError> {
    let sizes = slice_sizes(coverage)?;
    let total: f64 = sizes.iter().sum();
    let angles = slice_angles(&sizes, START_ANGLE);

    render(COVERAGE_CHART_TITLE, size, |root| {
        let area = root.titled(COVERAGE_CHART_TITLE, ("sans-serif", 28)).map_err(chart_error)?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as f64 / 2.0, h as f64 / 2.0);
        let radius = 0.36 * w.min(h) as f64;

        for (i, span) in angles.iter().enumerate() {
            let mid = (span.0 + span.1) / 2.0;
            let slice_center = polar(center, EXPLODE[i] * radius, mid);
            area.draw(&Polygon::new(wedge(slice_center, radius, *span), COLORS[i].filled()))
                .map_err(chart_error)?;
        }

        area.draw(&Circle::new(px(center), (HOLE_RATIO * radius).round() as u32, WHITE.filled()))
            .map_err(chart_error)?;

        for (i, span) in angles.iter().enumerate() {
            let mid = (span.0 + span.1) / 2.0;
            let slice_center = polar(center, EXPLODE[i] * radius, mid);

            let (lx, ly) = polar(slice_center, LABEL_DISTANCE * radius, mid);
            let h_pos = if lx >= slice_center.0 { HPos::Left } else { HPos::Right };
            let label_style = TextStyle::from(("sans-serif", 20).into_font()).pos(Pos::new(h_pos, VPos::Center));
            area.draw(&Text::new(LABELS[i], px((lx, ly)), label_style)).map_err(chart_error)?;

            let pct = if total > 0.0 { 100.0 * sizes[i] / total } else { 0.0 };
            let (tx, ty) = polar(slice_center, PCT_DISTANCE * radius, mid);
            let pct_style = TextStyle::from(("sans-serif", 18).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
            area.draw(&Text::new(format!("{pct:.1}%"), px((tx, ty)), pct_style)).map_err(chart_error)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_start_at_twelve_oclock_and_close_the_circle() {
        let angles = slice_angles(&[75.0, 25.0], START_ANGLE);
        assert_eq!(angles, vec![(90.0, 360.0), (360.0, 450.0)]);
    }

    #[test]
    fn polar_is_screen_oriented() {
        let (x, y) = polar((100.0, 100.0), 10.0, 90.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 90.0).abs() < 1e-9);
    }

    #[test]
    fn negative_remaining_is_rejected() {
        let over = Coverage { failed_categories: 0, expected_categories: 13, percent: 120.0 };
        assert!(matches!(slice_sizes(&over), Err(ReportError::NegativeSlice(_))));
        let below = Coverage::new(14, 13).unwrap();
        assert!(matches!(slice_sizes(&below), Err(ReportError::NegativeSlice(_))));
    }

    #[test]
    fn wedge_starts_at_center() {
        let pts = wedge((50.0, 50.0), 10.0, (0.0, 90.0));
        assert_eq!(pts[0], (50, 50));
        assert_eq!(pts[1], (60, 50));
        assert_eq!(*pts.last().unwrap(), (50, 40));
    }
}
