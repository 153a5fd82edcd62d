// src/chart/bar.rs
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{chart_error, counts::CategoryCounts, render, Chart};
use crate::error::ReportError;

pub const COUNT_CHART_TITLE: &str = "Failed test cases";

// Share of each category slot taken by its bars
const GROUP_WIDTH: f64 = 0.8;

// Pixels between the x axis and the category labels
const LABEL_GAP: i32 = 6;

const LEVEL_COLORS: &[RGBColor] = &[
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
];

fn level_color(i: usize) -> RGBColor {
    LEVEL_COLORS[i % LEVEL_COLORS.len()]
}

/// Middle of category slot `category` on the x axis.
pub fn slot_center(category: usize) -> f64 {
    category as f64 + 0.5
}

/// Left/right x of bar `level` within category slot `category`.
pub fn bar_span(category: usize, level: usize, levels: usize) -> (f64, f64) {
    let w = GROUP_WIDTH / levels.max(1) as f64;
    let x0 = category as f64 + (1.0 - GROUP_WIDTH) / 2.0 + level as f64 * w;
    (x0, x0 + w)
}

/// Grouped bar chart: one slot per category, one bar per indicator level.
pub fn render_count_chart(
    counts: &CategoryCounts,
    category_label: &str,
    indicator_label: &str,
    size: (u32, u32),
) -> Result<Chart, ReportError> {
    let n = counts.categories.len().max(1);
    let y_top = counts.max_count() + 1;

    render(COUNT_CHART_TITLE, size, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(COUNT_CHART_TITLE, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(140)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..n as f64, 0u32..y_top)
            .map_err(chart_error)?;

        // Category names are drawn below, centred on their slots
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_labels(y_top as usize + 1)
            .x_desc(category_label)
            .y_desc("count")
            .draw()
            .map_err(chart_error)?;

        let label_style = ("sans-serif", 14)
            .into_font()
            .transform(FontTransform::Rotate90)
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        for (ci, name) in counts.categories.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(slot_center(ci), 0u32));
            root.draw(&Text::new(name.clone(), (x, y + LABEL_GAP), label_style.clone()))
                .map_err(chart_error)?;
        }

        let level_count = counts.levels.len();
        for (li, level) in counts.levels.iter().enumerate() {
            let color = level_color(li);
            chart
                .draw_series(counts.counts.iter().enumerate().map(|(ci, row)| {
                    let (x0, x1) = bar_span(ci, li, level_count);
                    Rectangle::new([(x0, 0u32), (x1, row[li])], color.filled())
                }))
                .map_err(chart_error)?
                .label(format!("{indicator_label} = {level}"))
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()
            .map_err(chart_error)?;
        Ok(())
    })
}
