// src/pdf/layout.rs
// Top-down flow layout onto US Letter pages. Produces raw content-stream
// operations; `pdf::mod` turns them into page objects.

use lopdf::content::Operation;
use lopdf::Object;

use super::metrics::{text_width, to_win_ansi};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 72.0;
pub const FRAME_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

pub const FONT_SIZE: f32 = 10.0;
pub const LEADING: f32 = 12.0;
pub const ROW_HEIGHT: f32 = 18.0;
pub const CELL_PAD_X: f32 = 6.0;
pub const GRID_WIDTH: f32 = 1.0;
// Helvetica cap height in em
const CAP_HEIGHT: f32 = 0.718;

pub const FONT_RESOURCE: &str = "F1";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
pub const BLUE: Rgb = Rgb(0.0, 0.0, 1.0);
pub const RED: Rgb = Rgb(1.0, 0.0, 0.0);

/// A run of same-colored text inside a paragraph.
#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    pub text: String,
    pub color: Rgb,
}

impl Span {
    pub fn new<S: Into<String>>(text: S, color: Rgb) -> Self {
        Self { text: text.into(), color }
    }
}

/// Natural column widths (widest cell plus padding), shrunk proportionally
/// when the table would overflow the frame.
pub fn column_widths(grid: &[Vec<String>], size: f32) -> Vec<f32> {
    let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![2.0 * CELL_PAD_X; cols];
    for row in grid {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(text_width(cell, size) + 2.0 * CELL_PAD_X);
        }
    }
    let total: f32 = widths.iter().sum();
    if total > FRAME_WIDTH {
        let k = FRAME_WIDTH / total;
        widths.iter_mut().for_each(|w| *w *= k);
    }
    widths
}

/// Greedy word wrap; colors travel with their words. Spans that meet
/// without whitespace stay glued into one word (`92.31%` + `.`).
pub fn wrap(spans: &[Span], width: f32, size: f32) -> Vec<Vec<Span>> {
    let space = text_width(" ", size);
    let mut lines: Vec<Vec<Span>> = Vec::new();
    let mut line: Vec<Span> = Vec::new();
    let mut used = 0.0f32;

    for word in words(spans) {
        let w: f32 = word.iter().map(|p| text_width(&p.text, size)).sum();
        if !line.is_empty() && used + space + w > width {
            lines.push(std::mem::take(&mut line));
            used = 0.0;
        }
        if let Some(last) = line.last_mut() {
            last.text.push(' ');
            used += space;
        }
        for piece in word {
            push_piece(&mut line, piece);
        }
        used += w;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn words(spans: &[Span]) -> Vec<Vec<Span>> {
    let mut out: Vec<Vec<Span>> = Vec::new();
    let mut glue = false;
    for span in spans {
        let opens_with_space = span.text.starts_with(char::is_whitespace);
        for (i, piece) in span.text.split_whitespace().enumerate() {
            let piece = Span::new(piece, span.color);
            match out.last_mut() {
                Some(word) if i == 0 && glue && !opens_with_space => word.push(piece),
                _ => out.push(vec![piece]),
            }
        }
        glue = !span.text.trim().is_empty() && !span.text.ends_with(char::is_whitespace);
    }
    out
}

fn push_piece(line: &mut Vec<Span>, piece: Span) {
    match line.last_mut() {
        Some(last) if last.color == piece.color => last.text.push_str(&piece.text),
        _ => line.push(piece),
    }
}

/// Page-by-page operation buffers with a vertical cursor.
pub struct Canvas {
    pages: Vec<Vec<Operation>>,
    y: f32,
}

impl Default for Canvas {
    fn default() -> Self { Self::new() }
}

impl Canvas {
    pub fn new() -> Self {
        Self { pages: vec![Vec::new()], y: PAGE_HEIGHT - MARGIN }
    }

    pub fn page_count(&self) -> usize { self.pages.len() }

    fn room(&self) -> f32 { self.y - MARGIN }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Break before a block of height `h` unless it is first on the page.
    fn ensure(&mut self, h: f32) {
        let at_top = self.y >= PAGE_HEIGHT - MARGIN;
        if h > self.room() && !at_top {
            self.new_page();
        }
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // `pages` always holds at least the first page
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Vertical gap; swallowed at a page boundary.
    pub fn spacer(&mut self, h: f32) {
        self.y = (self.y - h).max(MARGIN);
    }

    /// Grid with a blue header band, centered cells and a 1 pt black rule.
    /// Rows never split; a page break falls between rows.
    pub fn table(&mut self, grid: &[Vec<String>]) {
        let widths = column_widths(grid, FONT_SIZE);
        let total: f32 = widths.iter().sum();
        let x0 = MARGIN + ((FRAME_WIDTH - total) / 2.0).max(0.0);

        for (r, row) in grid.iter().enumerate() {
            self.ensure(ROW_HEIGHT);
            let bottom = self.y - ROW_HEIGHT;
            let header = r == 0;

            if header {
                let ops = self.ops();
                set_fill(ops, BLUE);
                ops.push(rect_op(x0, bottom, total, ROW_HEIGHT));
                ops.push(Operation::new("f", vec![]));
            }

            let baseline = bottom + (ROW_HEIGHT - CAP_HEIGHT * FONT_SIZE) / 2.0;
            let mut x = x0;
            for (c, w) in widths.iter().enumerate() {
                let text = row.get(c).map(String::as_str).unwrap_or("");
                if !text.is_empty() {
                    let tx = x + ((w - text_width(text, FONT_SIZE)) / 2.0).max(0.0);
                    let color = if header { WHITE } else { BLACK };
                    text_line(self.ops(), tx, baseline, &[Span::new(text, color)]);
                }
                let ops = self.ops();
                set_stroke(ops, BLACK);
                ops.push(Operation::new("w", vec![GRID_WIDTH.into()]));
                ops.push(rect_op(x, bottom, *w, ROW_HEIGHT));
                ops.push(Operation::new("S", vec![]));
                x += w;
            }
            self.y = bottom;
        }
    }

    /// Left-aligned paragraph wrapped to the frame width.
    pub fn paragraph(&mut self, spans: &[Span]) {
        for line in wrap(spans, FRAME_WIDTH, FONT_SIZE) {
            self.ensure(LEADING);
            let baseline = self.y - FONT_SIZE;
            text_line(self.ops(), MARGIN, baseline, &line);
            self.y -= LEADING;
        }
    }

    pub fn into_pages(self) -> Vec<Vec<Operation>> { self.pages }
}

fn rect_op(x: f32, y: f32, w: f32, h: f32) -> Operation {
    Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()])
}

fn set_fill(ops: &mut Vec<Operation>, Rgb(r, g, b): Rgb) {
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
}

fn set_stroke(ops: &mut Vec<Operation>, Rgb(r, g, b): Rgb) {
    ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
}

/// One text object; `Tj` advances the pen so spans follow each other.
fn text_line(ops: &mut Vec<Operation>, x: f32, y: f32, spans: &[Span]) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![FONT_RESOURCE.into(), FONT_SIZE.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    for span in spans {
        set_fill(ops, span.color);
        ops.push(Operation::new("Tj", vec![Object::string_literal(to_win_ansi(&span.text))]));
    }
    ops.push(Operation::new("ET", vec![]));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words_of(line: &[Span]) -> String {
        line.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn wrap_breaks_on_width() {
        let spans = [Span::new("aaa bbb ccc", BLACK)];
        let width = text_width("aaa bbb", FONT_SIZE) + 0.5;
        let lines = wrap(&spans, width, FONT_SIZE);
        assert_eq!(lines.len(), 2);
        assert_eq!(words_of(&lines[0]), "aaa bbb");
        assert_eq!(words_of(&lines[1]), "ccc");
    }

    #[test]
    fn adjacent_spans_glue_without_a_space() {
        let spans = [Span::new("is ", BLACK), Span::new("92.31%", RED), Span::new(". done", BLACK)];
        let lines = wrap(&spans, FRAME_WIDTH, FONT_SIZE);
        assert_eq!(
            lines,
            vec![vec![Span::new("is ", BLACK), Span::new("92.31%", RED), Span::new(". done", BLACK)]]
        );
    }

    #[test]
    fn overwide_tables_shrink_to_frame() {
        let wide = vec![vec!["x".repeat(200), "y".repeat(200)]];
        let widths = column_widths(&wide, FONT_SIZE);
        let total: f32 = widths.iter().sum();
        assert!((total - FRAME_WIDTH).abs() < 0.01);
        assert!((widths[0] - widths[1]).abs() < 0.01);
    }

    #[test]
    fn long_tables_break_between_rows() {
        let rows_per_page = ((PAGE_HEIGHT - 2.0 * MARGIN) / ROW_HEIGHT) as usize;
        let grid: Vec<Vec<String>> = (0..rows_per_page + 1).map(|i| vec![i.to_string()]).collect();
        let mut canvas = Canvas::new();
        canvas.table(&grid);
        assert_eq!(canvas.page_count(), 2);
    }
}
