// src/extract.rs
// First-table extraction. The document is tokenized once; we only track
// enough state to know which rows and cells the current text belongs to.

use crate::core::{sanitize::push_stripped, Token, Tokens};

/// Rows of plain-text cells, in document order. Rows keep their own widths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn row_count(&self) -> usize { self.rows.len() }

    /// Widest row; rows are not padded to it.
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

// One frame per open table. Rows and cells are indices into `Cursor`.
#[derive(Default)]
struct Frame {
    row: Option<usize>,
    cell: Option<usize>,
}

/// Rows and cells are numbered in order of their start tags. A cell belongs
/// to every row open around it, and its text takes in everything nested
/// inside it, nested tables included.
#[derive(Default)]
struct Cursor {
    frames: Vec<Frame>,
    rows: Vec<Vec<usize>>,
    cells: Vec<String>,
}

impl Cursor {
    fn frame(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    fn open_row(&mut self) {
        let id = self.rows.len();
        self.rows.push(Vec::new());
        if let Some(f) = self.frame() {
            f.cell = None;
            f.row = Some(id);
        }
    }

    fn end_row(&mut self) {
        if let Some(f) = self.frame() {
            f.cell = None;
            f.row = None;
        }
    }

    fn open_cell(&mut self) {
        let Some(f) = self.frames.last_mut() else { return };
        f.cell = None;
        // Cells outside a row are not collected
        if f.row.is_none() {
            return;
        }
        let id = self.cells.len();
        self.cells.push(s!());
        for row in self.frames.iter().filter_map(|f| f.row) {
            self.rows[row].push(id);
        }
        if let Some(f) = self.frame() {
            f.cell = Some(id);
        }
    }

    fn end_cell(&mut self) {
        if let Some(f) = self.frame() {
            f.cell = None;
        }
    }

    fn text(&mut self, raw: &str) {
        for cell in self.frames.iter().filter_map(|f| f.cell) {
            push_stripped(&mut self.cells[cell], raw);
        }
    }

    fn into_rows(self) -> Vec<Vec<String>> {
        let cells = self.cells;
        self.rows
            .into_iter()
            .map(|row| row.into_iter().map(|id| cells[id].clone()).collect())
            .collect()
    }
}

/// Flatten the first `<table>` of `html` into rows of `th`/`td` text.
///
/// Every `tr` inside the table counts as a row, nested ones too, and every
/// `th`/`td` under a row is one of its cells. Returns `None` when the
/// document has no table at all. A table with no rows gives `Some` with
/// zero rows.
pub fn first_table(html: &str) -> Option<RawTable> {
    let mut seen = false;
    let mut cur = Cursor::default();

    for tok in Tokens::new(html) {
        let inside = !cur.frames.is_empty();
        match tok {
            Token::Open { name, self_closing } => match name.as_str() {
                "table" if !seen || (inside && !self_closing) => {
                    seen = true;
                    cur.frames.push(Frame::default());
                }
                "tr" if inside => cur.open_row(),
                "td" | "th" if inside => cur.open_cell(),
                _ => {}
            },
            Token::Close { name } if inside => match name.as_str() {
                "table" => {
                    cur.frames.pop();
                    if cur.frames.is_empty() {
                        break;
                    }
                }
                "tr" => cur.end_row(),
                "td" | "th" => cur.end_cell(),
                _ => {}
            },
            Token::Text(text) => cur.text(text),
            _ => {}
        }
    }

    if !seen {
        return None;
    }
    // An unterminated table keeps whatever was open
    let rows = cur.into_rows();
    logd!("Extract: {} row(s), widest {}", rows.len(), rows.iter().map(Vec::len).max().unwrap_or(0));
    Some(RawTable { rows })
}
