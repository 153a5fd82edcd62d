// src/sheet/mod.rs
//
// Minimal OOXML spreadsheet support: one worksheet, inline strings on
// write, shared/inline strings and numbers on read, column widths.
//
// Typical call chain:
//   writer::write_rows → widths::adjust_column_widths → reader::read_first_sheet

pub mod package;
pub mod reader;
pub mod reference;
pub mod widths;
pub mod writer;
mod xml;

pub use reader::{read_first_sheet, CellKind, SheetCell, SheetGrid};
pub use widths::{adjust_column_widths, read_column_widths};
pub use writer::write_rows;
