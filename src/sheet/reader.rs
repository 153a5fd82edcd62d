// src/sheet/reader.rs
use std::{collections::HashMap, path::Path};

use quick_xml::events::Event;

use super::{
    package::{self, Archive},
    reference::parse_reference,
    xml::{attribute, push_ref, push_text, XmlReader},
};
use crate::{error::ReportError, match_xml_events};

const REL_WORKSHEET: &str = "/worksheet";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Number,
    Text,
    Bool,
    Error,
}

/// One stored cell; `value` is the cell text exactly as stored
/// (shared strings resolved).
#[derive(Clone, Debug, PartialEq)]
pub struct SheetCell {
    pub row: usize,
    pub col: usize,
    pub kind: CellKind,
    pub value: String,
}

/// Sparse cell list of one worksheet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SheetGrid {
    pub cells: Vec<SheetCell>,
}

impl SheetGrid {
    /// Rows up to the last populated one.
    pub fn height(&self) -> usize {
        self.cells.iter().map(|c| c.row + 1).max().unwrap_or(0)
    }

    /// Columns up to the last populated one.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.col + 1).max().unwrap_or(0)
    }

    /// Dense `height × width` view; absent cells are `None`.
    pub fn dense(&self) -> Vec<Vec<Option<&SheetCell>>> {
        let mut grid = vec![vec![None; self.width()]; self.height()];
        for cell in &self.cells {
            grid[cell.row][cell.col] = Some(cell);
        }
        grid
    }
}

/// Read the first worksheet of an `.xlsx` file.
pub fn read_first_sheet(path: &Path) -> Result<SheetGrid, ReportError> {
    let mut archive = package::open(path)?;
    let sheet_path = first_sheet_path(&mut archive)?;
    let shared = load_shared_strings(&mut archive)?;
    let xml = package::require_part(&mut archive, &sheet_path)?;
    let cells = parse_cells(&xml, &shared)?;
    logd!("Sheet: {} → {} cell(s) from {}", path.display(), cells.len(), sheet_path);
    Ok(SheetGrid { cells })
}

/// Zip path of the first `<sheet>` listed in the workbook.
pub(crate) fn first_sheet_path(archive: &mut Archive) -> Result<String, ReportError> {
    let rels = load_relationships(archive, "xl/_rels/workbook.xml.rels")?;
    let workbook = package::require_part(archive, "xl/workbook.xml")?;
    let mut reader = XmlReader::new(&workbook);
    let mut rel_id = None::<String>;
    match_xml_events!(reader => {
        Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
            rel_id = attribute(&e, "r:id")?.map(|v| v.into_owned());
            break;
        }
    });
    let rel_id = rel_id.ok_or_else(|| ReportError::MissingPart(s!("workbook sheet entry")))?;
    rels.get(&rel_id)
        .cloned()
        .ok_or_else(|| ReportError::MissingPart(format!("relationship {rel_id}")))
}

/// `Id → zip path` for worksheet relationships.
fn load_relationships(archive: &mut Archive, path: &str) -> Result<HashMap<String, String>, ReportError> {
    let xml = package::require_part(archive, path)?;
    let mut reader = XmlReader::new(&xml);
    let mut rels = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
            let id = attribute(&e, "Id")?;
            let kind = attribute(&e, "Type")?;
            let target = attribute(&e, "Target")?;
            if kind.map(|k| k.ends_with(REL_WORKSHEET)).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    rels.insert(id.into_owned(), to_zip_path(&target));
                }
            }
        }
    });
    Ok(rels)
}

/// Relationship targets are relative to `xl/` unless absolute.
fn to_zip_path(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(abs) => s!(abs),
        None if target.starts_with("xl/") => s!(target),
        None => format!("xl/{target}"),
    }
}

pub(crate) const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

fn load_shared_strings(archive: &mut Archive) -> Result<Vec<String>, ReportError> {
    match package::read_part(archive, SHARED_STRINGS_PART)? {
        Some(xml) => parse_shared_strings(&xml),
        None => Ok(Vec::new()),
    }
}

/// `<si>` items in order; rich-text runs are concatenated, phonetic hints skipped.
pub(crate) fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>, ReportError> {
    let mut reader = XmlReader::new(xml);
    let mut strings = Vec::new();
    let mut current = s!();
    let mut in_text = false;
    let mut in_phonetic = false;
    match_xml_events!(reader => {
        Event::Start(e) if e.local_name().as_ref() == b"si" => current.clear(),
        Event::End(e) if e.local_name().as_ref() == b"si" => strings.push(std::mem::take(&mut current)),
        Event::Start(e) if e.local_name().as_ref() == b"rPh" => in_phonetic = true,
        Event::End(e) if e.local_name().as_ref() == b"rPh" => in_phonetic = false,
        Event::Start(e) if !in_phonetic && e.local_name().as_ref() == b"t" => in_text = true,
        Event::End(e) if e.local_name().as_ref() == b"t" => in_text = false,
        Event::Text(e) if in_text => push_text(&mut current, &e)?,
        Event::CData(e) if in_text => current.push_str(&String::from_utf8_lossy(&e)),
        Event::GeneralRef(e) if in_text => push_ref(&mut current, &e)?,
    });
    Ok(strings)
}

/// Cells of one worksheet part. Empty values are dropped.
pub(crate) fn parse_cells(xml: &[u8], shared: &[String]) -> Result<Vec<SheetCell>, ReportError> {
    let mut reader = XmlReader::new(xml);
    let mut cells = Vec::new();

    let mut row = 0usize;
    let mut next_row = 0usize;
    let mut next_col = 0usize;

    let mut cell: Option<(usize, usize, Option<String>)> = None; // row, col, t=
    let mut value = s!();
    let mut in_value = false; // <v> or <is><t>
    let mut in_inline = false;

    match_xml_events!(reader => {
        Event::Start(e) if e.local_name().as_ref() == b"row" => {
            row = match attribute(&e, "r")? {
                Some(r) => r.parse::<usize>()?.saturating_sub(1),
                None => next_row,
            };
            next_row = row + 1;
            next_col = 0;
        }
        Event::Start(e) if e.local_name().as_ref() == b"c" => {
            let (r, c) = match attribute(&e, "r")? {
                Some(reference) => parse_reference(&reference)
                    .ok_or_else(|| ReportError::CellReference(reference.into_owned()))?,
                None => (row, next_col),
            };
            next_col = c + 1;
            cell = Some((r, c, attribute(&e, "t")?.map(|t| t.into_owned())));
            value.clear();
        }
        Event::Start(e) if cell.is_some() && e.local_name().as_ref() == b"v" => in_value = true,
        Event::End(e) if e.local_name().as_ref() == b"v" => in_value = false,
        Event::Start(e) if cell.is_some() && e.local_name().as_ref() == b"is" => in_inline = true,
        Event::End(e) if e.local_name().as_ref() == b"is" => in_inline = false,
        Event::Start(e) if in_inline && e.local_name().as_ref() == b"t" => in_value = true,
        Event::End(e) if in_inline && e.local_name().as_ref() == b"t" => in_value = false,
        Event::Text(e) if in_value => push_text(&mut value, &e)?,
        Event::CData(e) if in_value => value.push_str(&String::from_utf8_lossy(&e)),
        Event::GeneralRef(e) if in_value => push_ref(&mut value, &e)?,
        Event::End(e) if e.local_name().as_ref() == b"c" => {
            if let Some((r, c, t)) = cell.take() {
                let (kind, text) = match t.as_deref() {
                    Some("s") => {
                        let index: usize = value.trim().parse()?;
                        let text = shared.get(index).cloned().ok_or_else(|| {
                            ReportError::MissingPart(format!("shared string {index}"))
                        })?;
                        (CellKind::Text, text)
                    }
                    Some("inlineStr") | Some("str") => (CellKind::Text, std::mem::take(&mut value)),
                    Some("b") => (CellKind::Bool, std::mem::take(&mut value)),
                    Some("e") => (CellKind::Error, std::mem::take(&mut value)),
                    _ => (CellKind::Number, std::mem::take(&mut value)),
                };
                if !text.is_empty() {
                    cells.push(SheetCell { row: r, col: c, kind, value: text });
                }
            }
            value.clear();
            in_value = false;
            in_inline = false;
        }
    });
    Ok(cells)
}
