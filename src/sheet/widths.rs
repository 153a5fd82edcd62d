// src/sheet/widths.rs
// Column sizing post-pass. Cell data is never rewritten; only the
// worksheet's <cols> block is replaced.

use std::path::Path;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use super::{
    package,
    reader::{first_sheet_path, parse_cells, parse_shared_strings, SheetCell, SHARED_STRINGS_PART},
    xml::{attribute, XmlReader},
};
use crate::{config::consts::WIDTH_PADDING, error::ReportError, match_xml_events};

/// Width per column (0-based), `max chars + padding`. Absent cells count as empty.
pub fn column_widths(cells: &[SheetCell]) -> Vec<usize> {
    let cols = cells.iter().map(|c| c.col + 1).max().unwrap_or(0);
    let mut longest = vec![0usize; cols];
    for cell in cells {
        longest[cell.col] = longest[cell.col].max(cell.value.chars().count());
    }
    longest.into_iter().map(|n| n + WIDTH_PADDING).collect()
}

/// Reopen `path`, size every column to its widest value, save in place.
/// Returns the widths that were applied.
pub fn adjust_column_widths(path: &Path) -> Result<Vec<usize>, ReportError> {
    let mut archive = package::open(path)?;
    let sheet_path = first_sheet_path(&mut archive)?;
    let mut parts = package::read_all(&mut archive)?;
    drop(archive);

    let shared = parts
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(SHARED_STRINGS_PART))
        .map(|(_, xml)| parse_shared_strings(xml))
        .transpose()?
        .unwrap_or_default();

    let part = parts
        .iter_mut()
        .find(|(name, _)| name.eq_ignore_ascii_case(&sheet_path))
        .ok_or_else(|| ReportError::MissingPart(sheet_path.clone()))?;

    let widths = column_widths(&parse_cells(&part.1, &shared)?);
    part.1 = rewrite_cols(&part.1, &widths)?;

    package::write_all(path, &parts)?;
    logf!("Sheet: Column widths adjusted for {} ({:?})", path.display(), widths);
    Ok(widths)
}

/// Copy the worksheet XML, dropping any `<cols>` and inserting fresh ones
/// right before `<sheetData>`.
fn rewrite_cols(xml: &[u8], widths: &[usize]) -> Result<Vec<u8>, ReportError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().expand_empty_elements = false;
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + widths.len() * 64));
    let mut buf = Vec::new();
    let mut in_cols = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) if e.local_name().as_ref() == b"cols" => in_cols = true,
            Event::End(e) if e.local_name().as_ref() == b"cols" => in_cols = false,
            Event::Empty(e) if e.local_name().as_ref() == b"cols" => {}
            _ if in_cols => {}
            Event::Start(e) if e.local_name().as_ref() == b"sheetData" => {
                write_cols(&mut writer, widths)?;
                writer.write_event(Event::Start(e))?;
            }
            Event::Empty(e) if e.local_name().as_ref() == b"sheetData" => {
                write_cols(&mut writer, widths)?;
                writer.write_event(Event::Empty(e))?;
            }
            event => writer.write_event(event)?,
        }
        buf.clear();
    }
    Ok(writer.into_inner())
}

fn write_cols(writer: &mut Writer<Vec<u8>>, widths: &[usize]) -> Result<(), ReportError> {
    if widths.is_empty() {
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new("cols")))?;
    for (i, width) in widths.iter().enumerate() {
        let index = (i + 1).to_string();
        let width = width.to_string();
        let col = BytesStart::new("col").with_attributes([
            ("min", index.as_str()),
            ("max", index.as_str()),
            ("width", width.as_str()),
            ("customWidth", "1"),
        ]);
        writer.write_event(Event::Empty(col))?;
    }
    writer.write_event(Event::End(BytesEnd::new("cols")))?;
    Ok(())
}

/// `(0-based column, width)` for every `<col>` in the first worksheet.
pub fn read_column_widths(path: &Path) -> Result<Vec<(usize, f64)>, ReportError> {
    let mut archive = package::open(path)?;
    let sheet_path = first_sheet_path(&mut archive)?;
    let xml = package::require_part(&mut archive, &sheet_path)?;
    let mut reader = XmlReader::new(&xml);
    let mut widths = Vec::new();
    match_xml_events!(reader => {
        Event::Start(e) if e.local_name().as_ref() == b"col" => {
            let min: usize = attribute(&e, "min")?.map(|v| v.parse()).transpose()?.unwrap_or(1);
            let max: usize = attribute(&e, "max")?.map(|v| v.parse()).transpose()?.unwrap_or(min);
            let width = attribute(&e, "width")?
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or_default();
            for col in min..=max {
                widths.push((col.saturating_sub(1), width));
            }
        }
        Event::End(e) if e.local_name().as_ref() == b"cols" => break,
    });
    Ok(widths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::reader::CellKind;

    fn cell(col: usize, value: &str) -> SheetCell {
        SheetCell { row: 0, col, kind: CellKind::Text, value: s!(value) }
    }

    #[test]
    fn widths_pad_longest_value() {
        let cells = vec![cell(0, "Assesslet Name"), cell(0, "Login"), cell(2, "1")];
        assert_eq!(column_widths(&cells), vec![16, 2, 3]);
    }

    #[test]
    fn widths_count_chars_not_bytes() {
        assert_eq!(column_widths(&[cell(0, "Ünïcödé")]), vec![9]);
    }

    #[test]
    fn cols_block_is_replaced() {
        let xml = br#"<worksheet><cols><col min="1" max="1" width="99"/></cols><sheetData><row r="1"/></sheetData></worksheet>"#;
        let out = String::from_utf8(rewrite_cols(xml, &[7]).unwrap()).unwrap();
        assert_eq!(
            out,
            r#"<worksheet><cols><col min="1" max="1" width="7" customWidth="1"/></cols><sheetData><row r="1"/></sheetData></worksheet>"#
        );
    }
}
