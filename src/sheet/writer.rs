// src/sheet/writer.rs
use std::{fmt::Write as _, path::Path};

use super::{package, reference::cell_reference, xml::escape_text};
use crate::{config::consts::SHEET_NAME, error::ReportError, file::ensure_parent};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

pub(crate) const SHEET_PART: &str = "xl/worksheets/sheet1.xml";

fn workbook_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_text(SHEET_NAME)
    )
}

/// Worksheet XML: every row written, every non-empty value as an inline string.
pub(crate) fn sheet_xml(rows: &[Vec<String>]) -> String {
    let mut xml = s!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#);
    for (r, row) in rows.iter().enumerate() {
        let _ = write!(xml, r#"<row r="{}">"#, r + 1);
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() { continue; }
            let _ = write!(
                xml,
                r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                cell_reference(r, c),
                escape_text(value)
            );
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Write `rows` as-is: no header row, no index column. Creates or overwrites `path`.
pub fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<(), ReportError> {
    ensure_parent(path)?;
    let parts: Vec<(&str, Vec<u8>)> = vec![
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
        ("_rels/.rels", ROOT_RELS.as_bytes().to_vec()),
        ("xl/workbook.xml", workbook_xml().into_bytes()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes().to_vec()),
        (SHEET_PART, sheet_xml(rows).into_bytes()),
    ];
    package::write_all(path, &parts)?;
    logf!("Sheet: Wrote {} row(s) → {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_xml_escapes_and_skips_empty() {
        let rows = vec![vec![s!("a<b"), s!(""), s!("c")]];
        let xml = sheet_xml(&rows);
        assert!(xml.contains(r#"<c r="A1" t="inlineStr"><is><t xml:space="preserve">a&lt;b</t></is></c>"#));
        assert!(!xml.contains(r#"r="B1""#));
        assert!(xml.contains(r#"r="C1""#));
    }
}
