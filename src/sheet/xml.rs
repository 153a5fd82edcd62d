// src/sheet/xml.rs
//! quick-xml wrapper for in-memory workbook parts.

use std::borrow::Cow;

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesRef, BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::error::ReportError;

pub(crate) struct XmlReader<'x> {
    reader: Reader<&'x [u8]>,
    buffer: Vec<u8>,
}

impl<'x> XmlReader<'x> {
    pub(crate) fn new(xml: &'x [u8]) -> Self {
        let mut reader = Reader::from_reader(xml);
        let config = reader.config_mut();
        config.check_comments = false;
        config.check_end_names = false;
        config.expand_empty_elements = true;
        config.trim_text(false);
        Self { reader, buffer: Vec::with_capacity(1024) }
    }

    pub(crate) fn next(&mut self) -> Result<Option<Event<'_>>, ReportError> {
        self.buffer.clear();
        match self.reader.read_event_into(&mut self.buffer)? {
            Event::Eof => Ok(None),
            event => Ok(Some(event)),
        }
    }
}

/// Unescaped attribute value by (qualified) name.
pub(crate) fn attribute<'a>(node: &'a BytesStart<'a>, name: &str) -> Result<Option<Cow<'a, str>>, ReportError> {
    match node.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?)),
        None => Ok(None),
    }
}

pub(crate) fn push_text(out: &mut String, text: &BytesText) -> Result<(), ReportError> {
    out.push_str(&text.xml_content()?);
    Ok(())
}

/// Entity and character references (`&amp;`, `&#10;`).
pub(crate) fn push_ref(out: &mut String, bytes: &BytesRef) -> Result<(), ReportError> {
    let raw = bytes.xml_content()?;
    if let Some(number) = raw.strip_prefix('#') {
        let code = match number.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16)?,
            None => number.parse::<u32>()?,
        };
        if let Some(ch) = char::from_u32(code) {
            out.push(ch);
        }
    } else if let Some(entity) = resolve_xml_entity(&raw) {
        out.push_str(entity);
    } else {
        out.push('&');
        out.push_str(&raw);
        out.push(';');
    }
    Ok(())
}

/// Text suitable for an XML text node: escaped, illegal control chars dropped.
pub(crate) fn escape_text(s: &str) -> String {
    let clean: Cow<str> = if s.chars().any(is_illegal) {
        Cow::Owned(s.chars().filter(|c| !is_illegal(*c)).collect())
    } else {
        Cow::Borrowed(s)
    };
    quick_xml::escape::escape(clean.as_ref()).into_owned()
}

fn is_illegal(c: char) -> bool {
    (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r')
}

#[macro_export]
macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(event) = $reader.next()? {
            match event {
                $($arms)*
                _ => (),
            }
        }
    };
}
