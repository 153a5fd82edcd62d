// src/core/sanitize.rs
use std::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;

// Longest HTML5 entity name (`CounterClockwiseContourIntegral`) plus '&'
const MAX_ENTITY: usize = 32;

/// Decode HTML character references: every HTML5 named entity
/// (`&eacute;`, `&nbsp;`, `&mdash;`, ...) and numeric `&#NN;` / `&#xHH;`.
/// Unknown or unterminated references are kept verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        // Entities are short; don't scan the whole tail for ';'
        let semi = tail.char_indices().take(MAX_ENTITY + 1).find(|&(_, c)| c == ';').map(|(i, _)| i);
        match semi.and_then(|end| decode_one(&tail[1..end]).map(|text| (end, text))) {
            Some((end, text)) => {
                out.push_str(&text);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_one(name: &str) -> Option<Cow<'static, str>> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(|c| Cow::Owned(c.to_string()));
    }
    resolve_html5_entity(name).map(Cow::Borrowed)
}

/// Append one text run to a cell: decode, trim, concatenate without separator.
/// `" a " + "<b> b </b>"` → `"ab"`.
pub fn push_stripped(cell: &mut String, raw: &str) {
    let decoded = decode_entities(raw);
    cell.push_str(decoded.trim());
}
