// src/sheet/reference.rs

/// 0-based column index → `A`, `B`, …, `Z`, `AA`, …
pub fn column_letters(mut col: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (col % 26) as u8);
        if col < 26 { break; }
        col = col / 26 - 1;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// 0-based (row, col) → `A1`-style reference.
pub fn cell_reference(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

/// `B3` → `(2, 1)`. `None` for anything that isn't letters followed by a 1-based row.
pub fn parse_reference(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| !c.is_ascii_alphabetic())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut col = 0usize;
    for b in letters.bytes() {
        col = col * 26 + (b.to_ascii_uppercase() - b'A') as usize + 1;
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 { return None; }
    Some((row - 1, col - 1))
}
