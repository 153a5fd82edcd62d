// src/pdf/metrics.rs
// Helvetica advance widths (1/1000 em) and WinAnsi encoding for the
// standard Type1 font. No font file is embedded.

/// Widths for U+0020..=U+007E.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

// Upper half of WinAnsi is mostly accented letters; digit width is close enough.
const UPPER_DEFAULT: u16 = 556;

/// Unicode code points that WinAnsi places in 0x80..=0x9F.
const WIN_ANSI_SPECIALS: [(char, u8); 27] = [
    ('€', 0x80), ('‚', 0x82), ('ƒ', 0x83), ('„', 0x84), ('…', 0x85), ('†', 0x86),
    ('‡', 0x87), ('ˆ', 0x88), ('‰', 0x89), ('Š', 0x8A), ('‹', 0x8B), ('Œ', 0x8C),
    ('Ž', 0x8E), ('\u{2018}', 0x91), ('\u{2019}', 0x92), ('\u{201C}', 0x93),
    ('\u{201D}', 0x94), ('•', 0x95), ('–', 0x96), ('—', 0x97), ('˜', 0x98),
    ('™', 0x99), ('š', 0x9A), ('›', 0x9B), ('œ', 0x9C), ('ž', 0x9E), ('Ÿ', 0x9F),
];

/// WinAnsi byte for `c`; `?` when the code page has no slot for it.
pub fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\t' | '\n' | '\r' => b' ',
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        _ => WIN_ANSI_SPECIALS
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, b)| *b)
            .unwrap_or(b'?'),
    }
}

pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn glyph_width(byte: u8) -> u16 {
    match byte {
        0x20..=0x7E => ASCII_WIDTHS[(byte - 0x20) as usize],
        0xA0 => 278,
        _ => UPPER_DEFAULT,
    }
}

/// Rendered width of `text` in points at `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(win_ansi_byte(c)) as u32).sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_widths_line_up() {
        assert_eq!(glyph_width(b' '), 278);
        assert_eq!(glyph_width(b'0'), 556);
        assert_eq!(glyph_width(b'@'), 1015);
        assert_eq!(glyph_width(b'W'), 944);
        assert_eq!(glyph_width(b'i'), 222);
        assert_eq!(glyph_width(b'~'), 584);
    }

    #[test]
    fn width_scales_with_size() {
        // "Login" = 556 + 556 + 556 + 222 + 556
        assert!((text_width("Login", 10.0) - 24.46).abs() < 1e-3);
        assert_eq!(text_width("", 10.0), 0.0);
    }

    #[test]
    fn encoding_falls_back_to_question_mark() {
        assert_eq!(to_win_ansi("a\u{e9}\u{2014}\u{4e2d}"), vec![b'a', 0xE9, 0x97, b'?']);
    }
}
