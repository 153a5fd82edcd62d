// src/core/html.rs
// Forgiving HTML tokenizer. Produces open/close tags and text runs; it does
// not build a tree. Tag names are ASCII-lowercased. Comments, doctypes and
// processing instructions are dropped; script/style bodies are skipped.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Open { name: String, self_closing: bool },
    Close { name: String },
    /// Raw text between tags, entities still encoded.
    Text(&'a str),
}

pub struct Tokens<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
    /// Set after `<script>`/`<style>`: skip until this closing tag.
    raw_until: Option<&'static str>,
}

impl<'a> Tokens<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, b: s.as_bytes(), i: 0, n: s.len(), raw_until: None }
    }

    /// Advance past the next occurrence of `pat` (or to the end).
    #[inline]
    fn skip_past(&mut self, pat: &str) {
        match self.s[self.i..].find(pat) {
            Some(rel) => self.i += rel + pat.len(),
            None => self.i = self.n,
        }
    }

    /// Called at '<'; returns the index just past the matching '>', honoring quotes.
    #[inline]
    fn tag_end(&self) -> usize {
        let mut j = self.i + 1;
        let mut in_s = false; // '
        let mut in_d = false; // "
        while j < self.n {
            match self.b[j] {
                b'\'' if !in_d => in_s = !in_s,
                b'"' if !in_s => in_d = !in_d,
                b'>' if !in_s && !in_d => return j + 1,
                _ => {}
            }
            j += 1;
        }
        self.n
    }

    /// Does a tag, comment or declaration start at `at`?
    fn markup_at(&self, at: usize) -> bool {
        if self.b.get(at) != Some(&b'<') {
            return false;
        }
        match self.b.get(at + 1) {
            Some(b'!' | b'?') => true,
            Some(b'/') => self.b.get(at + 2).is_some_and(|c| c.is_ascii_alphabetic()),
            Some(c) => c.is_ascii_alphabetic(),
            None => false,
        }
    }

    /// End of the text run that continues at `from`.
    fn text_end(&self, from: usize) -> usize {
        let mut at = from;
        while let Some(rel) = self.s.get(at..).and_then(|t| t.find('<')) {
            if self.markup_at(at + rel) {
                return at + rel;
            }
            at += rel + 1;
        }
        self.n
    }

    fn skip_raw_text(&mut self, close: &str) {
        let lc_close = format!("</{close}");
        let mut from = self.i;
        while let Some(rel) = find_ci(&self.s[from..], &lc_close) {
            let at = from + rel;
            // `</scriptx` is not a match
            let next = self.b.get(at + lc_close.len()).copied();
            if matches!(next, None | Some(b'>') | Some(b'/')) || next.is_some_and(|c| c.is_ascii_whitespace()) {
                self.i = at;
                return;
            }
            from = at + lc_close.len();
        }
        self.i = self.n;
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(close) = self.raw_until.take() {
                self.skip_raw_text(close);
            }
            if self.i >= self.n {
                return None;
            }

            if !self.markup_at(self.i) {
                // A stray '<' stays part of the run it sits in
                let start = self.i;
                self.i = self.text_end(start);
                return Some(Token::Text(&self.s[start..self.i]));
            }

            let rest = &self.b[self.i..];
            if rest.starts_with(b"<!--") {
                self.i += 4;
                self.skip_past("-->");
                continue;
            }
            if rest.starts_with(b"<!") || rest.starts_with(b"<?") {
                self.i = self.tag_end();
                continue;
            }

            let closing = rest.get(1) == Some(&b'/');
            let name_at = self.i + if closing { 2 } else { 1 };

            let mut name_end = name_at;
            while name_end < self.n {
                let c = self.b[name_end];
                if c.is_ascii_whitespace() || c == b'/' || c == b'>' { break; }
                name_end += 1;
            }
            let name = self.s[name_at..name_end].to_ascii_lowercase();
            let end = self.tag_end();
            let self_closing = end >= 2 && self.b[end - 1] == b'>' && self.b[end - 2] == b'/';
            self.i = end;

            if closing {
                return Some(Token::Close { name });
            }
            if !self_closing {
                self.raw_until = match name.as_str() {
                    "script" => Some("script"),
                    "style" => Some("style"),
                    _ => None,
                };
            }
            return Some(Token::Open { name, self_closing });
        }
    }
}

/// ASCII case-insensitive `find`.
pub fn find_ci(hay: &str, needle: &str) -> Option<usize> {
    let h = hay.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() { return Some(0); }
    if n.len() > h.len() { return None; }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(html: &str) -> Vec<String> {
        Tokens::new(html)
            .map(|t| match t {
                Token::Open { name, .. } => format!("<{name}>"),
                Token::Close { name } => format!("</{name}>"),
                Token::Text(t) => t.to_string(),
            })
            .collect()
    }

    #[test]
    fn tags_are_lowercased_and_text_kept() {
        assert_eq!(names("<TD Class=x>a</Td>"), vec!["<td>", "a", "</td>"]);
    }

    #[test]
    fn comments_doctype_and_scripts_are_skipped() {
        let html = "<!DOCTYPE html><!-- <table> --><script>var t='<table>';</script><p>x</p>";
        assert_eq!(names(html), vec!["<script>", "</script>", "<p>", "x", "</p>"]);
    }

    #[test]
    fn quoted_gt_does_not_end_tag() {
        assert_eq!(names(r#"<td title="a>b">c</td>"#), vec!["<td>", "c", "</td>"]);
    }

    #[test]
    fn stray_lt_is_text() {
        assert_eq!(names("<td>1 < 2</td>"), vec!["<td>", "1 < 2", "</td>"]);
        assert_eq!(names("a</ b<"), vec!["a</ b<"]);
    }

    #[test]
    fn self_closing_flag() {
        let toks: Vec<_> = Tokens::new("<br/><br>").collect();
        assert_eq!(toks[0], Token::Open { name: s!("br"), self_closing: true });
        assert_eq!(toks[1], Token::Open { name: s!("br"), self_closing: false });
    }
}
