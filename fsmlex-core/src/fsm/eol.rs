//! End-of-line detection

/// End-of-line sequence found at a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolKind {
    No,
    /// `\n`
    Lf,
    /// lone `\r`
    Cr,
    /// `\r\n`
    CrLf,
}

impl EolKind {
    /// Number of characters in the sequence
    pub fn width(self) -> usize {
        match self {
            EolKind::No => 0,
            EolKind::Lf | EolKind::Cr => 1,
            EolKind::CrLf => 2,
        }
    }

    pub fn is_eol(self) -> bool {
        self != EolKind::No
    }
}

/// Detect an end-of-line sequence starting at `index`
pub fn detect(source: &[char], index: usize) -> EolKind {
    match source.get(index) {
        Some('\n') => EolKind::Lf,
        Some('\r') if source.get(index + 1) == Some(&'\n') => EolKind::CrLf,
        Some('\r') => EolKind::Cr,
        _ => EolKind::No,
    }
}

/// Number of end-of-line sequences in `chars`; `\r\n` counts once
pub fn count_line_ends(chars: &[char]) -> usize {
    let mut index = 0;
    let mut count = 0;
    while index < chars.len() {
        match detect(chars, index) {
            EolKind::No => index += 1,
            kind => {
                count += 1;
                index += kind.width();
            }
        }
    }
    count
}

/// Split `text` into lines with the same rule as [`detect`].
///
/// Unlike [`str::lines`], a lone `\r` also ends a line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            '\r' => {
                lines.push(&text[start..i]);
                start = i + 1;
                if let Some(&(_, '\n')) = chars.peek() {
                    chars.next();
                    start += 1;
                }
            }
            _ => {}
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
