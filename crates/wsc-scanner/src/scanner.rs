//! Scanner state machine.
//!
//! The scanner works on a window of the source text so the parser can
//! re-scan string interpolation segments in place, keeping every token
//! offset absolute.

use bitflags::bitflags;
use std::sync::Arc;

use crate::syntax_kind::{SyntaxKind, text_to_keyword};

bitflags! {
    /// Trivia facts recorded for each token.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TokenFlags: u8 {
        /// Whitespace, a line break or a comment precedes the token.
        const PRECEDING_WHITESPACE = 1 << 0;
        /// A line break precedes the token.
        const PRECEDING_LINE_BREAK = 1 << 1;
        /// String literal without its closing delimiter.
        const UNTERMINATED = 1 << 2;
    }
}

/// A scanned token. Text is recovered from the scanner by byte range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
    pub flags: TokenFlags,
}

impl Token {
    pub const EMPTY: Token = Token {
        kind: SyntaxKind::Unknown,
        pos: 0,
        end: 0,
        flags: TokenFlags::empty(),
    };

    #[inline]
    pub fn has_preceding_whitespace(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_WHITESPACE)
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: u32,
    pub length: u32,
    pub message: &'static str,
}

/// Saved scanner position for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    end: usize,
    token: Token,
    interpolations: Vec<(u32, u32)>,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    end: usize,
    token: Token,
    /// Interpolation segments `(start, end)` of the current string token
    interpolations: Vec<(u32, u32)>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        let end = text.len();
        let mut pos = 0;
        if text.starts_with('\u{feff}') {
            pos = '\u{feff}'.len_utf8();
        }
        if text[pos..].starts_with("#!") {
            pos = memchr::memchr(b'\n', &text.as_bytes()[pos..]).map_or(end, |i| pos + i);
        }
        ScannerState {
            text,
            pos,
            end,
            token: Token::EMPTY,
            interpolations: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// Restrict scanning to `start..end` of the source text.
    pub fn set_window(&mut self, start: u32, end: u32) {
        self.end = (end as usize).min(self.text.len());
        self.pos = (start as usize).min(self.end);
        self.token = Token::EMPTY;
        self.interpolations.clear();
    }

    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    pub fn token_text(&self) -> &str {
        self.text
            .get(self.token.pos as usize..self.token.end as usize)
            .unwrap_or("")
    }

    /// Interpolation segments of the current string literal token.
    pub fn interpolations(&self) -> &[(u32, u32)] {
        &self.interpolations
    }

    pub fn diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            end: self.end,
            token: self.token,
            interpolations: self.interpolations.clone(),
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.end = snapshot.end;
        self.token = snapshot.token;
        self.interpolations = snapshot.interpolations;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        let text = Arc::clone(&self.text);
        let bytes = text.as_bytes();
        let previous = self.token;
        self.interpolations.clear();

        let mut flags = TokenFlags::empty();
        self.pos = skip_trivia(bytes, self.pos, self.end, &mut flags);
        let start = self.pos;
        if start >= self.end {
            return self.finish(SyntaxKind::EndOfFileToken, start, flags);
        }

        let next = if start + 1 < self.end {
            Some(bytes[start + 1])
        } else {
            None
        };
        let kind = match bytes[start] {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b'@' => self.single(SyntaxKind::AtToken),
            b'\\' => self.single(SyntaxKind::BackslashToken),
            b'>' => self.single(SyntaxKind::GreaterThanToken),
            b'"' => self.scan_string(bytes, 0, &mut flags),
            b'#' => {
                let hashes = bytes[start..self.end]
                    .iter()
                    .take_while(|&&b| b == b'#')
                    .count();
                if bytes.get(start + hashes) == Some(&b'"') {
                    self.scan_string(bytes, hashes, &mut flags)
                } else {
                    self.single(SyntaxKind::HashToken)
                }
            }
            b'`' => self.scan_backtick_identifier(bytes),
            b'$' => {
                self.pos += 1;
                while self.pos < self.end && is_ascii_identifier_part(bytes[self.pos]) {
                    self.pos += 1;
                }
                SyntaxKind::Identifier
            }
            b'0'..=b'9' => self.scan_number(bytes, previous),
            b'.' => {
                let rest = &bytes[start..self.end];
                if rest.starts_with(b"...") || rest.starts_with(b"..<") {
                    self.pos += 3;
                    SyntaxKind::OperatorToken
                } else {
                    self.single(SyntaxKind::DotToken)
                }
            }
            b'-' if next == Some(b'>') => {
                self.pos += 2;
                SyntaxKind::ArrowToken
            }
            b'?' if next == Some(b'?') => self.scan_operator(bytes),
            b'?' => self.single(SyntaxKind::QuestionToken),
            b'=' | b'-' | b'+' | b'!' | b'*' | b'%' | b'<' | b'&' | b'|' | b'^' | b'~' | b'/' => {
                self.scan_operator(bytes)
            }
            b if is_ascii_identifier_start(b) => self.scan_identifier(bytes),
            _ => {
                let ch = text.get(start..self.end).and_then(|s| s.chars().next());
                match ch {
                    Some(c) if c.is_alphabetic() => self.scan_identifier(bytes),
                    Some(c) => {
                        self.pos += c.len_utf8();
                        self.diagnostics.push(ScannerDiagnostic {
                            pos: start as u32,
                            length: c.len_utf8() as u32,
                            message: "Invalid character.",
                        });
                        SyntaxKind::Unknown
                    }
                    None => {
                        self.pos += 1;
                        SyntaxKind::Unknown
                    }
                }
            }
        };

        self.finish(kind, start, flags)
    }

    fn finish(&mut self, kind: SyntaxKind, start: usize, flags: TokenFlags) -> SyntaxKind {
        self.token = Token {
            kind,
            pos: start as u32,
            end: self.pos as u32,
            flags,
        };
        kind
    }

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn scan_identifier(&mut self, bytes: &[u8]) -> SyntaxKind {
        let start = self.pos;
        while self.pos < self.end {
            let b = bytes[self.pos];
            if is_ascii_identifier_part(b) {
                self.pos += 1;
            } else if b >= 0x80 {
                let ch = self
                    .text
                    .get(self.pos..self.end)
                    .and_then(|s| s.chars().next());
                match ch {
                    Some(c) if c.is_alphanumeric() => self.pos += c.len_utf8(),
                    _ => break,
                }
            } else {
                break;
            }
        }
        let word = self.text.get(start..self.pos).unwrap_or("");
        text_to_keyword(word).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_backtick_identifier(&mut self, bytes: &[u8]) -> SyntaxKind {
        let start = self.pos;
        let close = bytes[start + 1..self.end]
            .iter()
            .position(|&b| b == b'`' || b == b'\n' || b == b'\r');
        match close {
            Some(offset) if bytes[start + 1 + offset] == b'`' && offset > 0 => {
                self.pos = start + offset + 2;
                SyntaxKind::Identifier
            }
            _ => {
                self.pos += 1;
                self.diagnostics.push(ScannerDiagnostic {
                    pos: start as u32,
                    length: 1,
                    message: "Unterminated escaped identifier.",
                });
                SyntaxKind::Unknown
            }
        }
    }

    fn scan_number(&mut self, bytes: &[u8], previous: Token) -> SyntaxKind {
        let start = self.pos;
        let limit = self.end;
        let at = |i: usize| if i < limit { bytes[i] } else { 0 };

        if at(start) == b'0' && matches!(at(start + 1), b'x' | b'o' | b'b') {
            self.pos += 2;
            while self.pos < self.end
                && (bytes[self.pos].is_ascii_hexdigit() || bytes[self.pos] == b'_')
            {
                self.pos += 1;
            }
            return SyntaxKind::IntegerLiteral;
        }

        while self.pos < self.end && (bytes[self.pos].is_ascii_digit() || bytes[self.pos] == b'_') {
            self.pos += 1;
        }

        // `tuple.0.1` is two member accesses, not a float.
        let after_member_dot = previous.kind == SyntaxKind::DotToken && previous.end as usize == start;
        let mut kind = SyntaxKind::IntegerLiteral;
        if !after_member_dot && at(self.pos) == b'.' && at(self.pos + 1).is_ascii_digit() {
            self.pos += 1;
            while self.pos < self.end
                && (bytes[self.pos].is_ascii_digit() || bytes[self.pos] == b'_')
            {
                self.pos += 1;
            }
            kind = SyntaxKind::FloatLiteral;
        }
        if !after_member_dot && matches!(at(self.pos), b'e' | b'E') {
            let mut p = self.pos + 1;
            if matches!(at(p), b'+' | b'-') {
                p += 1;
            }
            if at(p).is_ascii_digit() {
                self.pos = p;
                while self.pos < self.end && bytes[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
                kind = SyntaxKind::FloatLiteral;
            }
        }
        kind
    }

    fn scan_operator(&mut self, bytes: &[u8]) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        if bytes[start] == b'?' {
            // `??` and `??=`
            self.pos += 1;
        }
        while self.pos < self.end && is_operator_continue(bytes[self.pos]) {
            if bytes[self.pos] == b'/' && matches!(bytes.get(self.pos + 1), Some(b'/' | b'*')) {
                break;
            }
            self.pos += 1;
        }
        match &bytes[start..self.pos] {
            b"=" => SyntaxKind::EqualsToken,
            b"<" => SyntaxKind::LessThanToken,
            b"&" => SyntaxKind::AmpersandToken,
            b"!" => SyntaxKind::ExclamationToken,
            _ => SyntaxKind::OperatorToken,
        }
    }

    fn scan_string(&mut self, bytes: &[u8], hashes: usize, flags: &mut TokenFlags) -> SyntaxKind {
        let (end, terminated) = scan_string_literal(
            bytes,
            self.pos,
            self.end,
            hashes,
            Some(&mut self.interpolations),
        );
        if !terminated {
            flags.insert(TokenFlags::UNTERMINATED);
            self.diagnostics.push(ScannerDiagnostic {
                pos: self.pos as u32,
                length: (end - self.pos) as u32,
                message: "Unterminated string literal.",
            });
        }
        self.pos = end;
        SyntaxKind::StringLiteral
    }
}

#[inline]
fn is_ascii_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_ascii_identifier_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[inline]
fn is_operator_continue(b: u8) -> bool {
    matches!(
        b,
        b'=' | b'-' | b'+' | b'*' | b'%' | b'&' | b'|' | b'^' | b'~' | b'/'
    )
}

fn skip_trivia(bytes: &[u8], mut pos: usize, end: usize, flags: &mut TokenFlags) -> usize {
    while pos < end {
        match bytes[pos] {
            b' ' | b'\t' | 0x0b | 0x0c => {
                flags.insert(TokenFlags::PRECEDING_WHITESPACE);
                pos += 1;
            }
            b'\n' | b'\r' => {
                flags.insert(TokenFlags::PRECEDING_WHITESPACE | TokenFlags::PRECEDING_LINE_BREAK);
                pos += 1;
            }
            b'/' if pos + 1 < end && bytes[pos + 1] == b'/' => {
                flags.insert(TokenFlags::PRECEDING_WHITESPACE);
                pos = memchr::memchr(b'\n', &bytes[pos..end]).map_or(end, |i| pos + i);
            }
            b'/' if pos + 1 < end && bytes[pos + 1] == b'*' => {
                flags.insert(TokenFlags::PRECEDING_WHITESPACE);
                let mut depth = 1u32;
                pos += 2;
                while pos < end && depth > 0 {
                    if bytes[pos..end].starts_with(b"/*") {
                        depth += 1;
                        pos += 2;
                    } else if bytes[pos..end].starts_with(b"*/") {
                        depth -= 1;
                        pos += 2;
                    } else {
                        if bytes[pos] == b'\n' {
                            flags.insert(TokenFlags::PRECEDING_LINE_BREAK);
                        }
                        pos += 1;
                    }
                }
            }
            _ => break,
        }
    }
    pos
}

/// Scan a string literal starting at `start` (the first `#` or `"`).
///
/// Returns the end offset and whether the closing delimiter was found.
/// Interpolation segments are pushed to `interpolations` when given.
fn scan_string_literal(
    bytes: &[u8],
    start: usize,
    end: usize,
    hashes: usize,
    mut interpolations: Option<&mut Vec<(u32, u32)>>,
) -> (usize, bool) {
    let mut pos = start + hashes;
    let multiline = bytes[pos..end].starts_with(b"\"\"\"");
    pos += if multiline { 3 } else { 1 };

    while pos < end {
        match bytes[pos] {
            b'\n' | b'\r' if !multiline => return (pos, false),
            b'\\' => {
                let mut p = pos + 1;
                let mut seen = 0;
                while seen < hashes && p < end && bytes[p] == b'#' {
                    p += 1;
                    seen += 1;
                }
                if seen < hashes {
                    pos += 1;
                    continue;
                }
                if p < end && bytes[p] == b'(' {
                    let content_start = p + 1;
                    match find_interpolation_end(bytes, content_start, end) {
                        Some(close) => {
                            if let Some(list) = interpolations.as_deref_mut() {
                                list.push((content_start as u32, close as u32));
                            }
                            pos = close + 1;
                        }
                        None => return (end, false),
                    }
                } else {
                    pos = (p + 1).min(end);
                }
            }
            b'"' => {
                let quotes = if multiline { 3 } else { 1 };
                if multiline && !bytes[pos..end].starts_with(b"\"\"\"") {
                    pos += 1;
                    continue;
                }
                let close_end = pos + quotes + hashes;
                let hashes_match = close_end <= end
                    && bytes[pos + quotes..close_end].iter().all(|&b| b == b'#');
                if hashes_match {
                    return (close_end, true);
                }
                pos += 1;
            }
            _ => pos += 1,
        }
    }
    (end, false)
}

/// Find the `)` closing an interpolation whose content starts at `start`.
fn find_interpolation_end(bytes: &[u8], start: usize, end: usize) -> Option<usize> {
    let mut depth = 1u32;
    let mut pos = start;
    while pos < end {
        match bytes[pos] {
            b'(' => {
                depth += 1;
                pos += 1;
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
                pos += 1;
            }
            b'"' => {
                let (string_end, terminated) = scan_string_literal(bytes, pos, end, 0, None);
                if !terminated {
                    return None;
                }
                pos = string_end;
            }
            _ => pos += 1,
        }
    }
    None
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
