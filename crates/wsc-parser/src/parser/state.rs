//! Parser state: token cursor, context flags, diagnostics and speculation.
//!
//! The parser is resilient. Every parse method returns a node (possibly
//! `Missing`) instead of failing, records a `ParseDiagnostic`, and every loop
//! consumes at least one token per iteration.

use std::sync::Arc;
use tracing::trace;
use wsc_common::limits::MAX_PARSER_RECURSION_DEPTH;
use wsc_scanner::{ScannerSnapshot, ScannerState, SyntaxKind};

use super::base::NodeIndex;
use super::node::{IdentifierData, NodeArena, NodeKind};

/// Trailing closures are not allowed (condition of `if`, `while`, `for`, ...).
pub(crate) const CONTEXT_FLAG_NO_TRAILING_CLOSURE: u32 = 1 << 0;
/// Directly inside a type body (`case` starts an enum case).
pub(crate) const CONTEXT_FLAG_IN_TYPE_BODY: u32 = 1 << 1;

/// A syntax error recorded while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
}

/// Saved parser position for speculative parsing.
pub(crate) struct ParserSnapshot {
    scanner: ScannerSnapshot,
    current_token: SyntaxKind,
    previous_end: u32,
    arena_len: usize,
    diagnostics_len: usize,
    last_error_pos: Option<u32>,
    context_flags: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) context_flags: u32,
    pub(crate) current_token: SyntaxKind,
    /// End of the last consumed token
    pub(crate) previous_end: u32,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    last_error_pos: Option<u32>,
    recursion_depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source: &str) -> ParserState {
        let text: Arc<str> = Arc::from(source);
        ParserState {
            scanner: ScannerState::new(Arc::clone(&text)),
            arena: NodeArena::with_capacity_for(text),
            file_name,
            context_flags: 0,
            current_token: SyntaxKind::Unknown,
            previous_end: 0,
            parse_diagnostics: Vec::new(),
            last_error_pos: None,
            recursion_depth: 0,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token().pos
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token().end
    }

    pub(crate) fn token_text(&self) -> &str {
        self.scanner.token_text()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.previous_end = self.scanner.token().end;
        self.current_token = self.scanner.scan();
        self.current_token
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.token().has_preceding_line_break()
    }

    #[inline]
    pub(crate) fn has_preceding_whitespace(&self) -> bool {
        self.scanner.token().has_preceding_whitespace()
    }

    /// Whether the byte right after the current token is trivia or a closer.
    pub(crate) fn has_following_whitespace(&self) -> bool {
        let end = self.token_end() as usize;
        match self.scanner.source_text().as_bytes().get(end) {
            None => true,
            Some(b) => matches!(
                b,
                b' ' | b'\t' | b'\n' | b'\r' | b')' | b']' | b'}' | b',' | b';' | b':'
            ),
        }
    }

    /// Current token is an identifier with the given text.
    pub(crate) fn is_contextual(&self, text: &str) -> bool {
        self.current_token == SyntaxKind::Identifier && self.token_text() == text
    }

    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.current_token.is_identifier_or_keyword()
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind, message: &str) -> bool {
        if self.parse_optional(kind) {
            true
        } else {
            self.error_at_current_token(message);
            false
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current_token == SyntaxKind::EndOfFileToken
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Record an error at the current token. Only one error is kept per
    /// position so cascading failures do not flood the output.
    pub(crate) fn error_at_current_token(&mut self, message: &str) {
        let start = self.token_pos();
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        trace!(pos = start, message, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length: self.token_end().saturating_sub(start),
            message: message.to_string(),
        });
    }

    pub(crate) fn collect_scanner_diagnostics(&mut self) {
        for diag in self.scanner.diagnostics() {
            self.parse_diagnostics.push(ParseDiagnostic {
                start: diag.pos,
                length: diag.length,
                message: diag.message.to_string(),
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Enter a recursive production. Returns false (after recording an
    /// error and consuming the current token) when the depth limit is hit.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            self.error_at_current_token("Maximum nesting depth exceeded.");
            if !self.is_at_end() {
                self.next_token();
            }
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Context flags
    // =========================================================================

    #[inline]
    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    /// Run `f` with `set` flags added and `clear` flags removed.
    pub(crate) fn with_context<T>(
        &mut self,
        set: u32,
        clear: u32,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context_flags;
        self.context_flags = (saved | set) & !clear;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    // =========================================================================
    // Look-ahead and speculation
    // =========================================================================

    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.save_state(),
            current_token: self.current_token,
            previous_end: self.previous_end,
            arena_len: self.arena.len(),
            diagnostics_len: self.parse_diagnostics.len(),
            last_error_pos: self.last_error_pos,
            context_flags: self.context_flags,
        }
    }

    pub(crate) fn rewind(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore_state(snapshot.scanner);
        self.current_token = snapshot.current_token;
        self.previous_end = snapshot.previous_end;
        self.arena.truncate(snapshot.arena_len);
        self.parse_diagnostics.truncate(snapshot.diagnostics_len);
        self.last_error_pos = snapshot.last_error_pos;
        self.context_flags = snapshot.context_flags;
    }

    /// Evaluate `f` and restore the parser to where it was.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        self.rewind(snapshot);
        result
    }

    /// Run `f`; keep its effects when it returns `Some`, undo them otherwise.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.snapshot();
        let result = f(self);
        if result.is_none() {
            self.rewind(snapshot);
        }
        result
    }

    // =========================================================================
    // Node helpers
    // =========================================================================

    /// Create an identifier node from the current token and advance.
    pub(crate) fn parse_identifier_node(&mut self) -> NodeIndex {
        let token = self.current_token;
        let pos = self.token_pos();
        let end = self.token_end();
        self.next_token();
        self.arena
            .add(NodeKind::Identifier(IdentifierData { token }), pos, end)
    }

    /// Create a `Missing` node at the current token without consuming it.
    pub(crate) fn missing_node(&mut self, message: &str) -> NodeIndex {
        self.error_at_current_token(message);
        let pos = self.token_pos();
        self.arena.add(NodeKind::Missing, pos, pos)
    }

    pub(crate) fn finish_node(&mut self, kind: NodeKind, pos: u32) -> NodeIndex {
        let end = self.previous_end.max(pos);
        self.arena.add(kind, pos, end)
    }

    /// Skip a balanced `open ... close` group starting at the current token.
    pub(crate) fn skip_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) {
        if !self.is_token(open) {
            return;
        }
        let mut depth = 0u32;
        loop {
            let token = self.token();
            if token == SyntaxKind::EndOfFileToken {
                return;
            }
            if token == open {
                depth += 1;
            } else if token == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    self.next_token();
                    return;
                }
            }
            self.next_token();
        }
    }

    /// Skip tokens up to the end of the current line.
    pub(crate) fn skip_rest_of_line(&mut self) {
        while !self.is_at_end() {
            self.next_token();
            if self.has_preceding_line_break() {
                break;
            }
        }
    }
}
