//! Swift scanner/tokenizer for the weak-self-check analyzer.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `TokenFlags` - Trivia facts the parser needs (whitespace, line breaks)

mod syntax_kind;
pub use syntax_kind::{SyntaxKind, is_self_name, text_to_keyword, token_is_keyword};

mod scanner;
pub use scanner::{ScannerDiagnostic, ScannerSnapshot, ScannerState, Token, TokenFlags};
