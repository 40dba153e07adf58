//! Resilient Swift parser for the weak-self-check analyzer.
//!
//! This crate provides:
//! - `NodeArena` / `NodeIndex` - arena of tagged-union syntax nodes with parent links
//! - `ParserState` - recursive-descent parser that never fails
//! - `fold` - explicit-stack pre-order traversal

pub mod parser;

pub use parser::{
    NodeArena, NodeIndex, NodeKind, ParseDiagnostic, ParserState, VisitControl, fold,
};

/// Parse `source` and return the arena together with the root node.
pub fn parse(file_name: impl Into<String>, source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new(file_name.into(), source);
    let root = parser.parse_source_file();
    (parser.into_arena(), root)
}

#[cfg(test)]
#[path = "../tests/tests.rs"]
mod tests;
#[cfg(test)]
#[path = "../tests/state_statement_tests.rs"]
mod state_statement_tests;
#[cfg(test)]
#[path = "../tests/state_expression_tests.rs"]
mod state_expression_tests;
#[cfg(test)]
#[path = "../tests/state_type_tests.rs"]
mod state_type_tests;
