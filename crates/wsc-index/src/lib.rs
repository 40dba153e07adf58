//! Symbol index access for the weak-self-check analyzer.
//!
//! This crate provides:
//! - `Occurrence` / `Symbol` / `SymbolRoles` - records read from a pre-built index
//! - `SymbolIndex` - query trait answered by an index backend
//! - `IndexAccess` - present/absent wrapper that turns index failures into "no information"
//! - `JsonIndexStore` - backend reading a JSON dump of an index store
//! - `decode_declaration` - rebuilds a function declaration skeleton from a linkage name

pub mod symbol;
pub use symbol::{Occurrence, Symbol, SymbolKind, SymbolLanguage, SymbolRoles};

pub mod access;
pub use access::{IndexAccess, IndexError, SymbolIndex};

pub mod json_store;
pub use json_store::JsonIndexStore;

pub mod decoder;
pub use decoder::decode_declaration;

#[cfg(test)]
#[path = "../tests/symbol_tests.rs"]
mod symbol_tests;
#[cfg(test)]
#[path = "../tests/json_store_tests.rs"]
mod json_store_tests;
#[cfg(test)]
#[path = "../tests/decoder_tests.rs"]
mod decoder_tests;
