//! The query surface the analyzer uses, and its present/absent wrapper.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::symbol::{Occurrence, SymbolLanguage, SymbolRoles};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read index store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed index unit {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("index store path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("no JSON index units in {0}")]
    NoUnits(PathBuf),

    #[error("no index records for {0}")]
    UnknownFile(String),
}

/// A read-only symbol index.
///
/// Implementations are opened once and then queried concurrently from
/// per-file analyses, so queries must not mutate observable state.
pub trait SymbolIndex: Send + Sync {
    /// Occurrences recorded at a 1-based `line` / `column` in `file`.
    fn occurrences_near(
        &self,
        file: &str,
        line: u32,
        column: u32,
    ) -> Result<Vec<Occurrence>, IndexError>;

    /// Linkage name of the function called at the given position.
    fn callee_declaration(
        &self,
        file: &str,
        line: u32,
        column: u32,
    ) -> Result<Option<String>, IndexError> {
        let occurrences = self.occurrences_near(file, line, column)?;
        Ok(occurrences
            .into_iter()
            .find(|occurrence| {
                occurrence.has_roles(SymbolRoles::REFERENCE | SymbolRoles::CALL)
                    && occurrence.symbol.kind.is_callable()
                    && occurrence.symbol.language == SymbolLanguage::Swift
            })
            .map(|occurrence| occurrence.symbol.linkage_name))
    }
}

/// Optional access to a symbol index.
///
/// Every error is swallowed here: resolvers only ever see "some answer"
/// or "no information".
#[derive(Clone, Copy, Default)]
pub enum IndexAccess<'a> {
    Present(&'a dyn SymbolIndex),
    #[default]
    Absent,
}

impl<'a> IndexAccess<'a> {
    pub fn from_option(index: Option<&'a dyn SymbolIndex>) -> Self {
        match index {
            Some(index) => IndexAccess::Present(index),
            None => IndexAccess::Absent,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, IndexAccess::Present(_))
    }

    /// Occurrences at a position; empty when absent or on failure.
    pub fn occurrences_near(&self, file: &str, line: u32, column: u32) -> Vec<Occurrence> {
        let IndexAccess::Present(index) = self else {
            return Vec::new();
        };
        match index.occurrences_near(file, line, column) {
            Ok(occurrences) => occurrences,
            Err(err) => {
                debug!(file, line, column, error = %err, "index lookup failed");
                Vec::new()
            }
        }
    }

    /// Linkage name of the callee at a position; `None` when absent or on failure.
    pub fn callee_declaration(&self, file: &str, line: u32, column: u32) -> Option<String> {
        let IndexAccess::Present(index) = self else {
            return None;
        };
        match index.callee_declaration(file, line, column) {
            Ok(linkage_name) => linkage_name,
            Err(err) => {
                debug!(file, line, column, error = %err, "callee lookup failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for IndexAccess<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexAccess::Present(_) => f.write_str("IndexAccess::Present"),
            IndexAccess::Absent => f.write_str("IndexAccess::Absent"),
        }
    }
}
