//! Report types shared by the checker and its sinks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message attached to every unsafe-capture report.
pub const WEAK_SELF_MESSAGE: &str =
    "Use a weak reference to the enclosing instance to avoid memory leaks.";

/// Report severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    #[default]
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding. Immutable once built; compared structurally.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Report {
    pub file: String,
    /// 1-indexed line
    pub line: u32,
    /// 1-indexed UTF-8 column, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    pub severity: Severity,
    pub message: String,
}

impl Report {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        column: Option<u32>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            severity,
            message: message.into(),
        }
    }

    /// Build the standard unsafe-capture report.
    pub fn weak_self(file: impl Into<String>, line: u32, column: u32, severity: Severity) -> Self {
        Self::new(file, line, Some(column), severity, WEAK_SELF_MESSAGE)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
