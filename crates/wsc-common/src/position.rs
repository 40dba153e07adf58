//! Position and location utilities.
//!
//! The parser records byte offsets, while reports and the symbol index speak
//! in 1-based lines and 1-based UTF-8 columns. This module provides the
//! conversion.

use serde::{Deserialize, Serialize};

/// Source location with both offset and line/column info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Byte offset from start of file
    pub offset: u32,
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column, counted in UTF-8 bytes
    pub column: u32,
}

impl SourceLocation {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        SourceLocation {
            offset,
            line,
            column,
        }
    }
}

/// Line map for efficient offset -> location conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone, Default)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
    /// Total length of the source the map was built from
    len: u32,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];

        for i in memchr::memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[i] == b'\r' {
                // \r followed by \n - the \n will create the line start
                if bytes.get(i + 1) == Some(&b'\n') {
                    continue;
                }
            }
            line_starts.push((i + 1) as u32);
        }

        LineMap {
            line_starts,
            len: bytes.len() as u32,
        }
    }

    /// Convert a byte offset to a 1-based line/column location.
    ///
    /// Offsets past the end of the source are clamped to the end.
    pub fn location(&self, offset: u32) -> SourceLocation {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);

        SourceLocation {
            offset,
            line: line as u32 + 1,
            column: offset - line_start + 1,
        }
    }
}

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod tests;
