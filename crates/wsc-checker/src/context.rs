//! Per-file state shared by the resolvers.

use wsc_common::{LineMap, SourceLocation};
use wsc_index::IndexAccess;
use wsc_parser::{NodeArena, NodeIndex};

/// Everything a resolver may consult while checking one file.
///
/// Built once per file and never mutated; the symbol index behind `index`
/// is shared read-only across files.
pub struct CheckerContext<'a> {
    pub file_name: &'a str,
    pub arena: &'a NodeArena,
    pub line_map: &'a LineMap,
    pub index: IndexAccess<'a>,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        file_name: &'a str,
        arena: &'a NodeArena,
        line_map: &'a LineMap,
        index: IndexAccess<'a>,
    ) -> Self {
        CheckerContext {
            file_name,
            arena,
            line_map,
            index,
        }
    }

    /// 1-based line and column of a node's first byte.
    pub fn location(&self, node: NodeIndex) -> Option<SourceLocation> {
        self.arena.pos(node).map(|pos| self.line_map.location(pos))
    }
}
