//! Shared helpers for checker unit tests.
use wsc_index::{
    IndexError, Occurrence, Symbol, SymbolIndex, SymbolKind, SymbolLanguage, SymbolRoles,
};
use wsc_parser::parser::*;

/// In-memory index answering exact line/column lookups.
#[derive(Default)]
pub struct FakeIndex {
    occurrences: Vec<Occurrence>,
}

impl FakeIndex {
    pub fn with(
        mut self,
        line: u32,
        column: u32,
        kind: SymbolKind,
        name: &str,
        roles: SymbolRoles,
    ) -> Self {
        self.occurrences.push(Occurrence {
            symbol: Symbol {
                kind,
                name: name.to_string(),
                linkage_name: String::new(),
                language: SymbolLanguage::Swift,
            },
            roles,
            line,
            column,
            is_system: false,
        });
        self
    }

    /// A called function at `line`/`column` with the given linkage name.
    pub fn with_callee(mut self, line: u32, column: u32, linkage_name: &str) -> Self {
        self.occurrences.push(Occurrence {
            symbol: Symbol {
                kind: SymbolKind::InstanceMethod,
                name: String::new(),
                linkage_name: linkage_name.to_string(),
                language: SymbolLanguage::Swift,
            },
            roles: SymbolRoles::REFERENCE | SymbolRoles::CALL,
            line,
            column,
            is_system: false,
        });
        self
    }

    pub fn mark_last_system(mut self) -> Self {
        if let Some(last) = self.occurrences.last_mut() {
            last.is_system = true;
        }
        self
    }
}

impl SymbolIndex for FakeIndex {
    fn occurrences_near(
        &self,
        _file: &str,
        line: u32,
        column: u32,
    ) -> Result<Vec<Occurrence>, IndexError> {
        Ok(self
            .occurrences
            .iter()
            .filter(|occurrence| occurrence.line == line && occurrence.column == column)
            .cloned()
            .collect())
    }
}

/// Index whose every query fails.
pub struct BrokenIndex;

impl SymbolIndex for BrokenIndex {
    fn occurrences_near(
        &self,
        file: &str,
        _line: u32,
        _column: u32,
    ) -> Result<Vec<Occurrence>, IndexError> {
        Err(IndexError::UnknownFile(file.to_string()))
    }
}

/// Nodes of one kind in source order.
pub fn nodes_where(
    arena: &NodeArena,
    root: NodeIndex,
    predicate: impl Fn(&NodeKind) -> bool,
) -> Vec<NodeIndex> {
    fold(arena, root, Vec::new(), |found, index, node| {
        if predicate(&node.kind) {
            found.push(index);
        }
        VisitControl::Descend
    })
}

pub fn closures(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    nodes_where(arena, root, |kind| matches!(kind, NodeKind::Closure(_)))
}

pub fn calls(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    nodes_where(arena, root, |kind| matches!(kind, NodeKind::Call(_)))
}
