//! Reference semantics of the type a closure is written in.
//!
//! The nearest enclosing type declaration decides: classes and actors are
//! reference types, structs and enums are value types. Inside an
//! `extension` or `protocol` the extended type is looked up in the symbol
//! index, when one is available.

use tracing::debug;
use wsc_index::{Occurrence, SymbolKind, SymbolRoles};
use wsc_parser::NodeIndex;
use wsc_parser::parser::{NodeKind, TypeDeclData, TypeDeclKind};

use crate::context::CheckerContext;
use crate::resolved::ResolvedKind;

/// `Optional` is an enum, but an extension of it says nothing about the
/// wrapped type.
const OPTIONAL_TYPE_NAME: &str = "Optional";

impl CheckerContext<'_> {
    /// Whether the closure at `node` lives inside a reference type.
    pub fn resolve_reference_type(&self, node: NodeIndex) -> ResolvedKind {
        for ancestor in self.arena.ancestors(node) {
            let Some(decl) = self.arena.get_type_decl(ancestor) else {
                continue;
            };
            return match decl.kind {
                TypeDeclKind::Class | TypeDeclKind::Actor => ResolvedKind::Definitely,
                TypeDeclKind::Struct | TypeDeclKind::Enum => ResolvedKind::DefinitelyNot,
                TypeDeclKind::Extension | TypeDeclKind::Protocol => {
                    self.resolve_extended_type(decl)
                }
            };
        }
        ResolvedKind::Indeterminate
    }

    fn resolve_extended_type(&self, decl: &TypeDeclData) -> ResolvedKind {
        if !self.index.is_present() {
            return ResolvedKind::Indeterminate;
        }
        let name = self.extended_type_name(decl.name);
        let Some(location) = self.location(name) else {
            return ResolvedKind::Indeterminate;
        };
        let occurrences =
            self.index
                .occurrences_near(self.file_name, location.line, location.column);
        let resolved = occurrences
            .iter()
            .find(|occurrence| is_extended_type_reference(occurrence))
            .map_or(ResolvedKind::Indeterminate, classify_extended_type);
        debug!(
            file = self.file_name,
            line = location.line,
            column = location.column,
            extended = self.arena.text(name),
            resolved = %resolved,
            "resolved extended type"
        );
        resolved
    }

    /// The last name of a possibly qualified type (`Bar` in `Foo.Bar<T>`).
    fn extended_type_name(&self, name: NodeIndex) -> NodeIndex {
        match self.arena.kind(name) {
            Some(NodeKind::TypeRef(data)) => data.name,
            _ => name,
        }
    }
}

fn is_extended_type_reference(occurrence: &Occurrence) -> bool {
    occurrence.has_roles(SymbolRoles::REFERENCE | SymbolRoles::REL_EXTENDED_BY)
        && !occurrence.is_system
}

fn classify_extended_type(occurrence: &Occurrence) -> ResolvedKind {
    match occurrence.symbol.kind {
        SymbolKind::Class => ResolvedKind::Definitely,
        SymbolKind::Struct | SymbolKind::Enum
            if occurrence.symbol.name != OPTIONAL_TYPE_NAME =>
        {
            ResolvedKind::DefinitelyNot
        }
        _ => ResolvedKind::Indeterminate,
    }
}
