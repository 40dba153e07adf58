//! Escaping analysis of closure arguments.
//!
//! The called function's declaration is recovered from the symbol index:
//! the callee's linkage name is decoded into a bodiless `func` declaration
//! and parsed, and the parameter receiving the closure is inspected. A
//! closure passed to a non-optional function-typed parameter without
//! `@escaping` cannot outlive the call. Every other outcome, including "no
//! declaration found", is treated as escaping.

use tracing::{debug, trace};
use wsc_index::decode_declaration;
use wsc_parser::parser::{NodeArena, NodeIndex, NodeKind};

use crate::context::CheckerContext;
use crate::resolved::ResolvedKind;

const ESCAPING_ATTRIBUTE: &str = "escaping";
const OPTIONAL_TYPE_NAME: &str = "Optional";

/// What a parameter's type says about a closure passed to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClosureParameterType {
    pub is_function: bool,
    pub is_optional: bool,
    pub is_escaping: bool,
}

impl ClosureParameterType {
    pub fn escaping_kind(self) -> ResolvedKind {
        if self.is_function && !self.is_optional && !self.is_escaping {
            ResolvedKind::DefinitelyNot
        } else {
            ResolvedKind::Definitely
        }
    }
}

impl CheckerContext<'_> {
    /// Whether the closure passed to `call` (under `label`, if any) escapes.
    pub fn resolve_escaping(&self, call: NodeIndex, label: Option<&str>) -> ResolvedKind {
        let Some(position) = self.callee_position(call) else {
            return ResolvedKind::Definitely;
        };
        let location = self.line_map.location(position);
        let Some(linkage_name) =
            self.index
                .callee_declaration(self.file_name, location.line, location.column)
        else {
            return ResolvedKind::Definitely;
        };
        let Some(declaration) = decode_declaration(&linkage_name) else {
            debug!(linkage_name = %linkage_name, "undecodable callee linkage name");
            return ResolvedKind::Definitely;
        };

        let resolved = escaping_in_declaration(&declaration, label);
        debug!(
            file = self.file_name,
            line = location.line,
            column = location.column,
            declaration = %declaration,
            label,
            resolved = %resolved,
            "resolved escaping parameter"
        );
        resolved
    }

    /// Byte offset the index records the call at: the method name of a
    /// member call, else the start of the callee.
    pub fn callee_position(&self, call: NodeIndex) -> Option<u32> {
        let mut callee = self.arena.get_call(call)?.callee;
        loop {
            match self.arena.kind(callee)? {
                NodeKind::MemberAccess(data) => return self.arena.pos(data.name),
                NodeKind::GenericSpecialization(data) => callee = data.base,
                NodeKind::Postfix(data) => callee = data.operand,
                _ => return self.arena.pos(callee),
            }
        }
    }
}

/// Resolve escaping against declaration source such as
/// `func run(completion: () -> ()) {}`.
pub fn escaping_in_declaration(declaration: &str, label: Option<&str>) -> ResolvedKind {
    let (arena, root) = wsc_parser::parse("<declaration>", declaration);
    let Some(function) = arena
        .first_function(root)
        .and_then(|function| arena.get_function(function))
    else {
        return ResolvedKind::Definitely;
    };
    let Some(parameter) = match_parameter(&arena, &function.parameters, label) else {
        trace!(label, "no unique parameter for closure argument");
        return ResolvedKind::Definitely;
    };
    let ty = arena
        .get_parameter(parameter)
        .map_or(NodeIndex::NONE, |data| data.ty);
    closure_parameter_type(&arena, ty).escaping_kind()
}

/// The parameter a closure argument binds to.
///
/// A labeled argument matches the parameter whose local (or sole) name is
/// the label. An unlabeled one matches the only function-typed parameter.
pub fn match_parameter(
    arena: &NodeArena,
    parameters: &[NodeIndex],
    label: Option<&str>,
) -> Option<NodeIndex> {
    if let Some(label) = label {
        return parameters.iter().copied().find(|&parameter| {
            arena
                .get_parameter(parameter)
                .is_some_and(|data| arena.text(data.binding_name()) == label)
        });
    }

    let mut closure_parameters = parameters.iter().copied().filter(|&parameter| {
        arena
            .get_parameter(parameter)
            .is_some_and(|data| closure_parameter_type(arena, data.ty).is_function)
    });
    let first = closure_parameters.next()?;
    if closure_parameters.next().is_some() {
        return None;
    }
    Some(first)
}

/// Look through attributes, parentheses and optionals down to a function
/// type.
pub fn closure_parameter_type(arena: &NodeArena, ty: NodeIndex) -> ClosureParameterType {
    let mut result = ClosureParameterType::default();
    let mut current = ty;
    // Top-level attributes only: `@escaping` inside an optional is not legal.
    let mut top_level = true;
    loop {
        let Some(kind) = arena.kind(current) else {
            return result;
        };
        match kind {
            NodeKind::FunctionType(_) => {
                result.is_function = true;
                return result;
            }
            NodeKind::AttributedType(data) => {
                if top_level && has_escaping_attribute(arena, &data.attributes) {
                    result.is_escaping = true;
                }
                current = data.base;
            }
            NodeKind::OptionalType(data) => {
                result.is_optional = true;
                current = data.wrapped;
            }
            NodeKind::TupleType(data) if data.elements.len() == 1 => {
                match arena.kind(data.elements[0]) {
                    Some(NodeKind::TupleTypeElement(element))
                        if element.first_name.is_none() =>
                    {
                        current = element.ty;
                    }
                    _ => return result,
                }
            }
            // `Optional<...>` and `Swift.Optional<...>`
            NodeKind::TypeRef(data)
                if arena.text(data.name) == OPTIONAL_TYPE_NAME
                    && data.generic_arguments.len() == 1 =>
            {
                result.is_optional = true;
                current = data.generic_arguments[0];
            }
            _ => return result,
        }
        top_level = false;
    }
}

fn has_escaping_attribute(arena: &NodeArena, attributes: &[NodeIndex]) -> bool {
    attributes.iter().any(|&attribute| match arena.kind(attribute) {
        Some(NodeKind::Attribute(data)) => arena.text(data.name) == ESCAPING_ATTRIBUTE,
        _ => false,
    })
}
