//! Tests for type parsing in the parser.
use crate::parser::*;

/// Parse `let x: <ty>` and return the arena with the annotated type.
fn parse_type_annotation(ty: &str) -> (NodeArena, NodeIndex) {
    let source = format!("let x: {ty}");
    let mut parser = ParserState::new("test.swift".to_string(), &source);
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "{ty}: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.into_arena();
    let binding = fold(&arena, root, None, |found, index, node| {
        if matches!(node.kind, NodeKind::PatternBinding(_)) {
            *found = Some(index);
            return VisitControl::Stop;
        }
        VisitControl::Descend
    })
    .expect("pattern binding");
    let ty = match arena.kind(binding) {
        Some(NodeKind::PatternBinding(data)) => data.ty,
        _ => unreachable!(),
    };
    (arena, ty)
}

#[test]
fn parse_simple_and_generic_type_references() {
    let (arena, ty) = parse_type_annotation("Int");
    let data = arena.get_type_ref(ty).expect("type reference");
    assert_eq!(arena.text(data.name), "Int");
    assert!(data.base.is_none());
    assert!(data.generic_arguments.is_empty());

    let (arena, ty) = parse_type_annotation("Result<Int, Error>");
    let data = arena.get_type_ref(ty).expect("type reference");
    assert_eq!(data.generic_arguments.len(), 2);
}

#[test]
fn parse_nested_member_type() {
    let (arena, ty) = parse_type_annotation("Foo.Bar<Int>.Baz");
    let outer = arena.get_type_ref(ty).expect("type reference");
    assert_eq!(arena.text(outer.name), "Baz");
    let middle = arena.get_type_ref(outer.base).expect("qualifier");
    assert_eq!(arena.text(middle.name), "Bar");
    assert_eq!(middle.generic_arguments.len(), 1);
    let inner = arena.get_type_ref(middle.base).expect("qualifier");
    assert_eq!(arena.text(inner.name), "Foo");
}

#[test]
fn parse_optional_function_type() {
    let (arena, ty) = parse_type_annotation("(() -> Void)?");
    let Some(NodeKind::OptionalType(optional)) = arena.kind(ty) else {
        panic!("expected optional type");
    };
    assert!(!optional.implicitly_unwrapped);
    let Some(NodeKind::TupleType(tuple)) = arena.kind(optional.wrapped) else {
        panic!("expected parenthesized type");
    };
    assert_eq!(tuple.elements.len(), 1);
    let Some(NodeKind::TupleTypeElement(element)) = arena.kind(tuple.elements[0]) else {
        panic!("expected tuple element");
    };
    let Some(NodeKind::FunctionType(function)) = arena.kind(element.ty) else {
        panic!("expected function type");
    };
    assert!(function.parameters.is_empty());
    assert!(arena.get_type_ref(function.result).is_some());
}

#[test]
fn parse_attributed_function_type_with_effects() {
    let (arena, ty) = parse_type_annotation("@escaping @Sendable (Int) async throws -> Void");
    let Some(NodeKind::AttributedType(attributed)) = arena.kind(ty) else {
        panic!("expected attributed type");
    };
    assert_eq!(attributed.attributes.len(), 2);
    assert!(attributed.specifier.is_none());
    let names: Vec<&str> = attributed
        .attributes
        .iter()
        .filter_map(|&a| match arena.kind(a) {
            Some(NodeKind::Attribute(data)) => Some(arena.text(data.name)),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["escaping", "Sendable"]);
    let Some(NodeKind::FunctionType(function)) = arena.kind(attributed.base) else {
        panic!("expected function type");
    };
    assert_eq!(function.parameters.len(), 1);
}

#[test]
fn parse_inout_collection_type() {
    let (arena, ty) = parse_type_annotation("inout [String: Any]");
    let Some(NodeKind::AttributedType(attributed)) = arena.kind(ty) else {
        panic!("expected attributed type");
    };
    assert!(attributed.attributes.is_empty());
    assert_eq!(arena.text(attributed.specifier), "inout");
    let Some(NodeKind::CollectionType(collection)) = arena.kind(attributed.base) else {
        panic!("expected dictionary type");
    };
    assert_eq!(collection.elements.len(), 2);
}

#[test]
fn parse_opaque_and_existential_types() {
    let (arena, ty) = parse_type_annotation("some View");
    let Some(NodeKind::OpaqueType(opaque)) = arena.kind(ty) else {
        panic!("expected opaque type");
    };
    assert!(!opaque.existential);

    let (arena, ty) = parse_type_annotation("any Error & Sendable");
    let Some(NodeKind::OpaqueType(existential)) = arena.kind(ty) else {
        panic!("expected existential type");
    };
    assert!(existential.existential);
    assert!(matches!(
        arena.kind(existential.base),
        Some(NodeKind::CompositionType(_))
    ));
}

#[test]
fn parse_labeled_tuple_type() {
    let (arena, ty) = parse_type_annotation("(label: Int, _ second: String)");
    let Some(NodeKind::TupleType(tuple)) = arena.kind(ty) else {
        panic!("expected tuple type");
    };
    let elements: Vec<&TupleTypeElementData> = tuple
        .elements
        .iter()
        .filter_map(|&e| match arena.kind(e) {
            Some(NodeKind::TupleTypeElement(data)) => Some(data),
            _ => None,
        })
        .collect();
    assert_eq!(elements.len(), 2);
    assert_eq!(arena.text(elements[0].first_name), "label");
    assert!(elements[0].second_name.is_none());
    assert_eq!(arena.text(elements[1].first_name), "_");
    assert_eq!(arena.text(elements[1].second_name), "second");
}

#[test]
fn parse_implicitly_unwrapped_array() {
    let (arena, ty) = parse_type_annotation("[Int]!");
    let Some(NodeKind::OptionalType(optional)) = arena.kind(ty) else {
        panic!("expected optional type");
    };
    assert!(optional.implicitly_unwrapped);
    assert!(matches!(
        arena.kind(optional.wrapped),
        Some(NodeKind::CollectionType(_))
    ));
}

#[test]
fn parse_missing_type_reports_error() {
    let mut parser = ParserState::new("test.swift".to_string(), "let x: = 1");
    parser.parse_source_file();
    assert!(
        parser
            .get_diagnostics()
            .iter()
            .any(|d| d.message == "Type expected.")
    );
}
