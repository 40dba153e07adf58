//! Tests for the syntax-only closure checks.
use crate::capture_list::has_weak_or_unowned_self;
use crate::self_usage::uses_self;
use crate::shadowing::self_is_shadowed;
use wsc_parser::parser::*;

/// Parse `source` and return the arena with its first closure.
fn first_closure(source: &str) -> (NodeArena, NodeIndex) {
    let (arena, root) = wsc_parser::parse("test.swift", source);
    let closure = fold(&arena, root, None, |found, index, node| {
        if matches!(node.kind, NodeKind::Closure(_)) {
            *found = Some(index);
            return VisitControl::Stop;
        }
        VisitControl::Descend
    })
    .expect("closure in source");
    (arena, closure)
}

fn closure_uses_self(source: &str) -> bool {
    let (arena, closure) = first_closure(source);
    let data = arena.get_closure(closure).expect("closure data");
    uses_self(&arena, &data.statements)
}

fn closure_captures_weakly(source: &str) -> bool {
    let (arena, closure) = first_closure(source);
    let data = arena.get_closure(closure).expect("closure data");
    has_weak_or_unowned_self(&arena, &data.captures)
}

fn closure_shadows_self(source: &str) -> bool {
    let (arena, closure) = first_closure(source);
    let data = arena.get_closure(closure).expect("closure data");
    self_is_shadowed(&arena, &data.parameters)
}

// =============================================================================
// Self usage
// =============================================================================

#[test]
fn member_access_on_self_is_usage() {
    assert!(closure_uses_self("run { self.value += 1 }"));
    assert!(closure_uses_self("run { print(self.value) }"));
    assert!(closure_uses_self("run { `self`.reload() }"));
}

#[test]
fn unwrapped_self_is_usage() {
    assert!(closure_uses_self("run { self?.reload() }"));
    assert!(closure_uses_self("run { self!.reload() }"));
}

#[test]
fn bare_self_and_implicit_members_are_not_usage() {
    assert!(!closure_uses_self("run { value += 1 }"));
    assert!(!closure_uses_self("run { register(self) }"));
    assert!(!closure_uses_self("run { let other = self }"));
    assert!(!closure_uses_self("run { other.value = 1 }"));
}

#[test]
fn usage_inside_nested_closure_counts() {
    assert!(closure_uses_self("run { later { self.value = 1 } }"));
}

#[test]
fn usage_inside_statements_and_interpolation_counts() {
    assert!(closure_uses_self(
        "run { if flag { for item in items { self.add(item) } } }"
    ));
    assert!(closure_uses_self(r#"run { print("name: \(self.name)") }"#));
    assert!(closure_uses_self("run { guard ready else { return } ; self.finish() }"));
}

// =============================================================================
// Capture lists
// =============================================================================

#[test]
fn weak_and_unowned_self_captures() {
    assert!(closure_captures_weakly("run { [weak self] in self?.go() }"));
    assert!(closure_captures_weakly("run { [unowned self] in self.go() }"));
    assert!(closure_captures_weakly("run { [unowned(safe) self] in self.go() }"));
    assert!(closure_captures_weakly("run { [unowned(unsafe) self] in self.go() }"));
    assert!(closure_captures_weakly(
        "run { [weak delegate, unowned self] in self.go() }"
    ));
}

#[test]
fn captured_expression_decides() {
    assert!(closure_captures_weakly("run { [weak owner = self] in owner?.go() }"));
    assert!(!closure_captures_weakly("run { [weak other] in self.go() }"));
}

#[test]
fn strong_or_missing_captures() {
    assert!(!closure_captures_weakly("run { [self] in self.go() }"));
    assert!(!closure_captures_weakly("run { self.go() }"));
    assert!(!closure_captures_weakly("run { value in self.go(value) }"));
}

// =============================================================================
// Shadowing
// =============================================================================

#[test]
fn shorthand_parameter_named_self() {
    assert!(closure_shadows_self("run { self in self.go() }"));
    assert!(closure_shadows_self("run { `self` in self.go() }"));
    assert!(closure_shadows_self("run { value, self in self.go(value) }"));
}

#[test]
fn explicit_parameter_named_self() {
    assert!(closure_shadows_self("run { (self: Worker) in self.go() }"));
    assert!(closure_shadows_self("run { (_ self: Worker) -> Void in self.go() }"));
}

#[test]
fn label_named_self_does_not_shadow() {
    assert!(!closure_shadows_self("run { (self other: Worker) in other.go() }"));
    assert!(!closure_shadows_self("run { (value: Int) in self.go(value) }"));
    assert!(!closure_shadows_self("run { self.go() }"));
}
