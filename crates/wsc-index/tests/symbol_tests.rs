//! Tests for symbol records and the index access wrapper.
use crate::access::{IndexAccess, IndexError, SymbolIndex};
use crate::symbol::*;

fn occurrence(kind: SymbolKind, roles: SymbolRoles, linkage_name: &str) -> Occurrence {
    Occurrence {
        symbol: Symbol {
            kind,
            name: "run".to_string(),
            linkage_name: linkage_name.to_string(),
            language: SymbolLanguage::Swift,
        },
        roles,
        line: 3,
        column: 9,
        is_system: false,
    }
}

#[test]
fn roles_deserialize_from_flag_names() {
    let json = r#"{
        "symbol": { "kind": "class", "name": "Session" },
        "roles": "REFERENCE | REL_EXTENDED_BY",
        "line": 1,
        "column": 11
    }"#;
    let occurrence: Occurrence = serde_json::from_str(json).expect("valid occurrence");
    assert!(occurrence.has_roles(SymbolRoles::REFERENCE | SymbolRoles::REL_EXTENDED_BY));
    assert!(!occurrence.has_roles(SymbolRoles::CALL));
    assert_eq!(occurrence.symbol.kind, SymbolKind::Class);
    assert_eq!(occurrence.symbol.language, SymbolLanguage::Swift);
    assert!(!occurrence.is_system);
}

#[test]
fn roles_serialize_as_flag_names() {
    let value = serde_json::to_value(SymbolRoles::REFERENCE | SymbolRoles::CALL).expect("json");
    assert_eq!(value, serde_json::json!("REFERENCE | CALL"));
}

#[test]
fn unknown_symbol_kinds_fall_back() {
    let symbol: Symbol =
        serde_json::from_str(r#"{ "kind": "commentTag", "name": "x" }"#).expect("valid symbol");
    assert_eq!(symbol.kind, SymbolKind::Unknown);
}

#[test]
fn callable_kinds() {
    for kind in [
        SymbolKind::InstanceMethod,
        SymbolKind::ClassMethod,
        SymbolKind::StaticMethod,
        SymbolKind::Constructor,
        SymbolKind::Function,
        SymbolKind::ConversionFunction,
    ] {
        assert!(kind.is_callable(), "{kind:?}");
    }
    for kind in [
        SymbolKind::Class,
        SymbolKind::InstanceProperty,
        SymbolKind::Destructor,
        SymbolKind::Unknown,
    ] {
        assert!(!kind.is_callable(), "{kind:?}");
    }
}

struct FixedIndex(Vec<Occurrence>);

impl SymbolIndex for FixedIndex {
    fn occurrences_near(
        &self,
        _file: &str,
        _line: u32,
        _column: u32,
    ) -> Result<Vec<Occurrence>, IndexError> {
        Ok(self.0.clone())
    }
}

struct FailingIndex;

impl SymbolIndex for FailingIndex {
    fn occurrences_near(
        &self,
        file: &str,
        _line: u32,
        _column: u32,
    ) -> Result<Vec<Occurrence>, IndexError> {
        Err(IndexError::UnknownFile(file.to_string()))
    }
}

#[test]
fn callee_declaration_requires_call_role_and_callable_kind() {
    let index = FixedIndex(vec![
        occurrence(SymbolKind::InstanceProperty, SymbolRoles::REFERENCE | SymbolRoles::CALL, "prop"),
        occurrence(SymbolKind::InstanceMethod, SymbolRoles::REFERENCE, "not-called"),
        occurrence(
            SymbolKind::InstanceMethod,
            SymbolRoles::REFERENCE | SymbolRoles::CALL | SymbolRoles::DYNAMIC,
            "App.Session.run(completion: () -> ())",
        ),
    ]);
    assert_eq!(
        index.callee_declaration("a.swift", 3, 9).expect("lookup").as_deref(),
        Some("App.Session.run(completion: () -> ())")
    );
}

#[test]
fn callee_declaration_skips_other_languages() {
    let mut objc = occurrence(
        SymbolKind::InstanceMethod,
        SymbolRoles::REFERENCE | SymbolRoles::CALL,
        "c:objc(cs)Session(im)run:",
    );
    objc.symbol.language = SymbolLanguage::ObjC;
    let index = FixedIndex(vec![objc]);
    assert_eq!(index.callee_declaration("a.swift", 3, 9).expect("lookup"), None);
}

#[test]
fn absent_access_has_no_information() {
    let access = IndexAccess::Absent;
    assert!(!access.is_present());
    assert!(access.occurrences_near("a.swift", 1, 1).is_empty());
    assert_eq!(access.callee_declaration("a.swift", 1, 1), None);
}

#[test]
fn failing_index_is_swallowed() {
    let index = FailingIndex;
    let access = IndexAccess::Present(&index);
    assert!(access.is_present());
    assert!(access.occurrences_near("a.swift", 1, 1).is_empty());
    assert_eq!(access.callee_declaration("a.swift", 1, 1), None);
}

#[test]
fn present_access_forwards_answers() {
    let index = FixedIndex(vec![occurrence(
        SymbolKind::Function,
        SymbolRoles::REFERENCE | SymbolRoles::CALL,
        "App.perform(_: () -> ())",
    )]);
    let access = IndexAccess::from_option(Some(&index as &dyn SymbolIndex));
    assert_eq!(access.occurrences_near("a.swift", 3, 9).len(), 1);
    assert_eq!(
        access.callee_declaration("a.swift", 3, 9).as_deref(),
        Some("App.perform(_: () -> ())")
    );
}
