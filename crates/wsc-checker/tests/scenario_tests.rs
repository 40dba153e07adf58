//! End-to-end scenarios through the public checker API.

use wsc_checker::{CheckOptions, ClosureSafetyAnalyzer, Whitelist, WhitelistRule};
use wsc_common::{Report, Severity, WEAK_SELF_MESSAGE};
use wsc_index::{IndexAccess, JsonIndexStore, SymbolIndex};

const UNSAFE_CALL: &str = "Dispatcher.default().async { print(self.value) }";

fn method_body(type_keyword: &str, call: &str) -> String {
    format!(
        "{type_keyword} Worker {{\n    var value = 0\n    func start() {{\n        {call}\n    }}\n}}\n"
    )
}

fn run(options: &CheckOptions, index: IndexAccess<'_>, file: &str, source: &str) -> Vec<Report> {
    let analyzer = ClosureSafetyAnalyzer::new(options, index);
    let mut reports = Vec::new();
    analyzer.check_source(file, source, &mut reports);
    reports
}

fn run_plain(source: &str) -> Vec<Report> {
    run(&CheckOptions::default(), IndexAccess::Absent, "Worker.swift", source)
}

fn dispatcher_rule(parent: &str) -> CheckOptions {
    let rule = WhitelistRule::new(Some(parent), "^(async|sync).*").expect("valid rule");
    CheckOptions {
        severity: Severity::Error,
        whitelist: Whitelist::new(vec![rule]),
    }
}

#[test]
fn unsafe_capture_in_class_reports_once() {
    let reports = run_plain(&method_body("class", UNSAFE_CALL));
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.file, "Worker.swift");
    assert_eq!((report.line, report.column), (4, Some(36)));
    assert_eq!(report.severity, Severity::Error);
    assert_eq!(report.message, WEAK_SELF_MESSAGE);
}

#[test]
fn weak_capture_reports_nothing() {
    let call = "Dispatcher.default().async { [weak self] in print(self!.value) }";
    assert!(run_plain(&method_body("class", call)).is_empty());
}

#[test]
fn unowned_capture_reports_nothing() {
    let call = "Dispatcher.default().async { [unowned self] in print(self!.value) }";
    assert!(run_plain(&method_body("class", call)).is_empty());
}

#[test]
fn struct_method_reports_nothing() {
    assert!(run_plain(&method_body("struct", UNSAFE_CALL)).is_empty());
}

#[test]
fn whitelist_parent_pattern_decides() {
    let source = method_body("class", UNSAFE_CALL);
    let index = IndexAccess::Absent;
    assert!(run(&dispatcher_rule("Dispatcher.*"), index, "Worker.swift", &source).is_empty());
    assert_eq!(
        run(&dispatcher_rule("Dispatcher.main*"), index, "Worker.swift", &source).len(),
        1
    );
}

// =============================================================================
// Properties over a handful of contexts
// =============================================================================

const CALLS: &[&str] = &[
    "run { print(self.value) }",
    "queue.async { self.value += 1 }",
    "load(completion: { self.value = 0 })",
    "animate { self.value = 1 } completion: { print(self.value) }",
];

#[test]
fn closures_without_member_access_on_self_never_report() {
    for call in [
        "run { print(value) }",
        "queue.async { register(self) }",
        "load(completion: { other.value = 0 })",
    ] {
        for type_keyword in ["class", "actor", "extension"] {
            assert!(
                run_plain(&method_body(type_keyword, call)).is_empty(),
                "{type_keyword}: {call}"
            );
        }
    }
}

#[test]
fn weak_or_unowned_captures_never_report() {
    for call in CALLS {
        for capture in ["[weak self] in", "[unowned self] in"] {
            let guarded = call.replace("{ ", &format!("{{ {capture} "));
            assert!(
                run_plain(&method_body("class", &guarded)).is_empty(),
                "{guarded}"
            );
        }
    }
}

#[test]
fn parameters_named_self_never_report() {
    for call in CALLS {
        let shadowed = call.replace("{ ", "{ self in ");
        assert!(
            run_plain(&method_body("class", &shadowed)).is_empty(),
            "{shadowed}"
        );
    }
}

#[test]
fn value_types_never_report() {
    for call in CALLS {
        for type_keyword in ["struct", "enum"] {
            assert!(
                run_plain(&method_body(type_keyword, call)).is_empty(),
                "{type_keyword}: {call}"
            );
        }
    }
}

#[test]
fn whitelisted_calls_never_report() {
    let rules = vec![
        WhitelistRule::new(None, "^(run|load|animate)$").expect("valid rule"),
        WhitelistRule::new(Some("^queue$"), "^async$").expect("valid rule"),
    ];
    let options = CheckOptions {
        severity: Severity::Error,
        whitelist: Whitelist::new(rules),
    };
    for call in CALLS {
        let source = method_body("class", call);
        assert!(!run_plain(&source).is_empty(), "{call}");
        assert!(
            run(&options, IndexAccess::Absent, "Worker.swift", &source).is_empty(),
            "{call}"
        );
    }
}

// =============================================================================
// With a symbol index on disk
// =============================================================================

const COUNTER: &str = "extension Counter {\n    func start() {\n        items.forEach { self.add($0) }\n        later { self.go() }\n    }\n}\n";

fn index_json(extended_kind: &str) -> String {
    format!(
        r#"{{
  "file": "Counter.swift",
  "occurrences": [
    {{
      "line": 1, "column": 11, "roles": "REFERENCE | REL_EXTENDED_BY",
      "symbol": {{ "kind": "{extended_kind}", "name": "Counter", "language": "swift" }}
    }},
    {{
      "line": 3, "column": 15, "roles": "REFERENCE | CALL",
      "symbol": {{
        "kind": "instanceMethod",
        "name": "forEach(_:)",
        "linkageName": "s:Swift.Sequence.forEach((A.Element) throws -> ()) throws -> ()",
        "language": "swift"
      }}
    }}
  ]
}}"#
    )
}

fn run_indexed(extended_kind: &str) -> Vec<Report> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("index.json");
    std::fs::write(&path, index_json(extended_kind)).expect("write index");
    let store = JsonIndexStore::open(&path).expect("index loads");
    let index: &dyn SymbolIndex = &store;
    run(
        &CheckOptions::default(),
        IndexAccess::Present(index),
        "Counter.swift",
        COUNTER,
    )
}

#[test]
fn extension_of_indexed_struct_reports_nothing() {
    assert!(run_indexed("struct").is_empty());
}

#[test]
fn extension_of_indexed_class_reports_escaping_closures_only() {
    let reports = run_indexed("class");
    let positions: Vec<_> = reports
        .iter()
        .map(|report| (report.line, report.column))
        .collect();
    assert_eq!(positions, vec![(4, Some(15))]);
}

#[test]
fn extension_without_index_reports_every_closure() {
    let reports = run(
        &CheckOptions::default(),
        IndexAccess::Absent,
        "Counter.swift",
        COUNTER,
    );
    assert_eq!(reports.len(), 2);
}
