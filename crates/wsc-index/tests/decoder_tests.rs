//! Tests for linkage-name decoding.
use crate::decoder::decode_declaration;
use wsc_common::limits::MAX_LINKAGE_NAME_LEN;

#[test]
fn decode_qualified_method() {
    assert_eq!(
        decode_declaration("s:Dispatch.DispatchQueue.async(execute: @escaping () -> ()) -> ()")
            .as_deref(),
        Some("func async(execute: @escaping () -> ()) -> () {}")
    );
}

#[test]
fn decode_without_language_prefix() {
    assert_eq!(
        decode_declaration("UIKit.UIView.animate(withDuration: Swift.Double, animations: @escaping () -> ())")
            .as_deref(),
        Some("func animate(withDuration: Swift.Double, animations: @escaping () -> ()) {}")
    );
}

#[test]
fn decode_rejects_c_family_names() {
    assert_eq!(decode_declaration("c:objc(cs)NSObject(im)performSelector:"), None);
}

#[test]
fn decode_drops_extension_context() {
    assert_eq!(
        decode_declaration("(extension in MyKit):Swift.Array.chunked<A>(by: (A) -> Swift.Bool) -> [[A]]")
            .as_deref(),
        Some("func chunked<A>(by: (A) -> Swift.Bool) -> [[A]] {}")
    );
}

#[test]
fn decode_keeps_generic_arguments_out_of_qualifier() {
    let decoded = decode_declaration(
        "App.Cache<Swift.Dictionary<Swift.String, App.Entry.Key>>.load<A>(key: A, completion: (Swift.Result<A, Swift.Error>) -> ()) -> ()",
    );
    assert_eq!(
        decoded.as_deref(),
        Some(
            "func load<A>(key: A, completion: (Swift.Result<A, Swift.Error>) -> ()) -> () {}"
        )
    );
}

#[test]
fn decode_function_type_inside_generic_qualifier() {
    assert_eq!(
        decode_declaration("s:M.Box<(Swift.Int) -> Swift.Int>.map(transform: (A) -> B) -> B")
            .as_deref(),
        Some("func map(transform: (A) -> B) -> B {}")
    );
    assert_eq!(
        decode_declaration(
            "s:M.Outer<M.Inner<(Swift.String) -> ()>>.run(body: @escaping () -> ()) -> ()"
        )
        .as_deref(),
        Some("func run(body: @escaping () -> ()) -> () {}")
    );
}

#[test]
fn decode_deeply_qualified_name() {
    assert_eq!(
        decode_declaration("A.B.C.D.E.F.run(count: Swift.Int) async throws -> Swift.Int").as_deref(),
        Some("func run(count: Swift.Int) async throws -> Swift.Int {}")
    );
}

#[test]
fn decode_labels_unlabeled_parameters() {
    assert_eq!(
        decode_declaration("s:Swift.Sequence.forEach((A.Element) throws -> ()) throws -> ()")
            .as_deref(),
        Some("func forEach(_: (A.Element) throws -> ()) throws -> () {}")
    );
    assert_eq!(
        decode_declaration("App.Store.apply(__owned Swift.String, inout Swift.Int)").as_deref(),
        Some("func apply(_: __owned Swift.String, _: inout Swift.Int) {}")
    );
}

#[test]
fn decode_empty_parameter_list() {
    assert_eq!(
        decode_declaration("App.Session.start() -> ()").as_deref(),
        Some("func start() -> () {}")
    );
}

#[test]
fn decode_static_member() {
    assert_eq!(
        decode_declaration("static App.Loader.make(completion: @escaping () -> ()) -> App.Loader")
            .as_deref(),
        Some("func make(completion: @escaping () -> ()) -> App.Loader {}")
    );
}

#[test]
fn decode_rejects_malformed_input() {
    let cases = [
        "",
        "s:",
        "App.Session.start",
        "App.Session.start(count: Swift.Int",
        "(extension in MyKit:Swift.Array.first()",
        "App.Cache<Swift.Int.load(key: A)",
        "App.Session.(count: Swift.Int)",
        "App.Session.start(count: (Swift.Int) -> ()))",
        "App.Session.start(a: Swift.Int,, b: Swift.Int)",
        "App.Session.start(a: Swift.Array<Swift.Int)",
    ];
    for case in cases {
        assert_eq!(decode_declaration(case), None, "{case}");
    }
}

#[test]
fn decode_rejects_oversized_names() {
    let huge = format!("App.run(x: {})", "A".repeat(MAX_LINKAGE_NAME_LEN));
    assert_eq!(decode_declaration(&huge), None);
}
