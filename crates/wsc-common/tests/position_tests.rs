use super::*;

#[test]
fn test_location_first_line() {
    let map = LineMap::build("class A {}\n");
    let loc = map.location(6);
    assert_eq!(loc.line, 1);
    assert_eq!(loc.column, 7);
    assert_eq!(loc.offset, 6);
}

#[test]
fn test_location_after_newlines() {
    let source = "a\nbb\nccc";
    let map = LineMap::build(source);
    assert_eq!(map.location(2), SourceLocation::new(2, 2, 1));
    assert_eq!(map.location(6), SourceLocation::new(6, 3, 2));
}

#[test]
fn test_crlf_counts_as_single_break() {
    let map = LineMap::build("a\r\nb\rc");
    assert_eq!(map.location(3).line, 2);
    assert_eq!(map.location(5).line, 3);
}

#[test]
fn test_columns_count_utf8_bytes() {
    // "é" is two bytes in UTF-8
    let source = "let é = { }";
    let map = LineMap::build(source);
    let brace = source.find('{').unwrap() as u32;
    assert_eq!(map.location(brace).column, 10);
}

#[test]
fn test_offsets_past_end_are_clamped() {
    let source = "one\ntwo\n";
    let map = LineMap::build(source);
    assert_eq!(map.location(5), SourceLocation::new(5, 2, 2));
    assert_eq!(map.location(100).offset, source.len() as u32);
    assert_eq!(map.location(100).line, 3);
}
