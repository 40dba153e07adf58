use super::*;

#[test]
fn test_severity_default_is_error() {
    assert_eq!(Severity::default(), Severity::Error);
}

#[test]
fn test_weak_self_report_fields() {
    let report = Report::weak_self("A.swift", 3, 38, Severity::Warning);
    assert_eq!(report.file, "A.swift");
    assert_eq!(report.line, 3);
    assert_eq!(report.column, Some(38));
    assert_eq!(report.message, WEAK_SELF_MESSAGE);
    assert!(!report.is_error());
}

#[test]
fn test_report_json_shape() {
    let report = Report::new("A.swift", 1, None, Severity::Error, "msg");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["severity"], "error");
    assert!(json.get("column").is_none());

    let back: Report = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
