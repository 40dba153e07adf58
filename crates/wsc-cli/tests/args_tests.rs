use clap::Parser;
use std::path::Path;

use crate::args::{CliArgs, OutputFormat, ReportType};
use wsc_common::Severity;

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["weak-self-check"]).expect("default args should parse");

    assert!(args.path.is_none());
    assert_eq!(args.report_type, None);
    assert!(!args.silent);
    assert!(args.config.is_none());
    assert!(args.index_store_path.is_none());
    assert_eq!(args.format, OutputFormat::Xcode);
    assert!(!args.pretty);
    assert_eq!(args.jobs, None);
}

#[test]
fn parses_every_flag() {
    let args = CliArgs::try_parse_from([
        "weak-self-check",
        "--report-type",
        "warning",
        "--silent",
        "--config",
        "ci/weak-self-check.yml",
        "--index-store-path",
        "Build/Index",
        "--format",
        "json",
        "--pretty",
        "-j",
        "4",
        "Sources/App",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.path.as_deref(), Some(Path::new("Sources/App")));
    assert_eq!(args.report_type, Some(ReportType::Warning));
    assert!(args.silent);
    assert_eq!(
        args.config.as_deref(),
        Some(Path::new("ci/weak-self-check.yml"))
    );
    assert_eq!(args.index_store_path.as_deref(), Some(Path::new("Build/Index")));
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.pretty);
    assert_eq!(args.jobs, Some(4));
}

#[test]
fn report_type_ignores_case() {
    let args = CliArgs::try_parse_from(["weak-self-check", "--report-type", "ERROR"])
        .expect("upper-case report type should parse");
    assert_eq!(args.report_type, Some(ReportType::Error));
}

#[test]
fn rejects_unknown_values() {
    assert!(CliArgs::try_parse_from(["weak-self-check", "--report-type", "fatal"]).is_err());
    assert!(CliArgs::try_parse_from(["weak-self-check", "--format", "xml"]).is_err());
    assert!(CliArgs::try_parse_from(["weak-self-check", "--jobs", "many"]).is_err());
}

#[test]
fn report_type_maps_to_severity() {
    assert_eq!(Severity::from(ReportType::Warning), Severity::Warning);
    assert_eq!(Severity::from(ReportType::Error), Severity::Error);
}

#[test]
fn log_format_values() {
    use crate::tracing_config::LogFormat;

    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("xml"), LogFormat::Text);
}
