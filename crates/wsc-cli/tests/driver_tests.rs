use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::args::{CliArgs, OutputFormat};
use crate::config::FileFilter;
use crate::driver::*;
use wsc_checker::{CheckOptions, ClosureSafetyAnalyzer};
use wsc_index::IndexAccess;

const UNSAFE: &str = "class Worker {\n    var value = 0\n    func start() {\n        Dispatcher.default().async { print(self.value) }\n    }\n}\n";
const SAFE: &str = "class Worker {\n    var value = 0\n    func start() {\n        Dispatcher.default().async { [weak self] in print(self!.value) }\n    }\n}\n";

fn write(root: &Path, relative: &str, source: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dirs");
    }
    std::fs::write(&path, source).expect("write file");
    path
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["weak-self-check"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("args should parse")
}

/// Run the driver in `cwd`, returning stdout, stderr and the summary.
fn run_in(cwd: &Path, extra: &[&str]) -> (String, String, RunSummary) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = run(&args(extra), cwd, None, &mut out, &mut err).expect("run succeeds");
    (
        String::from_utf8(out).expect("utf-8 stdout"),
        String::from_utf8(err).expect("utf-8 stderr"),
        summary,
    )
}

fn glob_filter(patterns: &[&str]) -> FileFilter {
    let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
    FileFilter::new(&patterns).expect("valid globs")
}

// =============================================================================
// File discovery
// =============================================================================

#[test]
fn collects_swift_files_in_sorted_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    write(root, "b/Second.swift", SAFE);
    write(root, "a/First.swift", SAFE);
    write(root, "a/notes.md", "# notes");
    write(root, "Root.swift", SAFE);
    write(root, "Package.swift.bak", SAFE);

    let files = collect_files(root, &FileFilter::default());
    let relative: Vec<String> = files.iter().map(|path| display_path(path, root)).collect();
    assert_eq!(
        relative,
        vec![
            Path::new("Root.swift").display().to_string(),
            Path::new("a").join("First.swift").display().to_string(),
            Path::new("b").join("Second.swift").display().to_string(),
        ]
    );
}

#[test]
fn excluded_files_are_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    write(root, "Sources/App.swift", SAFE);
    write(root, "Sources/Generated/Assets.swift", SAFE);
    write(root, "Pods/Lib/Lib.swift", SAFE);

    let files = collect_files(root, &glob_filter(&["*/Generated/*", "Pods/*"]));
    assert_eq!(files, vec![root.join("Sources/App.swift")]);
}

#[test]
fn single_file_root() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = write(dir.path(), "Worker.swift", SAFE);
    assert_eq!(collect_files(&file, &FileFilter::default()), vec![file.clone()]);
    assert!(collect_files(&file, &glob_filter(&["Worker*"])).is_empty());

    let text = write(dir.path(), "README.txt", "text");
    assert!(collect_files(&text, &FileFilter::default()).is_empty());
}

// =============================================================================
// Index store location
// =============================================================================

#[test]
fn explicit_index_store_path_wins() {
    let path = index_store_path(Some(Path::new("/tmp/index")), Some(OsStr::new("/nowhere")));
    assert_eq!(path, Some(PathBuf::from("/tmp/index")));
}

#[test]
fn index_store_path_from_build_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    let build_dir = dir.path().join("Build").join("Products");
    let store = dir.path().join("Index.noindex").join("DataStore");
    std::fs::create_dir_all(&build_dir).expect("create build dir");

    assert_eq!(index_store_path(None, Some(build_dir.as_os_str())), None);
    std::fs::create_dir_all(&store).expect("create store");
    assert_eq!(index_store_path(None, Some(build_dir.as_os_str())), Some(store));
    assert_eq!(index_store_path(None, None), None);
}

// =============================================================================
// Whole runs
// =============================================================================

#[test]
fn reports_are_grouped_under_progress_lines() {
    let dir = tempfile::tempdir().expect("temp dir");
    let unsafe_file = write(dir.path(), "Sources/Unsafe.swift", UNSAFE);
    write(dir.path(), "Sources/Safe.swift", SAFE);

    let (out, err, summary) = run_in(dir.path(), &[]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!(
                "[weak self check] checking: {}",
                Path::new("Sources").join("Safe.swift").display()
            ),
            format!(
                "[weak self check] checking: {}",
                Path::new("Sources").join("Unsafe.swift").display()
            ),
            format!(
                "{}:4:36: error: Use a weak reference to the enclosing instance to avoid memory leaks.",
                unsafe_file.display()
            ),
        ]
    );
    assert!(err.is_empty());
    assert_eq!(
        summary,
        RunSummary {
            files: 2,
            errors: 1,
            warnings: 0,
            read_failures: 0,
        }
    );
    assert!(!summary.is_clean());
}

#[test]
fn silent_run_prints_reports_only() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "Unsafe.swift", UNSAFE);

    let (out, _, _) = run_in(dir.path(), &["--silent", "--report-type", "warning"]);
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains(":4:36: warning: "));
}

#[test]
fn warnings_keep_the_run_clean() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "Unsafe.swift", UNSAFE);
    std::fs::write(
        dir.path().join(".swift-weak-self-check.yml"),
        "reportType: warning\nslent: true\n",
    )
    .expect("write config");

    let (_, _, summary) = run_in(dir.path(), &[]);
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.errors, 0);
    assert!(summary.is_clean());
}

#[test]
fn whitelist_from_config_suppresses_reports() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "Unsafe.swift", UNSAFE);
    std::fs::write(
        dir.path().join(".swift-weak-self-check.yml"),
        "whiteList:\n  - parentPattern: \"Dispatcher.*\"\n    functionName: \"^(async|sync).*\"\n",
    )
    .expect("write config");

    let (out, _, summary) = run_in(dir.path(), &["--silent"]);
    assert!(out.is_empty());
    assert!(summary.is_clean());
}

#[test]
fn json_output_keeps_stdout_parseable() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "Unsafe.swift", UNSAFE);
    write(dir.path(), "Safe.swift", SAFE);

    let (out, err, _) = run_in(dir.path(), &["--format", "json"]);
    let reports: Vec<wsc_common::Report> = serde_json::from_str(&out).expect("JSON array");
    assert_eq!(reports.len(), 1);
    assert_eq!((reports[0].line, reports[0].column), (4, Some(36)));
    assert_eq!(err.lines().count(), 2);
    assert!(err.lines().all(|line| line.starts_with("[weak self check] checking: ")));
}

#[test]
fn path_argument_limits_the_run() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "App/Unsafe.swift", UNSAFE);
    write(dir.path(), "Other/Unsafe.swift", UNSAFE);

    let (_, _, summary) = run_in(dir.path(), &["--silent", "App"]);
    assert_eq!(summary.files, 1);
    assert_eq!(summary.errors, 1);
}

#[test]
fn missing_path_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = run(&args(&["Missing"]), dir.path(), None, &mut out, &mut err);
    assert!(result.is_err());
}

#[test]
fn unreadable_index_store_falls_back_to_syntax() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "Unsafe.swift", UNSAFE);

    let (_, _, summary) = run_in(dir.path(), &["--silent", "--index-store-path", "NoIndex"]);
    assert_eq!(summary.errors, 1);
}

#[test]
fn binary_data_store_falls_back_to_syntax() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "Unsafe.swift", UNSAFE);
    let build_dir = dir.path().join("Build").join("Products");
    let store = dir.path().join("Index.noindex").join("DataStore");
    std::fs::create_dir_all(&build_dir).expect("create build dir");
    std::fs::create_dir_all(store.join("v5")).expect("create store");
    std::fs::write(store.join("v5").join("units"), [0u8, 1, 2]).expect("write unit");

    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = run(
        &args(&["--silent", "Unsafe.swift"]),
        dir.path(),
        Some(build_dir.as_os_str()),
        &mut out,
        &mut err,
    )
    .expect("run succeeds");
    assert_eq!(summary.errors, 1);
}

#[test]
fn read_failures_are_reported_and_counted() {
    let dir = tempfile::tempdir().expect("temp dir");
    let present = write(dir.path(), "Unsafe.swift", UNSAFE);
    let missing = dir.path().join("Gone.swift");

    let options = CheckOptions::default();
    let analyzer = ClosureSafetyAnalyzer::new(&options, IndexAccess::Absent);
    let outcomes = check_files(&analyzer, &[missing, present], Some(2)).expect("pool");
    assert!(outcomes[0].result.is_err());
    assert_eq!(outcomes[1].reports.len(), 1);

    let mut out = Vec::new();
    let mut err = Vec::new();
    let output = OutputOptions {
        format: OutputFormat::Xcode,
        silent: true,
        pretty: false,
    };
    let summary =
        write_outcomes(&outcomes, dir.path(), output, &mut out, &mut err).expect("write");
    assert_eq!(summary.read_failures, 1);
    assert_eq!(summary.errors, 1);
    assert!(!summary.is_clean());

    let err = String::from_utf8(err).expect("utf-8 stderr");
    assert!(err.starts_with("error: failed to read "));
    assert!(err.contains("Gone.swift"));
}

#[test]
fn outcomes_follow_file_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let files: Vec<PathBuf> = (0..16)
        .map(|n| write(dir.path(), &format!("File{n:02}.swift"), UNSAFE))
        .collect();

    let options = CheckOptions::default();
    let analyzer = ClosureSafetyAnalyzer::new(&options, IndexAccess::Absent);
    let outcomes = check_files(&analyzer, &files, Some(4)).expect("pool");
    let paths: Vec<PathBuf> = outcomes.into_iter().map(|outcome| outcome.path).collect();
    assert_eq!(paths, files);
}
