//! Runs the `weak-self-check` binary end to end.

use std::path::Path;
use std::process::{Command, Output};

const UNSAFE: &str = "class Worker {\n    var value = 0\n    func start() {\n        Dispatcher.default().async { print(self.value) }\n    }\n}\n";
const SAFE: &str = "struct Worker {\n    var value = 0\n    func start() {\n        Dispatcher.default().async { print(self.value) }\n    }\n}\n";

fn weak_self_check(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weak-self-check"))
        .args(args)
        .current_dir(cwd)
        .env_remove("BUILD_DIR")
        .env_remove("WSC_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn clean_tree_exits_zero() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("Worker.swift"), SAFE).expect("write source");

    let output = weak_self_check(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output).trim_end(),
        "[weak self check] checking: Worker.swift"
    );
}

#[test]
fn error_reports_exit_one() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("Worker.swift"), UNSAFE).expect("write source");

    let output = weak_self_check(dir.path(), &["--silent"]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.ends_with(
        "Worker.swift:4:36: error: Use a weak reference to the enclosing instance to avoid memory leaks.\n"
    ));
}

#[test]
fn warning_reports_exit_zero() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("Worker.swift"), UNSAFE).expect("write source");

    let output = weak_self_check(dir.path(), &["--silent", "--report-type", "warning"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(":4:36: warning: "));
}

#[test]
fn configuration_errors_exit_two() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("Worker.swift"), UNSAFE).expect("write source");

    let output = weak_self_check(dir.path(), &["--config", "missing.json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.json"));
    assert!(output.stdout.is_empty());

    std::fs::write(
        dir.path().join(".swift-weak-self-check.yml"),
        "whiteList:\n  - functionName: \"(\"\n",
    )
    .expect("write config");
    let output = weak_self_check(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn excluded_files_are_not_checked() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::create_dir_all(dir.path().join("Generated")).expect("create dir");
    std::fs::write(dir.path().join("Generated/Worker.swift"), UNSAFE).expect("write source");
    std::fs::write(
        dir.path().join(".swift-weak-self-check.yml"),
        "excludedFiles:\n  - \"Generated/*\"\n",
    )
    .expect("write config");

    let output = weak_self_check(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}
