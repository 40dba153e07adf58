//! Runs the analyzer over a file tree.
//!
//! Files are discovered up front, analyzed in parallel, and printed in
//! discovery order once every file is done.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::args::{CliArgs, OutputFormat};
use crate::config::{self, FileFilter};
use crate::reporter::{Reporter, render_json};
use wsc_checker::{CheckError, CheckStats, ClosureSafetyAnalyzer};
use wsc_common::Report;
use wsc_index::{IndexAccess, JsonIndexStore};

const SWIFT_EXTENSION: &str = "swift";
const PROGRESS_PREFIX: &str = "[weak self check] checking:";

/// Result of checking one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub reports: Vec<Report>,
    pub result: Result<CheckStats, CheckError>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    pub read_failures: usize,
}

impl RunSummary {
    /// No error-severity report and no unreadable file.
    pub fn is_clean(&self) -> bool {
        self.errors == 0 && self.read_failures == 0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub silent: bool,
    pub pretty: bool,
}

/// Check everything `args` names and write the results.
///
/// Reports and progress lines go to `out`; read failures go to `err`.
/// With JSON output, progress lines also go to `err` so `out` stays a
/// single document.
pub fn run(
    args: &CliArgs,
    cwd: &Path,
    build_dir: Option<&OsStr>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunSummary> {
    let resolved = config::resolve_config(args, cwd)?;
    if let Some(path) = &resolved.config_path {
        info!(config = %path.display(), "loaded config");
    }

    let root = args
        .path
        .as_deref()
        .map_or_else(|| cwd.to_path_buf(), |path| cwd.join(path));
    if !root.exists() {
        bail!("path does not exist: {}", root.display());
    }

    let explicit_store = args.index_store_path.as_deref().map(|path| cwd.join(path));
    let store = match index_store_path(explicit_store.as_deref(), build_dir) {
        Some(path) => match JsonIndexStore::open(&path) {
            Ok(store) => Some(store),
            Err(error) => {
                warn!(%error, "symbol index unavailable, using syntax only");
                None
            }
        },
        None => None,
    };
    let index = store
        .as_ref()
        .map_or(IndexAccess::Absent, |store| IndexAccess::Present(store));

    let files = collect_files(&root, &resolved.excluded);
    info!(files = files.len(), root = %root.display(), "collected source files");

    let analyzer = ClosureSafetyAnalyzer::new(&resolved.options, index);
    let outcomes = check_files(&analyzer, &files, args.jobs)?;

    let output = OutputOptions {
        format: args.format,
        silent: resolved.silent,
        pretty: args.pretty,
    };
    write_outcomes(&outcomes, cwd, output, out, err)
}

/// `explicit`, or the index next to an Xcode `BUILD_DIR` when it exists.
pub fn index_store_path(explicit: Option<&Path>, build_dir: Option<&OsStr>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let build_dir = Path::new(build_dir?);
    let path = build_dir
        .parent()?
        .parent()?
        .join("Index.noindex")
        .join("DataStore");
    path.exists().then_some(path)
}

/// Swift files under `root` in sorted walk order, minus excluded ones.
/// A file root is checked on its own.
pub fn collect_files(root: &Path, filter: &FileFilter) -> Vec<PathBuf> {
    if root.is_file() {
        let base = root.parent().unwrap_or(root);
        if is_swift_file(root) && !filter.is_excluded(root, base) {
            return vec![root.to_path_buf()];
        }
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_swift_file(path) {
            continue;
        }
        if filter.is_excluded(path, root) {
            info!(path = %path.display(), "excluded");
            continue;
        }
        files.push(path.to_path_buf());
    }
    files
}

fn is_swift_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == SWIFT_EXTENSION)
}

/// Check `files` on a worker pool; outcomes keep the order of `files`.
pub fn check_files(
    analyzer: &ClosureSafetyAnalyzer<'_>,
    files: &[PathBuf],
    jobs: Option<usize>,
) -> Result<Vec<FileOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
        .context("failed to build worker pool")?;

    Ok(pool.install(|| {
        files
            .par_iter()
            .map(|path| check_file(analyzer, path))
            .collect()
    }))
}

pub fn check_file(analyzer: &ClosureSafetyAnalyzer<'_>, path: &Path) -> FileOutcome {
    let mut reports = Vec::new();
    let result = analyzer.check_file(path, &mut reports);
    FileOutcome {
        path: path.to_path_buf(),
        reports,
        result,
    }
}

/// Print outcomes in order and tally them.
pub fn write_outcomes(
    outcomes: &[FileOutcome],
    cwd: &Path,
    output: OutputOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunSummary> {
    let reporter = Reporter::new(output.pretty);
    let mut summary = RunSummary::default();
    let mut all_reports = Vec::new();

    for outcome in outcomes {
        summary.files += 1;
        if !output.silent {
            let line = format!("{PROGRESS_PREFIX} {}", display_path(&outcome.path, cwd));
            match output.format {
                OutputFormat::Xcode => writeln!(out, "{line}")?,
                OutputFormat::Json => writeln!(err, "{line}")?,
            }
        }

        if let Err(error) = &outcome.result {
            warn!(path = %outcome.path.display(), %error, "failed to check file");
            writeln!(err, "error: {error}")?;
            summary.read_failures += 1;
            continue;
        }

        for report in &outcome.reports {
            if report.is_error() {
                summary.errors += 1;
            } else {
                summary.warnings += 1;
            }
        }
        match output.format {
            OutputFormat::Xcode => write!(out, "{}", reporter.render(&outcome.reports))?,
            OutputFormat::Json => all_reports.extend(outcome.reports.iter().cloned()),
        }
    }

    if output.format == OutputFormat::Json {
        write!(out, "{}", render_json(&all_reports)?)?;
    }
    out.flush()?;

    info!(
        files = summary.files,
        errors = summary.errors,
        warnings = summary.warnings,
        read_failures = summary.read_failures,
        "run finished"
    );
    Ok(summary)
}

/// `path` relative to `cwd` when it lies inside it.
pub fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}
