use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use wsc_common::Severity;

/// CLI arguments for the weak-self-check binary.
#[derive(Parser, Debug)]
#[command(
    name = "weak-self-check",
    version,
    about = "Check whether `self` is captured by weak reference in closures."
)]
pub struct CliArgs {
    /// File or directory to check. Defaults to the current directory.
    pub path: Option<PathBuf>,

    /// Report findings as `error` or `warning` (default: error).
    #[arg(long = "report-type", value_enum, ignore_case = true)]
    pub report_type: Option<ReportType>,

    /// Do not print a line for every checked file.
    #[arg(long)]
    pub silent: bool,

    /// Path to the YAML config file (default: .swift-weak-self-check.yml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Symbol index dump used to resolve extended types and callees.
    #[arg(long = "index-store-path")]
    pub index_store_path: Option<PathBuf>,

    /// How reports are printed.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Xcode)]
    pub format: OutputFormat,

    /// Color report severities.
    #[arg(long)]
    pub pretty: bool,

    /// Number of worker threads. 0 or absent uses every core.
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportType {
    Warning,
    Error,
}

impl From<ReportType> for Severity {
    fn from(value: ReportType) -> Self {
        match value {
            ReportType::Warning => Severity::Warning,
            ReportType::Error => Severity::Error,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `file:line:column: severity: message`, one report per line
    #[default]
    Xcode,
    /// A single JSON array of reports
    Json,
}
