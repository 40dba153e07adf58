use anyhow::{Context, Result};
use colored::Colorize;

use wsc_common::{Report, Severity};

/// Formats reports the way Xcode parses build-phase output.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// One line per report, each terminated by a newline.
    pub fn render(&self, reports: &[Report]) -> String {
        let mut out = String::new();
        for report in reports {
            out.push_str(&self.format_report(report));
            out.push('\n');
        }
        out
    }

    pub fn format_report(&self, report: &Report) -> String {
        let severity = self.format_severity(report.severity);
        match report.column {
            Some(column) => format!(
                "{}:{}:{}: {}: {}",
                report.file, report.line, column, severity, report.message
            ),
            None => format!(
                "{}:{}: {}: {}",
                report.file, report.line, severity, report.message
            ),
        }
    }

    fn format_severity(&self, severity: Severity) -> String {
        let label = severity.as_str();
        if !self.color {
            return label.to_string();
        }

        match severity {
            Severity::Error => label.red().bold().to_string(),
            Severity::Warning => label.yellow().bold().to_string(),
        }
    }
}

/// Every report of a run as one pretty-printed JSON array.
pub fn render_json(reports: &[Report]) -> Result<String> {
    let mut out = serde_json::to_string_pretty(reports).context("failed to serialize reports")?;
    out.push('\n');
    Ok(out)
}
