//! Report sinks.
//!
//! The analyzer hands every report to a sink as soon as it is decided; it
//! never buffers or deduplicates on its own.

use wsc_common::Report;

pub trait ReportSink {
    fn emit(&mut self, report: Report);
}

impl ReportSink for Vec<Report> {
    fn emit(&mut self, report: Report) {
        self.push(report);
    }
}

/// Adapts a closure into a sink.
pub struct CallbackSink<F>(pub F)
where
    F: FnMut(Report);

impl<F> ReportSink for CallbackSink<F>
where
    F: FnMut(Report),
{
    fn emit(&mut self, report: Report) {
        (self.0)(report);
    }
}
