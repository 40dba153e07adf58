//! Closure safety analysis of a whole file.
//!
//! Every call is visited once. A whitelisted call has all of its closure
//! arguments skipped; otherwise each closure argument (parenthesized,
//! trailing, or additional labeled trailing) goes through these gates,
//! stopping at the first that clears it:
//!
//! 1. the body never accesses a member of `self`
//! 2. the capture list holds `weak self` or `unowned self`
//! 3. a parameter shadows `self`
//! 4. the enclosing type is definitely a value type
//! 5. the closure definitely does not escape the call
//!
//! A closure that passes none of them is reported at its opening brace.

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::{debug, info_span, trace};
use wsc_common::{LineMap, Report, Severity};
use wsc_index::IndexAccess;
use wsc_parser::parser::{NodeArena, NodeIndex, NodeKind};
use wsc_parser::{VisitControl, fold};

use crate::capture_list::has_weak_or_unowned_self;
use crate::context::CheckerContext;
use crate::error::CheckError;
use crate::self_usage::uses_self;
use crate::shadowing::self_is_shadowed;
use crate::sink::ReportSink;
use crate::whitelist::Whitelist;

/// Settings that apply to every file of a run.
#[derive(Clone, Debug, Default)]
pub struct CheckOptions {
    pub severity: Severity,
    pub whitelist: Whitelist,
}

/// Why a closure was or was not reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    NoSelfUsage,
    CapturedWeakly,
    SelfShadowed,
    ValueType,
    NonEscaping,
    Report,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckStats {
    pub calls: usize,
    pub whitelisted_calls: usize,
    pub closures: usize,
    pub reports: usize,
    pub parse_errors: usize,
}

/// A closure argument waiting to be reached by the traversal.
#[derive(Clone, Copy, Debug)]
struct ClosureSite {
    call: NodeIndex,
    /// Argument label, or `NONE` for unlabeled and first trailing closures
    label: NodeIndex,
}

#[derive(Default)]
struct Walk {
    pending: FxHashMap<NodeIndex, ClosureSite>,
    stats: CheckStats,
}

pub struct ClosureSafetyAnalyzer<'a> {
    options: &'a CheckOptions,
    index: IndexAccess<'a>,
}

impl<'a> ClosureSafetyAnalyzer<'a> {
    pub fn new(options: &'a CheckOptions, index: IndexAccess<'a>) -> Self {
        ClosureSafetyAnalyzer { options, index }
    }

    /// Read and check one file. Only the read can fail.
    pub fn check_file<S>(&self, path: &Path, sink: &mut S) -> Result<CheckStats, CheckError>
    where
        S: ReportSink + ?Sized,
    {
        let source = std::fs::read_to_string(path).map_err(|source| CheckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.check_source(&path.to_string_lossy(), &source, sink))
    }

    /// Check source text, reporting under `file_name`.
    pub fn check_source<S>(&self, file_name: &str, source: &str, sink: &mut S) -> CheckStats
    where
        S: ReportSink + ?Sized,
    {
        let _span = info_span!("check_file", file = file_name).entered();

        let mut parser = wsc_parser::ParserState::new(file_name.to_string(), source);
        let root = parser.parse_source_file();
        let parse_errors = parser.get_diagnostics().len();
        let arena = parser.into_arena();
        let line_map = LineMap::build(source);
        let ctx = CheckerContext::new(file_name, &arena, &line_map, self.index);

        let mut stats = self.walk(&ctx, root, sink);
        stats.parse_errors = parse_errors;
        debug!(
            calls = stats.calls,
            whitelisted = stats.whitelisted_calls,
            closures = stats.closures,
            reports = stats.reports,
            parse_errors = stats.parse_errors,
            "checked file"
        );
        stats
    }

    /// Pre-order walk: a call registers its closure arguments, and each one
    /// is evaluated when the walk reaches it, so reports follow source order.
    fn walk<S>(&self, ctx: &CheckerContext<'_>, root: NodeIndex, sink: &mut S) -> CheckStats
    where
        S: ReportSink + ?Sized,
    {
        let walk = fold(ctx.arena, root, Walk::default(), |walk, index, node| {
            match &node.kind {
                NodeKind::Call(_) => {
                    walk.stats.calls += 1;
                    if self.options.whitelist.is_whitelisted(ctx.arena, index) {
                        walk.stats.whitelisted_calls += 1;
                        trace!(call = ctx.arena.text(index), "whitelisted call");
                    } else {
                        for (closure, site) in closure_arguments(ctx.arena, index) {
                            walk.pending.insert(closure, site);
                        }
                    }
                }
                NodeKind::Closure(_) => {
                    if let Some(site) = walk.pending.remove(&index) {
                        walk.stats.closures += 1;
                        if self.evaluate(ctx, index, site) == Verdict::Report {
                            if let Some(report) = self.report_for(ctx, index) {
                                walk.stats.reports += 1;
                                sink.emit(report);
                            }
                        }
                    }
                }
                _ => {}
            }
            VisitControl::Descend
        });
        walk.stats
    }

    fn evaluate(&self, ctx: &CheckerContext<'_>, closure: NodeIndex, site: ClosureSite) -> Verdict {
        let verdict = evaluate_closure(ctx, closure, site.call, label_text(ctx.arena, site.label));
        trace!(
            closure = ?ctx.location(closure),
            verdict = ?verdict,
            "evaluated closure"
        );
        verdict
    }

    fn report_for(&self, ctx: &CheckerContext<'_>, closure: NodeIndex) -> Option<Report> {
        let location = ctx.location(closure)?;
        Some(Report::weak_self(
            ctx.file_name,
            location.line,
            location.column,
            self.options.severity,
        ))
    }
}

/// Run the gates for one closure argument of `call`.
pub fn evaluate_closure(
    ctx: &CheckerContext<'_>,
    closure: NodeIndex,
    call: NodeIndex,
    label: Option<&str>,
) -> Verdict {
    let Some(data) = ctx.arena.get_closure(closure) else {
        return Verdict::NoSelfUsage;
    };
    if !uses_self(ctx.arena, &data.statements) {
        return Verdict::NoSelfUsage;
    }
    if has_weak_or_unowned_self(ctx.arena, &data.captures) {
        return Verdict::CapturedWeakly;
    }
    if self_is_shadowed(ctx.arena, &data.parameters) {
        return Verdict::SelfShadowed;
    }
    if ctx.resolve_reference_type(closure).is_definitely_not() {
        return Verdict::ValueType;
    }
    if ctx.resolve_escaping(call, label).is_definitely_not() {
        return Verdict::NonEscaping;
    }
    Verdict::Report
}

/// Closure arguments of a call, keyed by closure node.
fn closure_arguments(arena: &NodeArena, call: NodeIndex) -> Vec<(NodeIndex, ClosureSite)> {
    let Some(data) = arena.get_call(call) else {
        return Vec::new();
    };
    let mut closures = Vec::new();
    let argument_closure = |argument: NodeIndex| {
        let argument = arena.get_argument(argument)?;
        matches!(arena.kind(argument.expression), Some(NodeKind::Closure(_))).then_some((
            argument.expression,
            ClosureSite {
                call,
                label: argument.label,
            },
        ))
    };

    closures.extend(data.arguments.iter().copied().filter_map(argument_closure));
    if data.trailing_closure.is_some() {
        closures.push((
            data.trailing_closure,
            ClosureSite {
                call,
                label: NodeIndex::NONE,
            },
        ));
    }
    closures.extend(
        data.additional_trailing_closures
            .iter()
            .copied()
            .filter_map(argument_closure),
    );
    closures
}

fn label_text(arena: &NodeArena, label: NodeIndex) -> Option<&str> {
    if label.is_none() {
        None
    } else {
        Some(arena.text(label))
    }
}
