//! Closure capture safety analysis.
//!
//! This crate is organized into several submodules:
//! - `analyzer` - `ClosureSafetyAnalyzer`, the per-file driver
//! - `context` - `CheckerContext` shared by the resolvers
//! - `self_usage` - member accesses on `self` inside a closure body
//! - `capture_list` - `[weak self]` / `[unowned self]` entries
//! - `shadowing` - closure parameters named `self`
//! - `reference_type` - reference vs value semantics of the enclosing type
//! - `escaping` - whether the closure argument outlives the call
//! - `whitelist` - configured call patterns that are never inspected
//! - `sink` - where reports go

pub mod analyzer;
pub mod capture_list;
pub mod context;
pub mod error;
pub mod escaping;
pub mod reference_type;
pub mod resolved;
pub mod self_usage;
pub mod shadowing;
pub mod sink;
pub mod whitelist;

pub use analyzer::{CheckOptions, CheckStats, ClosureSafetyAnalyzer, Verdict};
pub use context::CheckerContext;
pub use error::CheckError;
pub use resolved::ResolvedKind;
pub use sink::{CallbackSink, ReportSink};
pub use whitelist::{CalleeShape, Whitelist, WhitelistRule};

#[cfg(test)]
#[path = "../tests/support.rs"]
mod test_support;
#[cfg(test)]
#[path = "../tests/detector_tests.rs"]
mod detector_tests;
#[cfg(test)]
#[path = "../tests/whitelist_tests.rs"]
mod whitelist_tests;
#[cfg(test)]
#[path = "../tests/reference_type_tests.rs"]
mod reference_type_tests;
#[cfg(test)]
#[path = "../tests/escaping_tests.rs"]
mod escaping_tests;
#[cfg(test)]
#[path = "../tests/analyzer_tests.rs"]
mod analyzer_tests;
