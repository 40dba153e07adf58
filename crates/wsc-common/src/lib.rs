//! Common types and utilities for the weak-self-check analyzer.
//!
//! This crate provides foundational types used across all wsc crates:
//! - Position/line-map types for converting byte offsets to source locations
//! - Report types (`Report`, `Severity`) shared by the checker and the CLI
//! - Analyzer limits and thresholds

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, SourceLocation};

// Reports produced by the checker
pub mod diagnostics;
pub use diagnostics::{Report, Severity, WEAK_SELF_MESSAGE};

// Centralized limits and thresholds
pub mod limits;
