//! Centralized limits and thresholds for the analyzer.
//!
//! The parser is recursive descent and runs on rayon worker threads, whose
//! stacks are smaller than the main thread's. These limits keep pathological
//! input from exhausting them.

// =============================================================================
// Recursion Depth Limits (Parser)
// =============================================================================

/// Maximum nesting depth for expressions, types, statements and closures.
///
/// When exceeded the parser records a diagnostic and skips the offending
/// construct instead of descending further.
///
/// # Swift example
///
/// ```swift
/// // Deeply nested parenthesized expressions:
/// let x = ((((((((((((((((((((((((((((((1))))))))))))))))))))))))))))))
///
/// // Deeply nested closures:
/// run { run { run { run { /* ... */ } } } }
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 256;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Maximum pre-allocation for the node arena, to avoid capacity overflow in
/// huge files.
pub const MAX_NODE_PREALLOC: usize = 1_000_000;

/// Heuristic bytes-per-node ratio used to pre-size the node arena.
pub const SOURCE_BYTES_PER_NODE: usize = 6;

// =============================================================================
// Symbol Index Limits
// =============================================================================

/// Linkage names longer than this are rejected by the declaration decoder.
///
/// Real linkage names are a few hundred bytes; anything larger is a corrupt
/// record and is treated as "no declaration found".
pub const MAX_LINKAGE_NAME_LEN: usize = 16 * 1024;
