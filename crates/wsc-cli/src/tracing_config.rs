//! Tracing configuration for diagnosing analyzer decisions.
//!
//! Supports three output formats controlled by `WSC_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`, one span per
//!   checked file
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Why was (or wasn't) a closure reported?
//! WSC_LOG=wsc_checker=trace WSC_LOG_FORMAT=tree weak-self-check Sources/
//!
//! # Index lookups and linkage-name decoding
//! WSC_LOG="wsc_index=debug,wsc_checker::escaping=debug" weak-self-check Sources/
//! ```
//!
//! The subscriber is only initialised when `WSC_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Value of `WSC_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("WSC_LOG_FORMAT").unwrap_or_default())
    }
}

/// `WSC_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("WSC_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `WSC_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr so it never mixes with reports on stdout.
pub fn init_tracing() {
    if std::env::var_os("WSC_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
