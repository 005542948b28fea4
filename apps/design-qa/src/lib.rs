//! design-qa core library.
//!
//! This crate audits source files for hardcoded style literals (colors,
//! spacing, font sizes) against a set of design tokens and can rewrite the
//! literals that exactly match a token.
//!
//! High-level modules:
//! - `tokens`: Token store, tagged token source, default seed scales.
//! - `ingest`: Stylesheet custom-property and JSON token-tree ingestors.
//! - `nearest`: Closest allowed value for off-scale numbers.
//! - `scan`: File traversal and per-line detection producing issues.
//! - `fix`: In-place rewriting of color and font-size literals.
//! - `models`: Issue records and summaries.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Human/JSON printers for scan and fix results.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: Error type shared by the modules above.
//! - `utils`: Colored message prefixes and `NO_COLOR` handling.
pub mod cli;
pub mod config;
pub mod error;
pub mod fix;
pub mod ingest;
pub mod models;
pub mod nearest;
pub mod output;
pub mod scan;
pub mod tokens;
pub mod utils;

pub use error::{QaError, Result};
pub use fix::{fix_files, remaining_spacing, FixReport, FixStats};
pub use models::{Issue, IssueKind, ScanResult, Summary};
pub use scan::{scan_files, scan_source, ScanOptions};
pub use tokens::{DefaultScales, Px, TokenSource, TokenStore};
