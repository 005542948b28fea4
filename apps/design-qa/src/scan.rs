//! Detector: finds hardcoded style literals in source files.
//!
//! Files under the scan root are selected by extension; `node_modules` and
//! hidden entries are never entered. Each file is scanned line by line:
//! - Comment lines and lines already using `var(--` or a `$` variable are
//!   skipped entirely.
//! - Hex literals that equal a registered color token become `color` issues.
//! - Pixel values in declaration position (`prop: 12px`, `prop: '12px'`) are
//!   checked as font sizes (exact token match only) when the line names a
//!   font-size property, otherwise as spacing (nearest scale value).
//!
//! Scanning a file is a pure function of its text and the token store, so
//! files are scanned in parallel and reassembled in traversal order.

use crate::error::{QaError, Result};
use crate::models::{Issue, IssueKind, ScanResult, Summary};
use crate::nearest;
use crate::tokens::{Px, TokenStore};
use rayon::prelude::*;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::{DirEntry, WalkDir};

/// Extensions scanned when no override is configured.
pub const SCAN_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "css", "scss", "vue", "svelte"];
/// Directory names never descended into.
pub const SKIP_DIRS: &[&str] = &["node_modules"];
/// Lines mentioning these properties carry no spacing or size concern.
pub const IGNORE_PROPS: &[&str] = &["border", "outline", "box-shadow", "text-shadow"];
/// Lowercased spellings of the font-size property.
pub const FONT_SIZE_PROPS: &[&str] = &["font-size", "fontsize"];

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})\b").unwrap());
static PX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#":\s*['"]?(\d+(?:\.\d+)?)\s*px"#).unwrap());

#[derive(Debug, Clone)]
/// File selection for a scan.
pub struct ScanOptions {
    pub extensions: Vec<String>,
    /// Globs matched against paths relative to the scan root.
    pub exclude: Vec<glob::Pattern>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            extensions: SCAN_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude: Vec::new(),
        }
    }
}

impl ScanOptions {
    fn wants(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|x| x == ext))
            .unwrap_or(false)
    }

    fn excluded(&self, rel: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(rel))
    }
}

/// Scan every selected file under `root`.
///
/// An unreadable file aborts the whole scan with `QaError::Io`.
pub fn scan_files(root: &Path, tokens: &TokenStore, opts: &ScanOptions) -> Result<ScanResult> {
    if !root.is_dir() {
        return Err(QaError::ScanRootNotFound(root.to_path_buf()));
    }
    if tokens.spacing.is_empty() {
        tracing::warn!("token source defines no spacing scale; spacing checks are disabled");
    }
    let files = collect_files(root, opts)?;

    let per_file: Vec<Vec<Issue>> = files
        .par_iter()
        .map(|(path, rel)| -> Result<Vec<Issue>> {
            let content = fs::read_to_string(path).map_err(|e| QaError::io(path, e))?;
            let found = scan_source(rel, &content, tokens);
            tracing::debug!(file = %rel, issues = found.len(), "scanned");
            Ok(found)
        })
        .collect::<Result<_>>()?;

    let issues: Vec<Issue> = per_file.into_iter().flatten().collect();
    let summary = Summary::from_issues(&issues, files.len());
    Ok(ScanResult { issues, summary })
}

/// Selected files as `(absolute, relative-to-root)` pairs in traversal order.
///
/// Symlinks are followed and reported under their link path. A link that
/// loops back to an ancestor is skipped with a warning.
pub fn collect_files(root: &Path, opts: &ScanOptions) -> Result<Vec<(PathBuf, String)>> {
    let mut out = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_entry(e));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                tracing::warn!(path = ?e.path(), "skipping symlink loop");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_file() || !opts.wants(entry.path()) {
            continue;
        }
        let rel = relative_path(root, entry.path());
        if opts.excluded(&rel) {
            continue;
        }
        out.push((entry.into_path(), rel));
    }
    Ok(out)
}

fn is_skipped_entry(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIP_DIRS.iter().any(|d| name == *d)
}

fn relative_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .replace('\\', "/")
}

/// Scan one file's text. `rel` is recorded as the issue's `file`.
pub fn scan_source(rel: &str, content: &str, tokens: &TokenStore) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        scan_line(rel, idx + 1, line, tokens, &mut issues);
    }
    issues
}

fn scan_line(rel: &str, line_no: usize, line: &str, tokens: &TokenStore, out: &mut Vec<Issue>) {
    if is_comment(line) || uses_token_reference(line) {
        return;
    }

    for m in HEX_RE.find_iter(line) {
        let hex = m.as_str().to_ascii_lowercase();
        if let Some(name) = tokens.color_token(&hex) {
            let suggestion = format!("var(--{})", name);
            out.push(Issue {
                file: rel.to_string(),
                line: line_no,
                kind: IssueKind::Color,
                message: format!("color {} should use {}", hex, suggestion),
                value: hex,
                suggestion,
            });
        }
    }

    let lower = line.to_lowercase();
    if IGNORE_PROPS.iter().any(|p| lower.contains(p)) {
        return;
    }
    let is_font_size = FONT_SIZE_PROPS.iter().any(|p| lower.contains(p));

    for caps in PX_RE.captures_iter(line) {
        let Ok(n) = caps[1].parse::<f64>() else {
            continue;
        };
        let value = format!("{}px", Px(n));
        if is_font_size {
            if let Some(issue) = font_size_issue(rel, line_no, n, value, tokens) {
                out.push(issue);
            }
        } else if let Some(issue) = spacing_issue(rel, line_no, n, value, tokens) {
            out.push(issue);
        }
    }
}

/// Exact match only: unregistered font sizes are not reported.
fn font_size_issue(
    rel: &str,
    line_no: usize,
    n: f64,
    value: String,
    tokens: &TokenStore,
) -> Option<Issue> {
    let name = tokens.font_size_token(n)?;
    let suggestion = format!("var(--{})", name);
    Some(Issue {
        file: rel.to_string(),
        line: line_no,
        kind: IssueKind::FontSize,
        message: format!("font size {} should use {}", value, suggestion),
        value,
        suggestion,
    })
}

/// Off-scale values are reported with the nearest scale value as suggestion.
fn spacing_issue(
    rel: &str,
    line_no: usize,
    n: f64,
    value: String,
    tokens: &TokenStore,
) -> Option<Issue> {
    if tokens.has_spacing(n) {
        return None;
    }
    let closest = nearest::closest(n, &tokens.spacing)?;
    let suggestion = format!("{}px", Px(closest));
    Some(Issue {
        file: rel.to_string(),
        line: line_no,
        kind: IssueKind::Spacing,
        message: format!(
            "spacing {} is not on the spacing scale (nearest: {})",
            value, suggestion
        ),
        value,
        suggestion,
    })
}

fn is_comment(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("//") || t.starts_with("/*") || t.starts_with('*')
}

fn uses_token_reference(line: &str) -> bool {
    line.contains("var(--") || line.contains('$')
}
