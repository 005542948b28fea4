//! Corrector: rewrites exact-token literals in place.
//!
//! Only `color` and `fontSize` issues are applied; spacing suggestions are
//! approximations and stay manual. Each file is read, rewritten for all of
//! its issues, and written once. An issue counts as fixed only when its
//! replacement changed the content, so re-running on already fixed files
//! reports zero.

use crate::error::{QaError, Result};
use crate::models::{Issue, IssueKind};
use regex::{Captures, NoExpand, Regex, RegexBuilder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Applied fix counts.
pub struct FixStats {
    pub color: usize,
    pub font_size: usize,
    pub total: usize,
}

impl FixStats {
    fn record(&mut self, kind: IssueKind) {
        match kind {
            IssueKind::Color => self.color += 1,
            IssueKind::FontSize => self.font_size += 1,
            _ => return,
        }
        self.total += 1;
    }

    fn merge(&mut self, other: FixStats) {
        self.color += other.color;
        self.font_size += other.font_size;
        self.total += other.total;
    }
}

/// Outcome of a fix run over a whole issue list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixReport {
    pub stats: FixStats,
    /// Parallel to the input issues: whether the literal is gone from its line.
    pub fixed: Vec<bool>,
}

impl FixReport {
    /// Issues still present after the run, spacing included.
    pub fn unfixed(&self) -> usize {
        self.fixed.iter().filter(|f| !**f).count()
    }
}

/// Rewritten content for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub content: String,
    pub stats: FixStats,
    pub fixed: Vec<bool>,
}

/// Apply fixable issues to their files under `root`.
pub fn fix_files(root: &Path, issues: &[Issue]) -> Result<FixReport> {
    let mut grouped: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, is) in issues.iter().enumerate() {
        if is.kind.is_fixable() {
            grouped.entry(is.file.as_str()).or_default().push(i);
        }
    }

    let mut report = FixReport {
        stats: FixStats::default(),
        fixed: vec![false; issues.len()],
    };
    for (file, idxs) in grouped {
        let path = root.join(file);
        let file_issues: Vec<&Issue> = idxs.iter().map(|&i| &issues[i]).collect();
        let applied = fix_file(&path, &file_issues)?;
        if applied.stats.total > 0 {
            tracing::debug!(file, fixed = applied.stats.total, "wrote fixes");
        }
        for (&i, done) in idxs.iter().zip(applied.fixed) {
            report.fixed[i] = done;
        }
        report.stats.merge(applied.stats);
    }
    Ok(report)
}

/// Apply one file's issues and write the result if anything changed.
pub fn fix_file(path: &Path, issues: &[&Issue]) -> Result<Applied> {
    if !issues.iter().any(|i| i.kind.is_fixable()) {
        return Ok(Applied {
            content: String::new(),
            stats: FixStats::default(),
            fixed: vec![false; issues.len()],
        });
    }
    let original = fs::read_to_string(path).map_err(|e| QaError::io(path, e))?;
    let applied = apply_fixes(&original, issues);
    if applied.stats.total > 0 {
        fs::write(path, &applied.content).map_err(|e| QaError::io(path, e))?;
    }
    Ok(applied)
}

/// Rewrite `content` for each fixable issue, in order.
///
/// An issue counts as fixed when its literal no longer matches on its own
/// line afterwards, which also covers duplicates rewritten by an earlier
/// issue. Replacements never add lines, so line numbers stay valid.
pub fn apply_fixes(content: &str, issues: &[&Issue]) -> Applied {
    let mut out = content.to_string();
    let mut stats = FixStats::default();
    let patterns: Vec<Option<Regex>> = issues.iter().map(|is| replacement_pattern(is)).collect();
    for (is, re) in issues.iter().zip(&patterns) {
        let Some(re) = re else {
            continue;
        };
        let next = match is.kind {
            IssueKind::FontSize => re
                .replace_all(&out, |caps: &Captures| format!("{}{}", &caps[1], is.suggestion))
                .into_owned(),
            _ => re.replace_all(&out, NoExpand(&is.suggestion)).into_owned(),
        };
        if next != out {
            out = next;
            stats.record(is.kind);
        }
    }

    let lines: Vec<&str> = out.lines().collect();
    let fixed = issues
        .iter()
        .zip(&patterns)
        .map(|(is, re)| match re {
            Some(re) => is
                .line
                .checked_sub(1)
                .and_then(|i| lines.get(i))
                .map(|line| !re.is_match(line))
                .unwrap_or(false),
            None => false,
        })
        .collect();
    Applied {
        content: out,
        stats,
        fixed,
    }
}

fn replacement_pattern(is: &Issue) -> Option<Regex> {
    let pattern = match is.kind {
        IssueKind::Color => format!(r"{}\b", regex::escape(&is.value)),
        IssueKind::FontSize => format!(
            r#"((?:font-size|fontsize)['"]?\s*:\s*['"]?){}\s*px\b"#,
            numeral_pattern(is.value.strip_suffix("px")?)
        ),
        _ => return None,
    };
    RegexBuilder::new(&pattern).case_insensitive(true).build().ok()
}

/// Match a normalized numeral in any spelling the detector accepts:
/// `14` also matches `14.0`, `14.5` also matches `14.50`.
fn numeral_pattern(n: &str) -> String {
    match n.split_once('.') {
        Some((int, frac)) => format!(r"{}\.{}0*", regex::escape(int), regex::escape(frac)),
        None => format!(r"{}(?:\.0+)?", regex::escape(n)),
    }
}

/// Spacing issues are never auto-fixed; report how many remain.
pub fn remaining_spacing(issues: &[Issue]) -> usize {
    issues.iter().filter(|i| i.kind == IssueKind::Spacing).count()
}
