//! Issue records and scan summaries handed to printers and the fixer.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
/// Category of a hardcoded style literal.
pub enum IssueKind {
    Color,
    Spacing,
    FontSize,
    /// Any type string this build does not know; never fixed.
    #[serde(other)]
    Unknown,
}

impl IssueKind {
    pub fn label(self) -> &'static str {
        match self {
            IssueKind::Color => "color",
            IssueKind::Spacing => "spacing",
            IssueKind::FontSize => "fontSize",
            IssueKind::Unknown => "unknown",
        }
    }

    /// Only exact token matches are rewritten automatically.
    pub fn is_fixable(self) -> bool {
        matches!(self, IssueKind::Color | IssueKind::FontSize)
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// A single hardcoded literal found in a scanned file.
pub struct Issue {
    /// Path relative to the scan root.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub value: String,
    pub message: String,
    pub suggestion: String,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Per-type issue counts used by printers.
pub struct Summary {
    pub color: usize,
    pub spacing: usize,
    pub font_size: usize,
    pub total: usize,
    pub files: usize,
}

impl Summary {
    pub fn from_issues(issues: &[Issue], files: usize) -> Self {
        let mut s = Summary {
            files,
            total: issues.len(),
            ..Summary::default()
        };
        for is in issues {
            match is.kind {
                IssueKind::Color => s.color += 1,
                IssueKind::Spacing => s.spacing += 1,
                IssueKind::FontSize => s.font_size += 1,
                IssueKind::Unknown => {}
            }
        }
        s
    }
}

#[derive(Serialize, Debug)]
/// Scan results container.
pub struct ScanResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}
