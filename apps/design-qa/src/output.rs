//! Output rendering for scan and fix results.
//!
//! Supports `human` (default) and `json` outputs. The JSON form carries the
//! issue list, a per-type summary, and fix counts when `--fix` ran. With
//! `--fix`, an issue is marked fixed only when its literal left its line.

use crate::fix::{remaining_spacing, FixReport, FixStats};
use crate::models::{IssueKind, ScanResult};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::use_colors()
}

fn icon(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::Color => "🎨",
        IssueKind::Spacing => "📏",
        IssueKind::FontSize => "🔤",
        IssueKind::Unknown => "⚠️",
    }
}

/// Print scan results, plus fix counts when a fix pass ran.
pub fn print_report(res: &ScanResult, output: &str, fix: Option<&FixReport>) {
    if output == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(res, fix)).unwrap_or_default()
        );
        return;
    }
    let color = use_colors(output);
    if res.issues.is_empty() {
        let ok = format!("✅ No issues found in {} files.", res.summary.files);
        if color {
            println!("{}", ok.green());
        } else {
            println!("{}", ok);
        }
        return;
    }

    let mut current: Option<&str> = None;
    for (idx, is) in res.issues.iter().enumerate() {
        if current != Some(is.file.as_str()) {
            if current.is_some() {
                println!();
            }
            if color {
                println!("{} {}", "📄".yellow(), is.file.yellow().bold());
            } else {
                println!("📄 {}", is.file);
            }
            current = Some(is.file.as_str());
        }
        let line = format!("line {}", is.line);
        let status = match fix {
            Some(report) if report.fixed.get(idx).copied().unwrap_or(false) => " ✓ fixed",
            Some(_) if is.kind.is_fixable() => " (not fixed)",
            Some(_) => " (manual)",
            None => "",
        };
        if color {
            println!(
                "   {} {}  {} → {}{}",
                icon(is.kind),
                line.bright_black(),
                is.value.red(),
                is.suggestion.green(),
                status.bright_black()
            );
        } else {
            println!(
                "   {} {}  {} → {}{}",
                icon(is.kind),
                line,
                is.value,
                is.suggestion,
                status
            );
        }
        if fix.is_none() {
            if color {
                println!("      {}", is.message.bright_black());
            } else {
                println!("      {}", is.message);
            }
        }
    }

    let s = &res.summary;
    let rule = "━".repeat(50);
    let head = format!("❌ Found {} issues in {} files:", s.total, s.files);
    if color {
        println!("\n{}\n{}", rule.blue(), head.red().bold());
    } else {
        println!("\n{}\n{}", rule, head);
    }
    for (kind, count) in [
        (IssueKind::Color, s.color),
        (IssueKind::Spacing, s.spacing),
        (IssueKind::FontSize, s.font_size),
    ] {
        if count > 0 {
            println!("   {} {}: {}", icon(kind), kind, count);
        }
    }

    if let Some(report) = fix {
        print_fix_summary(report, remaining_spacing(&res.issues), color);
    }
}

fn print_fix_summary(report: &FixReport, remaining: usize, color: bool) {
    let stats = &report.stats;
    if stats.total > 0 {
        let head = format!("✅ Fixed {} issues", stats.total);
        if color {
            println!("\n{}", head.green().bold());
        } else {
            println!("\n{}", head);
        }
        if stats.color > 0 {
            println!("   🎨 color: {}", stats.color);
        }
        if stats.font_size > 0 {
            println!("   🔤 fontSize: {}", stats.font_size);
        }
    }
    if remaining > 0 {
        let note = format!("⚠️  {} spacing issues need a manual fix", remaining);
        if color {
            println!("\n{}", note.yellow());
        } else {
            println!("\n{}", note);
        }
    }
    let missed = report.unfixed().saturating_sub(remaining);
    if missed > 0 {
        let note = format!("⚠️  {} issues could not be rewritten automatically", missed);
        if color {
            println!("\n{}", note.yellow());
        } else {
            println!("\n{}", note);
        }
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(res: &ScanResult, fix: Option<&FixReport>) -> JsonVal {
    let mut out = json!({
        "issues": res.issues,
        "summary": res.summary,
    });
    if let Some(report) = fix {
        let stats: &FixStats = &report.stats;
        out["fix"] = json!({
            "color": stats.color,
            "fontSize": stats.font_size,
            "total": stats.total,
            "remainingSpacing": remaining_spacing(&res.issues),
            "unfixed": report.unfixed(),
        });
    }
    out
}
