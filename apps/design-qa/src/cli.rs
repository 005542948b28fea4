//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "design-qa",
    version,
    about = "Audit style literals against design tokens",
    long_about = "design-qa — find hardcoded colors, spacing, and font sizes that should use design tokens, and fix the exact matches.\n\nConfiguration precedence: CLI > design-qa.toml > defaults.",
    after_help = "Examples:\n  design-qa check ./src\n  design-qa check ./src --tokens ./tokens.json\n  design-qa check ./src --fix\n  design-qa check ./src --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current design-qa version.")]
    Version,
    /// Scan a directory for hardcoded style values
    #[command(
        about = "Scan for hardcoded style values",
        long_about = "Scan style, markup, and script files under TARGET. Colors and font sizes equal to a token are reported with the token to use; spacing off the scale is reported with the nearest allowed value. With --fix, color and font-size literals are rewritten in place.",
        after_help = "Examples:\n  design-qa check ./src --tokens design-tokens.css\n  design-qa check ./src --fix"
    )]
    Check {
        #[arg(help = "Directory to scan")]
        target: String,
        #[arg(short, long, help = "Token file: .css custom properties or JSON token tree (default: design-tokens.css)")]
        tokens: Option<String>,
        #[arg(short, long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Rewrite color and font-size literals to their tokens")]
        fix: bool,
    },
}
