//! design-qa CLI binary entry point.
//! Resolves configuration, loads tokens, scans, optionally fixes, and prints.

use clap::Parser;
use design_qa::cli::{Cli, Commands};
use design_qa::{config, fix, output, scan, utils, QaError, TokenStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DESIGN_QA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Check {
            target,
            tokens,
            output,
            fix,
        } => {
            let code = match run_check(&target, tokens.as_deref(), output.as_deref(), fix) {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    if e.is_usage() {
                        2
                    } else {
                        1
                    }
                }
            };
            std::process::exit(code);
        }
    }
}

fn run_check(
    target: &str,
    tokens: Option<&str>,
    output: Option<&str>,
    fix: bool,
) -> Result<i32, QaError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let eff = config::resolve_effective(&cwd, target, tokens, output, fix.then_some(true))?;

    if !eff.target.is_dir() {
        return Err(QaError::ScanRootNotFound(eff.target));
    }
    if !eff.tokens.is_file() {
        eprintln!(
            "{} use --tokens or set `tokens` in design-qa.toml",
            utils::note_prefix()
        );
        return Err(QaError::TokenSourceNotFound(eff.tokens));
    }
    if eff.output != "json" {
        if !eff.config_found {
            eprintln!("{} No design-qa.toml found; using defaults.", utils::note_prefix());
        }
        eprintln!(
            "{} Scanning {} with tokens from {}",
            utils::info_prefix(),
            eff.target.display(),
            eff.tokens.display()
        );
    }

    let store = TokenStore::load(&eff.tokens, &eff.scales)?;
    let result = scan::scan_files(&eff.target, &store, &eff.scan)?;

    if eff.fix {
        let report = fix::fix_files(&eff.target, &result.issues)?;
        output::print_report(&result, &eff.output, Some(&report));
        return Ok(if report.unfixed() > 0 { 1 } else { 0 });
    }

    output::print_report(&result, &eff.output, None);
    Ok(if result.issues.is_empty() { 0 } else { 1 })
}
