//! Configuration discovery and effective settings resolution.
//!
//! design-qa reads `design-qa.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `tokens`: `design-tokens.css`
//! - `output`: `human`
//! - `fix`: false
//! - `scan.extensions`: js, jsx, ts, tsx, css, scss, vue, svelte
//! - `scan.exclude`: none
//! - `scales.spacing|radius`: the built-in seed scales
//!
//! Overrides precedence: CLI > config file > defaults. Paths given on the
//! CLI are relative to the working directory; paths from the config file
//! are relative to the directory holding it.

use crate::error::{QaError, Result};
use crate::scan::ScanOptions;
use crate::tokens::DefaultScales;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: &[&str] = &["design-qa.toml", "design-qa.yaml", "design-qa.yml"];
pub const DEFAULT_TOKENS: &str = "design-tokens.css";

#[derive(Debug, Default, Deserialize, Clone)]
/// File selection section under `[scan]`.
pub struct ScanCfg {
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Seed scale overrides under `[scales]`.
pub struct ScalesCfg {
    pub spacing: Option<Vec<f64>>,
    pub radius: Option<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `design-qa.toml|yaml`.
pub struct QaConfig {
    pub tokens: Option<String>,
    pub output: Option<String>,
    pub fix: Option<bool>,
    #[serde(default)]
    pub scan: Option<ScanCfg>,
    #[serde(default)]
    pub scales: Option<ScalesCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub target: PathBuf,
    pub tokens: PathBuf,
    pub output: String,
    pub fix: bool,
    pub scan: ScanOptions,
    pub scales: DefaultScales,
    pub config_found: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a config file or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `QaConfig` from the first config file present in `root`.
pub fn load_config(root: &Path) -> Result<Option<QaConfig>> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|e| QaError::io(&path, e))?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<QaConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<QaConfig>(&s).map_err(|e| e.to_string())
        };
        return parsed
            .map(Some)
            .map_err(|message| QaError::Config { path, message });
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cwd: &Path,
    cli_target: &str,
    cli_tokens: Option<&str>,
    cli_output: Option<&str>,
    cli_fix: Option<bool>,
) -> Result<Effective> {
    let repo_root = detect_repo_root(cwd);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let tokens = match (cli_tokens, cfg.tokens.as_deref()) {
        (Some(t), _) => cwd.join(t),
        (None, Some(t)) => repo_root.join(t),
        (None, None) => cwd.join(DEFAULT_TOKENS),
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let fix = cli_fix.or(cfg.fix).unwrap_or(false);

    let scan_cfg = cfg.scan.unwrap_or_default();
    let mut scan = ScanOptions::default();
    if let Some(exts) = scan_cfg.extensions {
        scan.extensions = exts
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
    }
    for pat in &scan_cfg.exclude {
        let p = glob::Pattern::new(pat).map_err(|e| QaError::Config {
            path: repo_root.clone(),
            message: format!("bad exclude pattern '{}': {}", pat, e),
        })?;
        scan.exclude.push(p);
    }

    let scales_cfg = cfg.scales.unwrap_or_default();
    let defaults = DefaultScales::default();
    let scales = DefaultScales {
        spacing: scales_cfg.spacing.unwrap_or(defaults.spacing),
        radius: scales_cfg.radius.unwrap_or(defaults.radius),
    };

    Ok(Effective {
        target: cwd.join(cli_target),
        repo_root,
        tokens,
        output,
        fix,
        scan,
        scales,
        config_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("design-qa.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
tokens = "tokens/figma.json"
output = "json"
fix = true
[scan]
extensions = [".tsx", "css"]
exclude = ["**/*.stories.tsx"]
[scales]
spacing = [0, 4, 8]
    "#
        )
        .unwrap();

        let nested = root.join("packages/web");
        fs::create_dir_all(&nested).unwrap();
        let eff = resolve_effective(&nested, "src", None, None, None).unwrap();
        assert!(eff.config_found);
        assert_eq!(eff.repo_root, root);
        assert_eq!(eff.tokens, root.join("tokens/figma.json"));
        assert_eq!(eff.target, nested.join("src"));
        assert_eq!(eff.output, "json");
        assert!(eff.fix);
        assert_eq!(eff.scan.extensions, vec!["tsx", "css"]);
        assert!(eff.scan.exclude[0].matches("src/Button.stories.tsx"));
        assert_eq!(eff.scales.spacing, vec![0.0, 4.0, 8.0]);
        assert_eq!(eff.scales.radius, DefaultScales::default().radius);
    }

    #[test]
    fn test_load_yaml_and_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("design-qa.yaml"),
            "tokens: design-tokens.css\noutput: json\nfix: true\n",
        )
        .unwrap();

        let eff = resolve_effective(root, ".", Some("other.json"), Some("human"), Some(false))
            .unwrap();
        assert_eq!(eff.tokens, root.join("other.json"));
        assert_eq!(eff.output, "human");
        assert!(!eff.fix);
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        let eff = resolve_effective(root, "src", None, None, None).unwrap();
        assert!(!eff.config_found);
        assert_eq!(eff.tokens, root.join(DEFAULT_TOKENS));
        assert_eq!(eff.output, "human");
        assert!(!eff.fix);
        assert_eq!(eff.scan.extensions.len(), crate::scan::SCAN_EXTENSIONS.len());
        assert_eq!(eff.scales, DefaultScales::default());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("design-qa.toml"), "fix = \"yes please\"").unwrap();
        let err = resolve_effective(root, ".", None, None, None).unwrap_err();
        assert!(matches!(err, QaError::Config { .. }));
        assert!(err.is_usage());
    }
}
