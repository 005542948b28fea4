//! Canonical design-token store.
//!
//! A `TokenStore` is rebuilt from exactly one source per run and never
//! mutated afterwards. Two source shapes are accepted, selected explicitly
//! by the caller through `TokenSource`:
//! - `Stylesheet`: `--name: value;` custom-property declarations.
//! - `Json`: a nested design-token tree (design tool export).
//!
//! Numeric token values are stored as `Px`, a totally ordered `f64`, so sets
//! iterate in ascending order.

use crate::error::{QaError, Result};
use crate::ingest;
use serde_json::Value as Json;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

/// Spacing scale seeded when a JSON source declares no spacing tokens.
pub const DEFAULT_SPACING_SCALE: &[f64] = &[
    0.0, 2.0, 4.0, 8.0, 12.0, 16.0, 20.0, 24.0, 32.0, 40.0, 48.0, 64.0, 80.0, 120.0,
];
/// Radius scale seeded when a JSON source declares no radius tokens.
pub const DEFAULT_RADIUS_SCALE: &[f64] = &[0.0, 2.0, 4.0, 6.0, 8.0, 12.0, 16.0, 999.0];

#[derive(Debug, Clone, Copy)]
/// A pixel value usable as an ordered set/map key.
pub struct Px(pub f64);

impl PartialEq for Px {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Px {}

impl PartialOrd for Px {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Px {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Px {
    /// Integral values print without a fraction (`16`, not `16.0`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Fallback scales applied by the JSON ingestor.
pub struct DefaultScales {
    pub spacing: Vec<f64>,
    pub radius: Vec<f64>,
}

impl Default for DefaultScales {
    fn default() -> Self {
        DefaultScales {
            spacing: DEFAULT_SPACING_SCALE.to_vec(),
            radius: DEFAULT_RADIUS_SCALE.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
/// Token input tagged by format.
pub enum TokenSource {
    Stylesheet(String),
    Json(Json),
}

impl TokenSource {
    /// Read a token file, choosing the format from its extension.
    ///
    /// Stylesheet extensions (`css`, `scss`, `less`) load as text; anything
    /// else must parse as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(QaError::TokenSourceNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|e| QaError::io(path, e))?;
        let is_stylesheet = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_ascii_lowercase().as_str(), "css" | "scss" | "less"))
            .unwrap_or(false);
        if is_stylesheet {
            return Ok(TokenSource::Stylesheet(text));
        }
        serde_json::from_str(&text)
            .map(TokenSource::Json)
            .map_err(|source| QaError::TokenJson {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Allowed style values for one run.
pub struct TokenStore {
    /// `#rrggbb` (lowercase) -> token identifier.
    pub colors: HashMap<String, String>,
    pub spacing: BTreeSet<Px>,
    /// Pixel size -> token identifier.
    pub font_size: BTreeMap<Px, String>,
    pub radius: BTreeSet<Px>,
}

impl TokenStore {
    /// Build the store from a tagged source.
    pub fn from_source(source: &TokenSource, scales: &DefaultScales) -> TokenStore {
        let (store, skipped) = match source {
            TokenSource::Stylesheet(css) => ingest::from_stylesheet(css),
            TokenSource::Json(doc) => ingest::from_json(doc, scales),
        };
        if skipped > 0 {
            tracing::warn!(skipped, "skipped token values that could not be parsed");
        }
        tracing::info!(
            colors = store.colors.len(),
            spacing = store.spacing.len(),
            font_sizes = store.font_size.len(),
            radii = store.radius.len(),
            "loaded design tokens"
        );
        store
    }

    /// Load and build in one step.
    pub fn load(path: &Path, scales: &DefaultScales) -> Result<TokenStore> {
        let source = TokenSource::load(path)?;
        Ok(TokenStore::from_source(&source, scales))
    }

    pub fn color_token(&self, hex: &str) -> Option<&str> {
        self.colors.get(hex).map(String::as_str)
    }

    pub fn font_size_token(&self, px: f64) -> Option<&str> {
        self.font_size.get(&Px(px)).map(String::as_str)
    }

    pub fn has_spacing(&self, px: f64) -> bool {
        self.spacing.contains(&Px(px))
    }
}
