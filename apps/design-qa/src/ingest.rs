//! Token ingestors: stylesheet custom properties and JSON token trees.
//!
//! Both return the built store plus the number of token values that were
//! recognized by name or type but could not be parsed. Unrelated
//! declarations are ignored without counting.

use crate::tokens::{DefaultScales, Px, TokenStore};
use regex::Regex;
use serde_json::{Map, Value as Json};
use std::sync::LazyLock;

static DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--([a-zA-Z0-9-]+):\s*([^;]+);").unwrap());
static HEX6_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d+)").unwrap());
static FLOAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d*)?|\.\d+)").unwrap());

const METADATA_KEYS: &[&str] = &["extensions", "description", "blendMode"];

/// Parse `--name: value;` declarations.
///
/// - 6-digit hex values register as colors keyed by the lowercased hex.
/// - `space-*`, `font-size-*` and `radius-*` names register their leading
///   integer into spacing, font sizes and radii respectively.
pub fn from_stylesheet(css: &str) -> (TokenStore, usize) {
    let mut store = TokenStore::default();
    let mut skipped = 0usize;

    for caps in DECL_RE.captures_iter(css) {
        let name = &caps[1];
        let value = caps[2].trim();
        if HEX6_RE.is_match(value) {
            store.colors.insert(value.to_ascii_lowercase(), name.to_string());
        } else if name.starts_with("space-") {
            match leading_int(value) {
                Some(n) => {
                    store.spacing.insert(Px(n));
                }
                None => skipped += 1,
            }
        } else if name.starts_with("font-size-") {
            match leading_int(value) {
                Some(n) => {
                    store.font_size.insert(Px(n), name.to_string());
                }
                None => skipped += 1,
            }
        } else if name.starts_with("radius-") {
            match leading_int(value) {
                Some(n) => {
                    store.radius.insert(Px(n));
                }
                None => skipped += 1,
            }
        }
    }
    (store, skipped)
}

/// Walk a design-token tree and register every leaf (`value` + `type`).
///
/// Leaf identifiers join the key path with `-`, lowercasing each segment
/// and replacing whitespace with `-`. Empty spacing/radius results are
/// seeded from `scales`.
pub fn from_json(doc: &Json, scales: &DefaultScales) -> (TokenStore, usize) {
    let mut store = TokenStore::default();
    let mut skipped = 0usize;
    let mut path = Vec::new();
    walk(doc, &mut path, &mut store, &mut skipped);

    if store.spacing.is_empty() {
        store.spacing.extend(scales.spacing.iter().copied().map(Px));
    }
    if store.radius.is_empty() {
        store.radius.extend(scales.radius.iter().copied().map(Px));
    }
    (store, skipped)
}

fn walk(node: &Json, path: &mut Vec<String>, store: &mut TokenStore, skipped: &mut usize) {
    match node {
        Json::Object(obj) => {
            if let Some((value, kind)) = leaf_fields(obj) {
                register_leaf(value, kind, path, store, skipped);
                return;
            }
            for (key, child) in obj {
                if key.starts_with('$') || METADATA_KEYS.contains(&key.as_str()) {
                    continue;
                }
                path.push(key.clone());
                walk(child, path, store, skipped);
                path.pop();
            }
        }
        Json::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                path.push(i.to_string());
                walk(child, path, store, skipped);
                path.pop();
            }
        }
        _ => {}
    }
}

fn leaf_fields(obj: &Map<String, Json>) -> Option<(&Json, &str)> {
    let value = obj.get("value").or_else(|| obj.get("$value"))?;
    let kind = obj
        .get("type")
        .or_else(|| obj.get("$type"))
        .and_then(Json::as_str)?;
    Some((value, kind))
}

fn register_leaf(
    value: &Json,
    kind: &str,
    path: &[String],
    store: &mut TokenStore,
    skipped: &mut usize,
) {
    let name = token_name(path);
    match kind {
        "color" => match value.as_str().and_then(normalize_hex) {
            Some(hex) => {
                store.colors.insert(hex, name);
            }
            None => {
                tracing::debug!(token = %name, value = %value, "color token is not a hex literal");
                *skipped += 1;
            }
        },
        "spacing" | "dimension" => match json_number(value) {
            Some(n) => {
                store.spacing.insert(Px(n));
            }
            None => *skipped += 1,
        },
        "fontSize" | "fontSizes" => match json_number(value) {
            Some(n) => {
                store.font_size.insert(Px(n), name);
            }
            None => *skipped += 1,
        },
        "number" if path.iter().any(|p| p.contains("radius")) => match json_number(value) {
            Some(n) => {
                store.radius.insert(Px(n));
            }
            None => *skipped += 1,
        },
        _ => {}
    }
}

fn token_name(path: &[String]) -> String {
    path.iter()
        .map(|seg| WS_RE.replace_all(seg, "-").to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// `#rrggbb` or `#rrggbbaa` (alpha dropped), lowercased.
fn normalize_hex(s: &str) -> Option<String> {
    let digits = s.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    // Short form stays short: the detector reports `#fff` as written.
    match digits.len() {
        3 => Some(format!("#{}", digits).to_ascii_lowercase()),
        6 | 8 => Some(format!("#{}", &digits[..6]).to_ascii_lowercase()),
        _ => None,
    }
}

fn json_number(value: &Json) -> Option<f64> {
    match value {
        Json::Number(n) => n.as_f64().filter(|v| *v >= 0.0),
        Json::String(s) => leading_float(s),
        _ => None,
    }
}

/// Leading integer of a value such as `8px` or `12.7px` (-> 12).
pub fn leading_int(s: &str) -> Option<f64> {
    let caps = INT_RE.captures(s)?;
    caps[1].parse::<u64>().ok().map(|n| n as f64)
}

/// Leading decimal of a value such as `1.5rem` or `.5px`.
pub fn leading_float(s: &str) -> Option<f64> {
    let caps = FLOAT_RE.captures(s)?;
    caps[1].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn px(values: &[f64]) -> Vec<Px> {
        values.iter().copied().map(Px).collect()
    }

    #[test]
    fn test_stylesheet_space_and_font_size() {
        let (store, skipped) = from_stylesheet("--space-8: 8px; --font-size-14: 14px;");
        assert_eq!(skipped, 0);
        assert_eq!(store.spacing.iter().copied().collect::<Vec<_>>(), px(&[8.0]));
        assert_eq!(store.font_size.len(), 1);
        assert_eq!(store.font_size_token(14.0), Some("font-size-14"));
        assert!(store.colors.is_empty());
        assert!(store.radius.is_empty());
    }

    #[test]
    fn test_stylesheet_colors_radius_and_unrelated_properties() {
        let css = r#"
:root {
  --brand-primary-1: #1161FE;
  --brand-alias: #1161fe;
  --radius-4: 4px;
  --shadow-sm: 0 1px 2px rgba(0, 0, 0, 0.1);
  --space-bad: auto;
  --z-modal: 100;
}
"#;
        let (store, skipped) = from_stylesheet(css);
        // last definition wins for a repeated hex value
        assert_eq!(store.color_token("#1161fe"), Some("brand-alias"));
        assert_eq!(store.radius.iter().copied().collect::<Vec<_>>(), px(&[4.0]));
        assert!(store.spacing.is_empty());
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_stylesheet_integer_parse_truncates() {
        let (store, _) = from_stylesheet("--space-12: 12.7px;");
        assert!(store.has_spacing(12.0));
    }

    #[test]
    fn test_json_empty_document_seeds_defaults() {
        let (store, skipped) = from_json(&json!({}), &DefaultScales::default());
        assert_eq!(skipped, 0);
        assert!(store.colors.is_empty());
        assert!(store.font_size.is_empty());
        assert_eq!(
            store.spacing.iter().copied().collect::<Vec<_>>(),
            px(crate::tokens::DEFAULT_SPACING_SCALE)
        );
        assert_eq!(
            store.radius.iter().copied().collect::<Vec<_>>(),
            px(crate::tokens::DEFAULT_RADIUS_SCALE)
        );
    }

    #[test]
    fn test_json_seed_scales_can_be_overridden() {
        let scales = DefaultScales {
            spacing: vec![0.0, 10.0],
            radius: vec![3.0],
        };
        let (store, _) = from_json(&json!({}), &scales);
        assert_eq!(store.spacing.iter().copied().collect::<Vec<_>>(), px(&[0.0, 10.0]));
        assert_eq!(store.radius.iter().copied().collect::<Vec<_>>(), px(&[3.0]));
    }

    #[test]
    fn test_json_leaves_names_and_types() {
        let doc = json!({
            "$schema": "ignored",
            "Brand Colors": {
                "Primary  1": {"value": "#1161FEFF", "type": "color", "description": "main"},
                "Broken": {"value": "rgb(0,0,0)", "type": "color"},
                "extensions": {"x": {"value": "#000000", "type": "color"}}
            },
            "space": {
                "md": {"$value": "16px", "$type": "dimension"},
                "lg": {"value": 24, "type": "spacing"}
            },
            "corner radius": {
                "sm": {"value": "2", "type": "number"}
            },
            "opacity": {"half": {"value": "0.5", "type": "number"}},
            "font": {"body": {"value": "14", "type": "fontSizes"}}
        });
        let (store, skipped) = from_json(&doc, &DefaultScales::default());
        assert_eq!(store.color_token("#1161fe"), Some("brand-colors-primary-1"));
        assert_eq!(store.colors.len(), 1);
        assert_eq!(skipped, 1);
        assert_eq!(store.spacing.iter().copied().collect::<Vec<_>>(), px(&[16.0, 24.0]));
        assert_eq!(store.radius.iter().copied().collect::<Vec<_>>(), px(&[2.0]));
        assert_eq!(store.font_size_token(14.0), Some("font-body"));
    }

    #[test]
    fn test_json_short_hex_colors_are_registered_as_written() {
        let doc = json!({
            "neutral": {
                "white": {"value": "#FFF", "type": "color"},
                "gray": {"value": "#ccc", "type": "color"},
                "odd": {"value": "#abcd", "type": "color"}
            }
        });
        let (store, skipped) = from_json(&doc, &DefaultScales::default());
        assert_eq!(store.color_token("#fff"), Some("neutral-white"));
        assert_eq!(store.color_token("#ccc"), Some("neutral-gray"));
        assert_eq!(store.color_token("#ffffff"), None);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_leading_number_parsing() {
        assert_eq!(leading_int("8px"), Some(8.0));
        assert_eq!(leading_int(" 12.7px"), Some(12.0));
        assert_eq!(leading_int("auto"), None);
        assert_eq!(leading_float("1.5rem"), Some(1.5));
        assert_eq!(leading_float(".5px"), Some(0.5));
        assert_eq!(leading_float("px"), None);
    }
}
