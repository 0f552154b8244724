//! Property value helpers: decimal formatting, annotation suffixes and
//! reading numbers back out of annotated strings.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Placeholder for "no data available".
pub const NOT_AVAILABLE: &str = "N/A";

/// Marker appended to derived values.
pub const ESTIMATED: &str = "*";

static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\*|_\d+)$").unwrap());
static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)").unwrap());

/// Fixed-point rendering with trailing zeros (and a bare `.`) trimmed.
pub fn format_decimal(value: f64, places: usize) -> String {
    let s = format!("{:.*}", places, value);
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Round to `places` decimals, for fields that stay numeric.
pub fn round_to(value: f64, places: usize) -> f64 {
    format_decimal(value, places).parse().unwrap_or(value)
}

/// True when the text already ends in an estimate marker or a source tag.
pub fn is_annotated(text: &str) -> bool {
    ANNOTATION_RE.is_match(text)
}

/// Append `suffix` unless the text already carries an annotation.
pub fn annotate(text: &str, suffix: &str) -> String {
    if suffix.is_empty() || is_annotated(text) {
        text.to_string()
    } else {
        format!("{text}{suffix}")
    }
}

/// Formatted value, marked as an estimate when `estimated` is set.
pub fn format_estimate(value: f64, places: usize, estimated: bool) -> String {
    let s = format_decimal(value, places);
    if estimated {
        format!("{s}{ESTIMATED}")
    } else {
        s
    }
}

pub fn is_sentinel(value: &Value) -> bool {
    value.as_str() == Some(NOT_AVAILABLE)
}

/// Zero in any of its spellings (`0`, `0.0`, `"0"`).
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim() == "0",
        _ => false,
    }
}

/// Leading number of a property: `1.008_2` -> 1.008, `0.95*_10` -> 0.95.
pub fn numeric_prefix(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => LEADING_NUMBER_RE
            .captures(s)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok()),
        _ => None,
    }
}

/// Text form used before tagging a leaf: numbers get up to `places` decimals.
pub fn clean_text(value: &Value, places: usize) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 0.0 => "0".to_string(),
            Some(v) => format_decimal(v, places),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
