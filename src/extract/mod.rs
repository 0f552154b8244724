pub mod conductivity;
pub mod critical;
pub mod latent;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::elements::ElementTable;

/// Converted reference values keyed by element symbol.
pub type ReferenceMap = BTreeMap<String, f64>;

/// One value scanned out of a pasted blob, before symbol resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub key: String,
    pub value: f64,
    pub unit: Option<String>,
}

/// How the `key` capture of a layout names its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// Already a symbol (`Fe`).
    Symbol,
    /// Full English name (`Iron`).
    Name,
    /// Name glued to symbol (`IronFe`); the symbol starts at the last capital.
    NameSymbol,
}

impl KeyStyle {
    pub fn resolve(self, key: &str, table: &ElementTable) -> Option<&'static str> {
        let candidate = match self {
            KeyStyle::Symbol => key.trim(),
            KeyStyle::Name => return table.symbol_for(key),
            KeyStyle::NameSymbol => {
                let idx = key.rfind(|c: char| c.is_ascii_uppercase())?;
                &key[idx..]
            }
        };
        table.get(candidate).map(|e| e.symbol)
    }
}

/// Describes how values and their owning elements interleave in a blob.
///
/// The regex must expose named groups `key` and `value`; `unit` is optional.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub regex: &'static Regex,
    pub key_style: KeyStyle,
    pub not_available: Option<&'static str>,
    /// Rows end in the element's atomic number, glued to the next row's value
    /// (`...RadonRn860.0000569 W/cmK...`).
    pub trailing_number: bool,
}

/// Scan every match of the layout over the whole blob, so several values per
/// line and multi-column pastes both work.
pub fn scan(text: &str, layout: &Layout, table: &ElementTable) -> Vec<RawEntry> {
    let mut entries = Vec::new();
    let mut carry: Option<String> = None;

    for caps in layout.regex.captures_iter(text) {
        let (Some(key), Some(value)) = (caps.name("key"), caps.name("value")) else {
            continue;
        };
        let key = key.as_str();
        let mut value_text = value.as_str();

        if let Some(prefix) = carry.take() {
            if let Some(rest) = value_text.strip_prefix(prefix.as_str()) {
                if !rest.is_empty() {
                    value_text = rest;
                }
            }
        }
        if layout.trailing_number {
            carry = layout
                .key_style
                .resolve(key, table)
                .and_then(|s| table.atomic_number(s))
                .map(|z| z.to_string());
        }

        if layout.not_available == Some(value_text) {
            debug!(key, "not available, skipped");
            continue;
        }
        match value_text.parse::<f64>() {
            Ok(v) => entries.push(RawEntry {
                key: key.to_string(),
                value: v,
                unit: caps.name("unit").map(|m| m.as_str().to_string()),
            }),
            Err(_) => debug!(key, value = value_text, "unparsable value, skipped"),
        }
    }
    entries
}

/// Map raw entries to symbols and convert. Unresolvable keys are dropped;
/// a later duplicate overwrites an earlier one.
pub fn resolve<F>(entries: &[RawEntry], style: KeyStyle, table: &ElementTable, convert: F) -> ReferenceMap
where
    F: Fn(f64) -> f64,
{
    let mut out = ReferenceMap::new();
    for entry in entries {
        match style.resolve(&entry.key, table) {
            Some(symbol) => {
                let value = convert(entry.value);
                debug!(symbol, raw = entry.value, unit = ?entry.unit, value, "reference value");
                out.insert(symbol.to_string(), value);
            }
            None => debug!(key = %entry.key, "no symbol for key, dropped"),
        }
    }
    out
}

/// Read a blob from `path`, or fall back to the copy shipped with the tool.
pub fn read_blob(path: Option<&Path>, bundled: &'static str) -> Result<Cow<'static, str>> {
    match path {
        Some(p) => {
            let text = fs::read_to_string(p).with_context(|| format!("Failed to read reference blob {:?}", p))?;
            Ok(Cow::Owned(text))
        }
        None => Ok(Cow::Borrowed(bundled)),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static SYMBOL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?P<key>[A-Z][a-z]?)=(?P<value>[\d.]+|N/A)").unwrap());

    fn symbol_layout() -> Layout {
        Layout {
            regex: &SYMBOL_RE,
            key_style: KeyStyle::Symbol,
            not_available: Some("N/A"),
            trailing_number: false,
        }
    }

    #[test]
    fn key_styles() {
        let table = ElementTable::standard();
        assert_eq!(KeyStyle::Symbol.resolve("Fe", &table), Some("Fe"));
        assert_eq!(KeyStyle::Name.resolve("Iron", &table), Some("Fe"));
        assert_eq!(KeyStyle::NameSymbol.resolve("RadonRn", &table), Some("Rn"));
        assert_eq!(KeyStyle::NameSymbol.resolve("NitrogenN", &table), Some("N"));
        assert_eq!(KeyStyle::NameSymbol.resolve("lowercase", &table), None);
        assert_eq!(KeyStyle::Symbol.resolve("Xx", &table), None);
    }

    #[test]
    fn multiple_values_per_line() {
        let table = ElementTable::standard();
        let entries = scan("Fe=1.5 Cu=2 Ag=3.25\nAu=4", &symbol_layout(), &table);
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["Fe", "Cu", "Ag", "Au"]);
        assert_eq!(entries[2].value, 3.25);
    }

    #[test]
    fn not_available_is_skipped_not_zeroed() {
        let table = ElementTable::standard();
        let entries = scan("Fe=N/A Cu=2", &symbol_layout(), &table);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "Cu");
    }

    #[test]
    fn unparsable_values_are_skipped() {
        let table = ElementTable::standard();
        let entries = scan("Fe=1.2.3 Cu=2", &symbol_layout(), &table);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn duplicates_overwrite_and_unknown_drop() {
        let table = ElementTable::standard();
        let entries = scan("Fe=1 Xx=9 Fe=2", &symbol_layout(), &table);
        let map = resolve(&entries, KeyStyle::Symbol, &table, |v| v * 10.0);
        assert_eq!(map.len(), 1);
        assert_eq!(map["Fe"], 20.0);
    }

    #[test]
    fn bundled_blob_fallback() {
        let text = read_blob(None, "bundled").unwrap();
        assert_eq!(text, "bundled");
        assert!(read_blob(Some(Path::new("does/not/exist.txt")), "x").is_err());
    }
}
