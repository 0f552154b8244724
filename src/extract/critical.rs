//! Critical point readings from a name-keyed JSON blob:
//!
//! ```text
//! { "elements": { "Nitrogen": {
//!     "critical_temperature": "126.192 ± 0.010 K_141",
//!     "critical_pressure": "3.3958 ± 0.0017 MPa_141" } } }
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use super::KeyStyle;
use crate::elements::ElementTable;
use crate::error::PatchError;
use crate::value::{ESTIMATED, NOT_AVAILABLE};

pub const BUNDLED: &str = include_str!("../../data/critical_point.json");

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*([\d.]+)").unwrap());
static VARIATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"±\s*([\d.]+)").unwrap());
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Za-z]+)_\d+").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_\d+").unwrap());

#[derive(Deserialize)]
struct CriticalBlob {
    #[serde(alias = "Elementos")]
    elements: BTreeMap<String, RawCritical>,
}

#[derive(Deserialize)]
struct RawCritical {
    #[serde(default, alias = "Temperatura_Critica")]
    critical_temperature: Option<String>,
    #[serde(default, alias = "Pressao_Critica")]
    critical_pressure: Option<String>,
}

/// Source tag rewrites applied to readings. Tags with no entry are dropped.
#[derive(Debug, Clone)]
pub struct TagMap(Vec<(String, String)>);

impl TagMap {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        TagMap(pairs)
    }

    fn lookup(&self, source: &str) -> Option<&str> {
        self.0.iter().find(|(from, _)| from == source).map(|(_, to)| to.as_str())
    }
}

impl Default for TagMap {
    fn default() -> Self {
        TagMap(vec![
            ("_141".to_string(), "_19".to_string()),
            ("_319".to_string(), "_1".to_string()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CriticalReading {
    NotAvailable,
    Measured {
        value: String,
        unit: Option<String>,
        variation: Option<String>,
        estimated: bool,
        tag: Option<String>,
    },
}

impl CriticalReading {
    /// `value`, then `*` when estimated, then the rewritten tag.
    pub fn annotated_value(&self) -> String {
        match self {
            CriticalReading::NotAvailable => NOT_AVAILABLE.to_string(),
            CriticalReading::Measured { value, estimated, tag, .. } => {
                let mut out = value.clone();
                if *estimated {
                    out.push_str(ESTIMATED);
                }
                if let Some(t) = tag {
                    out.push_str(t);
                }
                out
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CriticalPoint {
    pub temperature: CriticalReading,
    pub pressure: CriticalReading,
}

pub fn parse_reading(raw: &str, tags: &TagMap) -> CriticalReading {
    let raw = raw.trim();
    if raw.is_empty() || raw == NOT_AVAILABLE {
        return CriticalReading::NotAvailable;
    }
    let Some(number) = NUMBER_RE.captures(raw).and_then(|c| c.get(1)) else {
        return CriticalReading::NotAvailable;
    };
    let tag = TAG_RE
        .find(raw)
        .and_then(|m| tags.lookup(m.as_str()))
        .map(str::to_string);

    CriticalReading::Measured {
        value: number.as_str().to_string(),
        unit: UNIT_RE.captures(raw).map(|c| c[1].to_string()),
        variation: VARIATION_RE.captures(raw).map(|c| c[1].to_string()),
        estimated: raw.contains(ESTIMATED),
        tag,
    }
}

/// Symbol -> critical point. Entries may be keyed by name or by symbol;
/// keys missing from the element table are dropped.
pub fn extract(
    text: &str,
    table: &ElementTable,
    tags: &TagMap,
) -> Result<BTreeMap<String, CriticalPoint>, PatchError> {
    let blob: CriticalBlob = serde_json::from_str(text).map_err(|e| PatchError::Blob(e.to_string()))?;
    let mut out = BTreeMap::new();
    for (name, raw) in blob.elements {
        let symbol = KeyStyle::Name
            .resolve(&name, table)
            .or_else(|| KeyStyle::Symbol.resolve(&name, table));
        let Some(symbol) = symbol else {
            debug!(key = %name, "no element for key, dropped");
            continue;
        };
        let point = CriticalPoint {
            temperature: parse_reading(raw.critical_temperature.as_deref().unwrap_or(""), tags),
            pressure: parse_reading(raw.critical_pressure.as_deref().unwrap_or(""), tags),
        };
        out.insert(symbol.to_string(), point);
    }
    Ok(out)
}
