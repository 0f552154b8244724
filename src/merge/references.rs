//! Source tagging of property values.
//!
//! The scheme is plain data: which zero values mean "missing", which paths
//! get which suffix, and the suffix everything else falls back to. What a
//! suffix refers to is up to whoever renders the data.

use serde::Deserialize;
use serde_json::Value;

use super::pointer;
use crate::document::ElementMap;
use crate::elements::ElementTable;
use crate::report::PatchReport;
use crate::value::{annotate, clean_text, is_sentinel, is_zero, NOT_AVAILABLE};

#[derive(Debug, Clone, Deserialize)]
pub struct TagRule {
    /// Dotted property path, e.g. `latentHeat.fusion`.
    pub path: String,
    pub suffix: String,
    /// Only elements up to this atomic number get the suffix.
    #[serde(default)]
    pub max_atomic_number: Option<u32>,
}

impl TagRule {
    fn new(path: &str, suffix: &str, max_atomic_number: Option<u32>) -> Self {
        TagRule {
            path: path.to_string(),
            suffix: suffix.to_string(),
            max_atomic_number,
        }
    }

    fn applies_to(&self, symbol: &str, table: &ElementTable) -> bool {
        match self.max_atomic_number {
            None => true,
            Some(max) => table.atomic_number(symbol).is_some_and(|z| z <= max),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TaggingScheme {
    /// Paths where zero means "not available".
    pub zero_to_sentinel: Vec<String>,
    /// Keys where an empty list means "not available".
    pub empty_list_to_sentinel: Vec<String>,
    pub rules: Vec<TagRule>,
    pub fallback_suffix: String,
    /// Keys the fallback never descends into.
    pub untagged_keys: Vec<String>,
    /// Decimals kept when a number becomes a tagged string.
    pub places: usize,
}

impl Default for TaggingScheme {
    fn default() -> Self {
        let paths = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        TaggingScheme {
            zero_to_sentinel: paths(&[
                "thermalConductivity",
                "atomicRadiusPm",
                "latentHeat.fusion",
                "latentHeat.vaporization",
                "phaseTemperatures.meltingK",
                "phaseTemperatures.boilingK",
            ]),
            empty_list_to_sentinel: paths(&["oxidationStates"]),
            rules: vec![
                TagRule::new("atomicRadiusPm", "_3", Some(99)),
                TagRule::new("latentHeat.fusion", "_5", None),
                TagRule::new("latentHeat.vaporization", "_5", None),
            ],
            fallback_suffix: "_2".to_string(),
            untagged_keys: paths(&["color", "oxidationStates", "unit", "variation"]),
            places: 4,
        }
    }
}

impl TaggingScheme {
    /// Number or string leaf -> tagged string. Sentinels and other shapes
    /// are left alone. Returns whether the value changed.
    fn tag_leaf(&self, value: &mut Value, suffix: &str) -> bool {
        if is_sentinel(value) || !(value.is_number() || value.is_string()) {
            return false;
        }
        let tagged = annotate(&clean_text(value, self.places), suffix);
        let changed = value.as_str() != Some(tagged.as_str());
        *value = Value::String(tagged);
        changed
    }

    fn tag_remaining(&self, value: &mut Value) -> bool {
        match value {
            Value::Object(obj) => {
                let mut changed = false;
                for (key, child) in obj.iter_mut() {
                    if self.untagged_keys.iter().any(|k| k == key) {
                        continue;
                    }
                    changed |= self.tag_remaining(child);
                }
                changed
            }
            Value::Array(_) => false,
            leaf => self.tag_leaf(leaf, &self.fallback_suffix),
        }
    }
}

fn sentinel() -> Value {
    Value::String(NOT_AVAILABLE.to_string())
}

pub fn apply(elements: &mut ElementMap, scheme: &TaggingScheme, table: &ElementTable, report: &mut PatchReport) {
    for (symbol, record) in elements.iter_mut() {
        if !record.is_object() {
            report.skipped(symbol, "record is not an object");
            continue;
        }
        let mut changed = false;

        for path in &scheme.zero_to_sentinel {
            if let Some(v) = record.pointer_mut(&pointer(path)) {
                if is_zero(v) {
                    *v = sentinel();
                    changed = true;
                }
            }
        }
        for key in &scheme.empty_list_to_sentinel {
            if let Some(v) = record.get_mut(key.as_str()) {
                if v.as_array().is_some_and(|a| a.is_empty()) {
                    *v = sentinel();
                    changed = true;
                }
            }
        }
        for rule in scheme.rules.iter().filter(|r| r.applies_to(symbol, table)) {
            if let Some(v) = record.pointer_mut(&pointer(&rule.path)) {
                changed |= scheme.tag_leaf(v, &rule.suffix);
            }
        }
        changed |= scheme.tag_remaining(record);

        if changed {
            report.updated(symbol);
        } else {
            report.skipped(symbol, "already tagged");
        }
    }
}

// ── Tests ──
