use serde_json::{Map, Value};
use tracing::debug;

use super::MissingPolicy;
use crate::document::ElementMap;
use crate::elements::ElementTable;
use crate::extract::ReferenceMap;
use crate::report::PatchReport;
use crate::units::kj_per_mol_to_j_per_kg;
use crate::value::{annotate, format_decimal, numeric_prefix};

pub const FIELD: &str = "latentHeat";

#[derive(Debug, Clone)]
pub struct LatentOptions {
    pub tag: Option<String>,
    pub missing: MissingPolicy,
    pub places: usize,
}

impl Default for LatentOptions {
    fn default() -> Self {
        LatentOptions {
            tag: None,
            missing: MissingPolicy::NotAvailable,
            places: 2,
        }
    }
}

/// Fusion and vaporization references in kJ/mol, written as J/kg strings.
pub fn apply(
    elements: &mut ElementMap,
    fusion: &ReferenceMap,
    vaporization: &ReferenceMap,
    table: &ElementTable,
    opts: &LatentOptions,
    report: &mut PatchReport,
) {
    let tag = opts.tag.as_deref().unwrap_or("");

    for (symbol, record) in elements.iter_mut() {
        let Some(name) = table.name_for(symbol) else {
            report.skipped(symbol, "unknown symbol");
            continue;
        };
        let Some(props) = record.as_object_mut() else {
            report.skipped(symbol, "record is not an object");
            continue;
        };
        let mass = props.get("mass").and_then(numeric_prefix).filter(|m| *m > 0.0);
        debug!(symbol = %symbol, name, ?mass, "latent heat");

        // a value that cannot be converted counts as missing
        let mut writes = Vec::new();
        let mut converted = false;
        let mut massless = false;
        for (field, refs) in [("fusion", fusion), ("vaporization", vaporization)] {
            let value = match (refs.get(symbol), mass) {
                (Some(&kj), Some(mass)) => {
                    converted = true;
                    let text = format_decimal(kj_per_mol_to_j_per_kg(kj, mass), opts.places);
                    Some(Value::String(annotate(&text, tag)))
                }
                (Some(_), None) => {
                    massless = true;
                    opts.missing.sentinel()
                }
                (None, _) => opts.missing.sentinel(),
            };
            if let Some(value) = value {
                writes.push((field, value));
            }
        }

        if writes.is_empty() {
            report.skipped(symbol, if massless { "no molar mass" } else { "no reference data" });
            continue;
        }
        let heat = props
            .entry(FIELD.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !heat.is_object() {
            *heat = Value::Object(Map::new());
        }
        let Some(heat) = heat.as_object_mut() else {
            continue;
        };
        for (field, value) in writes {
            heat.insert(field.to_string(), value);
        }
        if converted {
            report.updated(symbol);
        } else {
            report.defaulted(symbol);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{parse, Anchor};
    use serde_json::json;

    fn fixture() -> ElementMap {
        let text = std::fs::read_to_string("tests/fixtures/scientific_data.ts").unwrap();
        parse(&text, &Anchor::Braces).unwrap().elements
    }

    fn refs(pairs: &[(&str, f64)]) -> ReferenceMap {
        pairs.iter().map(|(s, v)| (s.to_string(), *v)).collect()
    }

    #[test]
    fn converts_to_mass_specific() {
        let table = ElementTable::standard();
        let mut elements = fixture();
        let mut report = PatchReport::new("latent-heat");
        let opts = LatentOptions {
            tag: Some("_5".to_string()),
            ..Default::default()
        };
        apply(
            &mut elements,
            &refs(&[("Fe", 13.81)]),
            &refs(&[("Fe", 347.0), ("N", 2.79)]),
            &table,
            &opts,
            &mut report,
        );
        assert_eq!(elements["Fe"][FIELD]["fusion"], json!("247291.61_5"));
        assert_eq!(elements["Fe"][FIELD]["vaporization"], json!("6213627_5"));
        assert_eq!(elements["Og"][FIELD]["fusion"], json!("N/A"));
        assert_eq!(elements["Og"][FIELD]["vaporization"], json!("N/A"));
        assert_eq!(report.updated_count(), 2);
        assert_eq!(report.defaulted_count(), 4);
    }

    #[test]
    fn scalar_field_becomes_object() {
        let table = ElementTable::standard();
        let mut elements = fixture();
        assert_eq!(elements["N"][FIELD], json!(0));
        let mut report = PatchReport::new("latent-heat");
        apply(
            &mut elements,
            &ReferenceMap::new(),
            &refs(&[("N", 2.79)]),
            &table,
            &LatentOptions::default(),
            &mut report,
        );
        assert_eq!(elements["N"][FIELD], json!({"fusion": "N/A", "vaporization": "199186.12"}));
    }

    #[test]
    fn records_without_mass_get_sentinels() {
        let table = ElementTable::standard();
        let mut elements = fixture();
        elements["Fe"]["mass"] = json!("N/A");
        let mut report = PatchReport::new("latent-heat");
        apply(
            &mut elements,
            &refs(&[("Fe", 13.81)]),
            &ReferenceMap::new(),
            &table,
            &LatentOptions::default(),
            &mut report,
        );
        assert_eq!(elements["Fe"][FIELD], json!({"fusion": "N/A", "vaporization": "N/A"}));
        assert_eq!(report.updated_count(), 0);
        assert_eq!(report.defaulted_count(), 6);
    }

    #[test]
    fn keep_policy_leaves_scalar_alone() {
        let table = ElementTable::standard();
        let mut elements = fixture();
        elements["Fe"]["mass"] = json!("N/A");
        let opts = LatentOptions {
            missing: MissingPolicy::Keep,
            ..Default::default()
        };
        let mut report = PatchReport::new("latent-heat");
        apply(
            &mut elements,
            &refs(&[("Fe", 13.81)]),
            &ReferenceMap::new(),
            &table,
            &opts,
            &mut report,
        );
        assert_eq!(elements["N"][FIELD], json!(0));
        assert_eq!(elements["Fe"][FIELD], json!({"fusion": 0, "vaporization": 0}));
        assert_eq!(report.defaulted_count(), 0);
        assert_eq!(report.skipped_count(), 6);
    }
}
