use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::document::ElementMap;
use crate::extract::critical::{CriticalPoint, CriticalReading};
use crate::report::PatchReport;
use crate::value::NOT_AVAILABLE;

pub const TEMPERATURE_FIELD: &str = "tCriticalK";
pub const PRESSURE_FIELD: &str = "pCritical";

fn not_available() -> Value {
    Value::String(NOT_AVAILABLE.to_string())
}

fn pressure_value(reading: &CriticalReading) -> Value {
    match reading {
        CriticalReading::NotAvailable => not_available(),
        CriticalReading::Measured { unit, variation, .. } => {
            let mut obj = Map::new();
            obj.insert("value".to_string(), Value::String(reading.annotated_value()));
            obj.insert("unit".to_string(), Value::String(unit.clone().unwrap_or_default()));
            if let Some(v) = variation {
                obj.insert("variation".to_string(), Value::String(v.clone()));
            }
            Value::Object(obj)
        }
    }
}

pub fn apply(elements: &mut ElementMap, points: &BTreeMap<String, CriticalPoint>, report: &mut PatchReport) {
    for (symbol, record) in elements.iter_mut() {
        let Some(props) = record.as_object_mut() else {
            report.skipped(symbol, "record is not an object");
            continue;
        };
        match points.get(symbol) {
            Some(point) => {
                props.insert(
                    TEMPERATURE_FIELD.to_string(),
                    Value::String(point.temperature.annotated_value()),
                );
                props.insert(PRESSURE_FIELD.to_string(), pressure_value(&point.pressure));
                if point.temperature == CriticalReading::NotAvailable
                    && point.pressure == CriticalReading::NotAvailable
                {
                    report.defaulted(symbol);
                } else {
                    report.updated(symbol);
                }
            }
            None => {
                props.insert(TEMPERATURE_FIELD.to_string(), not_available());
                props.insert(PRESSURE_FIELD.to_string(), not_available());
                report.defaulted(symbol);
            }
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{parse, Anchor};
    use crate::elements::ElementTable;
    use crate::extract::critical::{extract, TagMap, BUNDLED};
    use serde_json::json;

    fn patched() -> (ElementMap, PatchReport) {
        let text = std::fs::read_to_string("tests/fixtures/scientific_data.ts").unwrap();
        let mut elements = parse(&text, &Anchor::Braces).unwrap().elements;
        let points = extract(BUNDLED, &ElementTable::standard(), &TagMap::default()).unwrap();
        let mut report = PatchReport::new("critical-point");
        apply(&mut elements, &points, &mut report);
        (elements, report)
    }

    #[test]
    fn measured_readings() {
        let (elements, _) = patched();
        assert_eq!(elements["Fe"][TEMPERATURE_FIELD], json!("9250_19"));
        assert_eq!(elements["Fe"][PRESSURE_FIELD], json!({"value": "8750_19", "unit": "bar"}));
        assert_eq!(elements["Hg"][TEMPERATURE_FIELD], json!("1750_1"));
    }

    #[test]
    fn variation_is_kept() {
        let (elements, _) = patched();
        assert_eq!(elements["N"][TEMPERATURE_FIELD], json!("126.192_19"));
        assert_eq!(
            elements["N"][PRESSURE_FIELD],
            json!({"value": "3.3958_19", "unit": "MPa", "variation": "0.0017"})
        );
    }

    #[test]
    fn unknown_readings_become_sentinels() {
        let (elements, report) = patched();
        assert_eq!(elements["Og"][TEMPERATURE_FIELD], json!("N/A"));
        assert_eq!(elements["Og"][PRESSURE_FIELD], json!("N/A"));
        assert_eq!(report.defaulted_count(), 1);
        assert_eq!(report.updated_count(), 5);
    }

    #[test]
    fn element_missing_from_blob() {
        let text = std::fs::read_to_string("tests/fixtures/scientific_data.ts").unwrap();
        let mut elements = parse(&text, &Anchor::Braces).unwrap().elements;
        let mut report = PatchReport::new("critical-point");
        apply(&mut elements, &BTreeMap::new(), &mut report);
        assert_eq!(elements["Fe"][TEMPERATURE_FIELD], json!("N/A"));
        assert_eq!(report.defaulted_count(), 6);
    }
}
