//! Splits a scalar specific heat into per-phase values.
//!
//! The scalar is taken as a measurement in the element's standard state at
//! room temperature. The other two phases are derived and carry the
//! estimate marker.

use serde_json::{json, Value};
use tracing::warn;

use crate::document::ElementMap;
use crate::report::PatchReport;
use crate::units::molar_heat_to_specific;
use crate::value::{format_estimate, numeric_prefix};

pub const FIELD: &str = "specificHeat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
}

/// Empirical constants for the derivation.
#[derive(Debug, Clone)]
pub struct HeatModel {
    pub room_temp_k: f64,
    /// Dulong-Petit molar heat capacity of solids, J/(mol·K).
    pub solid_molar: f64,
    /// Liquid over solid ratio.
    pub liquid_factor: f64,
    pub gas_diatomic_molar: f64,
    pub gas_monatomic_molar: f64,
    pub diatomic: Vec<String>,
    pub places: usize,
}

impl Default for HeatModel {
    fn default() -> Self {
        HeatModel {
            room_temp_k: 298.15,
            solid_molar: 24.94,
            liquid_factor: 1.15,
            gas_diatomic_molar: 29.1,
            gas_monatomic_molar: 20.78,
            diatomic: ["H", "N", "O", "F", "Cl", "Br", "I"]
                .into_iter()
                .map(String::from)
                .collect(),
            places: 2,
        }
    }
}

impl HeatModel {
    /// Phase at room temperature. Without both transition points the
    /// element is taken as solid.
    pub fn standard_phase(&self, melting_k: f64, boiling_k: f64) -> Phase {
        if melting_k <= 0.0 || boiling_k <= 0.0 {
            return Phase::Solid;
        }
        if self.room_temp_k < melting_k {
            Phase::Solid
        } else if self.room_temp_k < boiling_k {
            Phase::Liquid
        } else {
            Phase::Gas
        }
    }

    /// `(solid, liquid, gas)` as formatted strings.
    pub fn derive(&self, symbol: &str, measured: f64, mass: f64, phase: Phase) -> [String; 3] {
        let est_solid = molar_heat_to_specific(self.solid_molar, mass);
        let est_liquid = est_solid * self.liquid_factor;
        let gas_molar = if self.diatomic.iter().any(|d| d == symbol) {
            self.gas_diatomic_molar
        } else {
            self.gas_monatomic_molar
        };
        let est_gas = molar_heat_to_specific(gas_molar, mass);
        let fmt = |v: f64, estimated: bool| format_estimate(v, self.places, estimated);

        if measured <= 0.0 {
            return [fmt(est_solid, true), fmt(est_liquid, true), fmt(est_gas, true)];
        }
        match phase {
            Phase::Solid => [
                fmt(measured, false),
                fmt(measured * self.liquid_factor, true),
                fmt(est_gas, true),
            ],
            Phase::Liquid => [
                fmt(measured / self.liquid_factor, true),
                fmt(measured, false),
                fmt(est_gas, true),
            ],
            // a gas-phase measurement says nothing useful about the condensed phases
            Phase::Gas => [fmt(est_solid, true), fmt(est_liquid, true), fmt(measured, false)],
        }
    }
}

fn transition(record: &Value, key: &str) -> f64 {
    record
        .get("phaseTemperatures")
        .and_then(|p| p.get(key))
        .and_then(numeric_prefix)
        .unwrap_or(0.0)
}

pub fn apply(elements: &mut ElementMap, model: &HeatModel, report: &mut PatchReport) {
    for (symbol, record) in elements.iter_mut() {
        let current = match record.get(FIELD) {
            Some(Value::Object(_)) => {
                warn!(symbol = %symbol, "specific heat already split by phase, skipping");
                report.skipped(symbol, "already split by phase");
                continue;
            }
            Some(v) => numeric_prefix(v).unwrap_or(0.0),
            None => 0.0,
        };
        let Some(mass) = record.get("mass").and_then(numeric_prefix).filter(|m| *m > 0.0) else {
            report.skipped(symbol, "no molar mass");
            continue;
        };
        let phase = model.standard_phase(transition(record, "meltingK"), transition(record, "boilingK"));
        let [solid, liquid, gas] = model.derive(symbol, current, mass, phase);

        let Some(props) = record.as_object_mut() else {
            report.skipped(symbol, "record is not an object");
            continue;
        };
        props.insert(
            FIELD.to_string(),
            json!({ "solid": solid, "liquid": liquid, "gas": gas }),
        );
        if current > 0.0 {
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

    fn patched() -> (ElementMap, PatchReport) {
        let text = std::fs::read_to_string("tests/fixtures/scientific_data.ts").unwrap();
        let mut elements = parse(&text, &Anchor::Braces).unwrap().elements;
        let mut report = PatchReport::new("specific-heat");
        apply(&mut elements, &HeatModel::default(), &mut report);
        (elements, report)
    }

    #[test]
    fn standard_phases() {
        let model = HeatModel::default();
        assert_eq!(model.standard_phase(1811.0, 3134.0), Phase::Solid);
        assert_eq!(model.standard_phase(234.32, 629.88), Phase::Liquid);
        assert_eq!(model.standard_phase(63.15, 77.36), Phase::Gas);
        assert_eq!(model.standard_phase(0.0, 0.0), Phase::Solid);
    }

    #[test]
    fn solid_measurement() {
        let (elements, _) = patched();
        assert_eq!(
            elements["Fe"][FIELD],
            json!({"solid": "449", "liquid": "516.35*", "gas": "372.1*"})
        );
    }

    #[test]
    fn liquid_measurement() {
        let (elements, _) = patched();
        assert_eq!(
            elements["Hg"][FIELD],
            json!({"solid": "121.74*", "liquid": "140", "gas": "103.59*"})
        );
    }

    #[test]
    fn diatomic_gas_measurement() {
        let (elements, _) = patched();
        assert_eq!(
            elements["N"][FIELD],
            json!({"solid": "1780.54*", "liquid": "2047.62*", "gas": "1040"})
        );
    }

    #[test]
    fn no_measurement_is_all_estimated() {
        let (elements, report) = patched();
        assert_eq!(
            elements["Og"][FIELD],
            json!({"solid": "84.83*", "liquid": "97.55*", "gas": "70.68*"})
        );
        assert_eq!(report.defaulted_count(), 1);
        assert_eq!(report.updated_count(), 5);
    }

    #[test]
    fn second_run_skips_split_records() {
        let (mut elements, _) = patched();
        let before = elements.clone();
        let mut report = PatchReport::new("specific-heat");
        apply(&mut elements, &HeatModel::default(), &mut report);
        assert_eq!(elements, before);
        assert_eq!(report.skipped_count(), 6);
    }
}
