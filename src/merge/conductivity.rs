use serde_json::{json, Value};

use super::MissingPolicy;
use crate::document::ElementMap;
use crate::extract::ReferenceMap;
use crate::report::PatchReport;
use crate::value::{annotate, format_decimal, round_to};

pub const FIELD: &str = "thermalConductivity";

#[derive(Debug, Clone)]
pub struct ConductivityOptions {
    /// Source tag; when set the value is written as an annotated string.
    pub tag: Option<String>,
    pub missing: MissingPolicy,
    pub places: usize,
}

impl Default for ConductivityOptions {
    fn default() -> Self {
        ConductivityOptions {
            tag: None,
            missing: MissingPolicy::Zero,
            places: 5,
        }
    }
}

pub fn apply(elements: &mut ElementMap, refs: &ReferenceMap, opts: &ConductivityOptions, report: &mut PatchReport) {
    for (symbol, record) in elements.iter_mut() {
        let Some(props) = record.as_object_mut() else {
            report.skipped(symbol, "record is not an object");
            continue;
        };
        match refs.get(symbol) {
            Some(&v) => {
                let value = match &opts.tag {
                    Some(tag) => Value::String(annotate(&format_decimal(v, opts.places), tag)),
                    None => json!(round_to(v, opts.places)),
                };
                props.insert(FIELD.to_string(), value);
                report.updated(symbol);
            }
            None => match opts.missing.sentinel() {
                Some(sentinel) => {
                    props.insert(FIELD.to_string(), sentinel);
                    report.defaulted(symbol);
                }
                None => report.skipped(symbol, "no reference data"),
            },
        }
    }
}
