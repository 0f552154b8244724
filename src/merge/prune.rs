use tracing::info;

use crate::document::ElementMap;
use crate::report::PatchReport;

#[derive(Debug, Clone)]
pub struct PruneOptions {
    /// Sub-object of each record the keys are removed from.
    pub parent: String,
    pub keys: Vec<String>,
}

impl Default for PruneOptions {
    fn default() -> Self {
        PruneOptions {
            parent: "phaseTemperatures".to_string(),
            keys: vec!["criticalTemperature".to_string(), "criticalPressure".to_string()],
        }
    }
}

/// Drop `keys` from `record[parent]`. Element records themselves are never removed.
pub fn apply(elements: &mut ElementMap, opts: &PruneOptions, report: &mut PatchReport) {
    for (symbol, record) in elements.iter_mut() {
        let Some(parent) = record.get_mut(opts.parent.as_str()).and_then(|p| p.as_object_mut()) else {
            report.skipped(symbol, "no such sub-object");
            continue;
        };
        let mut removed = 0;
        for key in &opts.keys {
            // shift_remove keeps the order of the remaining keys
            if parent.shift_remove(key.as_str()).is_some() {
                info!(symbol = %symbol, parent = %opts.parent, key = %key, "removed");
                removed += 1;
            }
        }
        if removed > 0 {
            report.updated(symbol);
        } else {
            report.skipped(symbol, "nothing to remove");
        }
    }
}
