//! Merge passes: each one folds reference data (or a derivation rule) into
//! every element record and records what it did in a `PatchReport`.

pub mod conductivity;
pub mod critical;
pub mod latent;
pub mod prune;
pub mod references;
pub mod specific_heat;

use serde_json::{json, Value};

use crate::value::NOT_AVAILABLE;

/// What an element with no reference data gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MissingPolicy {
    /// Numeric zero.
    Zero,
    /// The "N/A" sentinel.
    #[value(name = "na")]
    NotAvailable,
    /// Leave the current value alone.
    Keep,
}

impl MissingPolicy {
    pub fn sentinel(self) -> Option<Value> {
        match self {
            MissingPolicy::Zero => Some(json!(0)),
            MissingPolicy::NotAvailable => Some(Value::String(NOT_AVAILABLE.to_string())),
            MissingPolicy::Keep => None,
        }
    }
}

/// `latentHeat.fusion` -> `/latentHeat/fusion`.
pub fn pointer(path: &str) -> String {
    format!("/{}", path.replace('.', "/"))
}
