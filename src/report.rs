use itertools::Itertools;
use tracing::info;

/// Per-run counts of what a pass did to each element record.
#[derive(Debug, Clone, Default)]
pub struct PatchReport {
    pass_name: String,
    updated: Vec<String>,
    defaulted: Vec<String>,
    skipped: Vec<(String, String)>,
}

impl PatchReport {
    pub fn new(pass_name: &str) -> Self {
        PatchReport {
            pass_name: pass_name.to_string(),
            ..Default::default()
        }
    }

    /// Field set from reference data.
    pub fn updated(&mut self, symbol: &str) {
        self.updated.push(symbol.to_string());
    }

    /// Field set to its sentinel because no reference data exists.
    pub fn defaulted(&mut self, symbol: &str) {
        self.defaulted.push(symbol.to_string());
    }

    /// Record left alone.
    pub fn skipped(&mut self, symbol: &str, reason: &str) {
        self.skipped.push((symbol.to_string(), reason.to_string()));
    }

    pub fn pass_name(&self) -> &str {
        &self.pass_name
    }

    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }

    pub fn defaulted_count(&self) -> usize {
        self.defaulted.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Skipped symbols grouped by reason, reasons in sorted order.
    pub fn skipped_by_reason(&self) -> Vec<(String, Vec<String>)> {
        let by_reason = self
            .skipped
            .iter()
            .sorted_by(|a, b| a.1.cmp(&b.1))
            .group_by(|(_, reason)| reason.clone());
        by_reason
            .into_iter()
            .map(|(reason, group)| (reason, group.map(|(symbol, _)| symbol.clone()).collect()))
            .collect()
    }

    pub fn print(&self) {
        info!(
            pass = %self.pass_name,
            updated = self.updated_count(),
            defaulted = self.defaulted_count(),
            skipped = self.skipped_count(),
            "pass finished"
        );
        println!("{}", "-".repeat(40));
        println!("Pass: {}", self.pass_name);
        println!("  updated:   {}", self.updated_count());
        if self.defaulted.is_empty() {
            println!("  defaulted: 0");
        } else {
            println!("  defaulted: {} ({})", self.defaulted_count(), self.defaulted.iter().join(", "));
        }
        println!("  skipped:   {}", self.skipped_count());
        for (reason, symbols) in self.skipped_by_reason() {
            println!("    {}: {}", reason, symbols.join(", "));
        }
        println!("{}", "-".repeat(40));
    }
}
