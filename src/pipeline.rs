//! One patch run: load, apply a single pass, verify, write.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use itertools::Itertools;
use tracing::{debug, info};

use crate::document::{self, Anchor, ElementMap};
use crate::error::PatchError;
use crate::report::PatchReport;
use crate::writer;

/// The file a run patches and how.
#[derive(Debug, Clone)]
pub struct Target {
    pub path: PathBuf,
    pub anchor: Anchor,
    /// Run everything except the final write.
    pub dry_run: bool,
}

pub fn run<F>(target: &Target, pass_name: &str, pass: F) -> Result<PatchReport, PatchError>
where
    F: FnOnce(&mut ElementMap, &mut PatchReport),
{
    let start = Instant::now();
    let mut doc = document::load(&target.path, &target.anchor)?;
    info!(path = ?target.path, elements = doc.elements.len(), "loaded");

    let before: BTreeSet<String> = doc.symbols().into_iter().collect();
    let mut report = PatchReport::new(pass_name);
    pass(&mut doc.elements, &mut report);

    let missing = before.iter().filter(|s| !doc.elements.contains_key(s.as_str())).join(", ");
    if !missing.is_empty() {
        return Err(PatchError::KeysLost {
            pass: pass_name.to_string(),
            missing,
        });
    }

    if target.dry_run {
        info!(path = ?target.path, "dry run, nothing written");
    } else {
        let bytes = writer::write(&doc, &target.path)?;
        debug!(bytes, "written");
    }
    info!(pass = pass_name, elapsed_ms = start.elapsed().as_millis() as u64, "done");
    Ok(report)
}

// ── Tests ──
