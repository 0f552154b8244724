//! Heat of fusion / vaporization pasted as name-keyed columns:
//! `Helium 0.083 kJ/mol Lead 178 kJ/mol Boron 507 kJ/mol`.
//!
//! Values stay in kJ/mol here; conversion to J/kg needs the molar mass held
//! by the data file and happens at merge time.

use std::sync::LazyLock;

use regex::Regex;

use super::{resolve, scan, KeyStyle, Layout, ReferenceMap};
use crate::elements::ElementTable;

pub const BUNDLED_FUSION: &str = include_str!("../../data/fusion.txt");
pub const BUNDLED_VAPORIZATION: &str = include_str!("../../data/vaporization.txt");

static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<key>[A-Z][a-z]+)\s+(?P<value>[\d.]+|N/A)(?:\s+(?P<unit>kJ/mol))?").unwrap()
});

pub fn layout() -> Layout {
    Layout {
        regex: &PAIR_RE,
        key_style: KeyStyle::Name,
        not_available: Some("N/A"),
        trailing_number: false,
    }
}

/// Symbol -> kJ/mol.
pub fn extract(text: &str, table: &ElementTable) -> ReferenceMap {
    let layout = layout();
    let entries = scan(text, &layout, table);
    resolve(&entries, layout.key_style, table, |v| v)
}
