//! Thermal conductivity table pasted as one run-on line:
//! `0.0000364 W/cmKRadonRn860.0000569 W/cmKXenonXe54...`

use std::sync::LazyLock;

use regex::Regex;

use super::{resolve, scan, KeyStyle, Layout, ReferenceMap};
use crate::elements::ElementTable;
use crate::units::w_per_cm_k_to_w_per_m_k;

pub const BUNDLED: &str = include_str!("../../data/thermal_conductivity.txt");

static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<value>[\d.]+)\s(?P<unit>W/cmK)(?P<key>[A-Za-z]+)").unwrap());

pub fn layout() -> Layout {
    Layout {
        regex: &ROW_RE,
        key_style: KeyStyle::NameSymbol,
        not_available: None,
        trailing_number: true,
    }
}

/// Symbol -> conductivity in W/(m·K).
pub fn extract(text: &str, table: &ElementTable) -> ReferenceMap {
    let layout = layout();
    let entries = scan(text, &layout, table);
    resolve(&entries, layout.key_style, table, w_per_cm_k_to_w_per_m_k)
}
