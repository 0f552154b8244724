//! Element lookup table: atomic number, symbol and English name.
//!
//! Reference blobs key rows by full name while the data file keys records by
//! symbol, so every pass that reads a name-keyed blob goes through here.

use std::collections::HashMap;

/// (atomic number, symbol, name) for every element, in Z order.
const ELEMENTS: &[(u32, &str, &str)] = &[
    // --- Period 1 ---
    (1, "H", "Hydrogen"), (2, "He", "Helium"),
    // --- Period 2 ---
    (3, "Li", "Lithium"), (4, "Be", "Beryllium"), (5, "B", "Boron"), (6, "C", "Carbon"),
    (7, "N", "Nitrogen"), (8, "O", "Oxygen"), (9, "F", "Fluorine"), (10, "Ne", "Neon"),
    // --- Period 3 ---
    (11, "Na", "Sodium"), (12, "Mg", "Magnesium"), (13, "Al", "Aluminum"), (14, "Si", "Silicon"),
    (15, "P", "Phosphorus"), (16, "S", "Sulfur"), (17, "Cl", "Chlorine"), (18, "Ar", "Argon"),
    // --- Period 4 ---
    (19, "K", "Potassium"), (20, "Ca", "Calcium"), (21, "Sc", "Scandium"), (22, "Ti", "Titanium"),
    (23, "V", "Vanadium"), (24, "Cr", "Chromium"), (25, "Mn", "Manganese"), (26, "Fe", "Iron"),
    (27, "Co", "Cobalt"), (28, "Ni", "Nickel"), (29, "Cu", "Copper"), (30, "Zn", "Zinc"),
    (31, "Ga", "Gallium"), (32, "Ge", "Germanium"), (33, "As", "Arsenic"), (34, "Se", "Selenium"),
    (35, "Br", "Bromine"), (36, "Kr", "Krypton"),
    // --- Period 5 ---
    (37, "Rb", "Rubidium"), (38, "Sr", "Strontium"), (39, "Y", "Yttrium"), (40, "Zr", "Zirconium"),
    (41, "Nb", "Niobium"), (42, "Mo", "Molybdenum"), (43, "Tc", "Technetium"), (44, "Ru", "Ruthenium"),
    (45, "Rh", "Rhodium"), (46, "Pd", "Palladium"), (47, "Ag", "Silver"), (48, "Cd", "Cadmium"),
    (49, "In", "Indium"), (50, "Sn", "Tin"), (51, "Sb", "Antimony"), (52, "Te", "Tellurium"),
    (53, "I", "Iodine"), (54, "Xe", "Xenon"),
    // --- Period 6 ---
    (55, "Cs", "Cesium"), (56, "Ba", "Barium"), (57, "La", "Lanthanum"), (58, "Ce", "Cerium"),
    (59, "Pr", "Praseodymium"), (60, "Nd", "Neodymium"), (61, "Pm", "Promethium"), (62, "Sm", "Samarium"),
    (63, "Eu", "Europium"), (64, "Gd", "Gadolinium"), (65, "Tb", "Terbium"), (66, "Dy", "Dysprosium"),
    (67, "Ho", "Holmium"), (68, "Er", "Erbium"), (69, "Tm", "Thulium"), (70, "Yb", "Ytterbium"),
    (71, "Lu", "Lutetium"), (72, "Hf", "Hafnium"), (73, "Ta", "Tantalum"), (74, "W", "Tungsten"),
    (75, "Re", "Rhenium"), (76, "Os", "Osmium"), (77, "Ir", "Iridium"), (78, "Pt", "Platinum"),
    (79, "Au", "Gold"), (80, "Hg", "Mercury"), (81, "Tl", "Thallium"), (82, "Pb", "Lead"),
    (83, "Bi", "Bismuth"), (84, "Po", "Polonium"), (85, "At", "Astatine"), (86, "Rn", "Radon"),
    // --- Period 7 ---
    (87, "Fr", "Francium"), (88, "Ra", "Radium"), (89, "Ac", "Actinium"), (90, "Th", "Thorium"),
    (91, "Pa", "Protactinium"), (92, "U", "Uranium"), (93, "Np", "Neptunium"), (94, "Pu", "Plutonium"),
    (95, "Am", "Americium"), (96, "Cm", "Curium"), (97, "Bk", "Berkelium"), (98, "Cf", "Californium"),
    (99, "Es", "Einsteinium"), (100, "Fm", "Fermium"), (101, "Md", "Mendelevium"), (102, "No", "Nobelium"),
    (103, "Lr", "Lawrencium"), (104, "Rf", "Rutherfordium"), (105, "Db", "Dubnium"), (106, "Sg", "Seaborgium"),
    (107, "Bh", "Bohrium"), (108, "Hs", "Hassium"), (109, "Mt", "Meitnerium"), (110, "Ds", "Darmstadtium"),
    (111, "Rg", "Roentgenium"), (112, "Cn", "Copernicium"), (113, "Nh", "Nihonium"), (114, "Fl", "Flerovium"),
    (115, "Mc", "Moscovium"), (116, "Lv", "Livermorium"), (117, "Ts", "Tennessine"), (118, "Og", "Oganesson"),
];

/// British spellings seen in pasted sources.
const ALIASES: &[(&str, &str)] = &[("Aluminium", "Al"), ("Caesium", "Cs"), ("Sulphur", "S")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub number: u32,
    pub symbol: &'static str,
    pub name: &'static str,
}

/// Immutable name/symbol index, built once per run and passed by reference.
#[derive(Debug, Clone)]
pub struct ElementTable {
    by_symbol: HashMap<&'static str, Element>,
    by_name: HashMap<&'static str, &'static str>,
}

impl ElementTable {
    pub fn standard() -> Self {
        let mut by_symbol = HashMap::with_capacity(ELEMENTS.len());
        let mut by_name = HashMap::with_capacity(ELEMENTS.len() + ALIASES.len());
        for &(number, symbol, name) in ELEMENTS {
            by_symbol.insert(symbol, Element { number, symbol, name });
            by_name.insert(name, symbol);
        }
        for &(alias, symbol) in ALIASES {
            by_name.insert(alias, symbol);
        }
        ElementTable { by_symbol, by_name }
    }

    pub fn symbol_for(&self, name: &str) -> Option<&'static str> {
        self.by_name.get(name.trim()).copied()
    }

    pub fn get(&self, symbol: &str) -> Option<Element> {
        self.by_symbol.get(symbol).copied()
    }

    pub fn name_for(&self, symbol: &str) -> Option<&'static str> {
        self.get(symbol).map(|e| e.name)
    }

    pub fn atomic_number(&self, symbol: &str) -> Option<u32> {
        self.get(symbol).map(|e| e.number)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_symbol.len()
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_all_elements() {
        let table = ElementTable::standard();
        assert_eq!(table.len(), 118);
        assert_eq!(table.atomic_number("Og"), Some(118));
        assert_eq!(table.atomic_number("Fe"), Some(26));
    }

    #[test]
    fn resolves_names_and_aliases() {
        let table = ElementTable::standard();
        assert_eq!(table.symbol_for("Iron"), Some("Fe"));
        assert_eq!(table.symbol_for("Aluminium"), Some("Al"));
        assert_eq!(table.symbol_for("Aluminum"), Some("Al"));
        assert_eq!(table.symbol_for("Caesium"), Some("Cs"));
        assert_eq!(table.symbol_for("Unobtainium"), None);
        assert_eq!(table.name_for("Hg"), Some("Mercury"));
    }

    #[test]
    fn symbols_are_case_sensitive() {
        let table = ElementTable::standard();
        assert!(table.get("Co").is_some());
        assert!(table.get("CO").is_none());
    }
}
