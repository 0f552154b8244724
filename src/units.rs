/// 1 W/(cm·K) = 100 W/(m·K).
pub fn w_per_cm_k_to_w_per_m_k(value: f64) -> f64 {
    value * 100.0
}

/// J/mol over a molar mass in g/mol, to J/kg.
pub fn j_per_mol_to_j_per_kg(value: f64, molar_mass: f64) -> f64 {
    value * 1000.0 / molar_mass
}

/// kJ/mol over a molar mass in g/mol, to J/kg.
pub fn kj_per_mol_to_j_per_kg(value: f64, molar_mass: f64) -> f64 {
    j_per_mol_to_j_per_kg(value * 1000.0, molar_mass)
}

/// Molar heat capacity (J/mol·K) to specific heat (J/kg·K).
pub fn molar_heat_to_specific(molar: f64, molar_mass: f64) -> f64 {
    j_per_mol_to_j_per_kg(molar, molar_mass)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centi_unit_scales_by_hundred() {
        assert_eq!(w_per_cm_k_to_w_per_m_k(1.0), 100.0);
        assert_eq!(w_per_cm_k_to_w_per_m_k(0.0), 0.0);
    }

    #[test]
    fn molar_to_mass_specific() {
        assert_eq!(j_per_mol_to_j_per_kg(1000.0, 10.0), 100_000.0);
        assert_eq!(kj_per_mol_to_j_per_kg(1.0, 10.0), 100_000.0);
    }

    #[test]
    fn dulong_petit_for_iron() {
        let c = molar_heat_to_specific(24.94, 55.845);
        assert!((c - 446.59).abs() < 0.01);
    }
}
