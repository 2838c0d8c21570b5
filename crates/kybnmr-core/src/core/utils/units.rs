/// Hartree to kcal/mol conversion factor (CODATA).
pub const HARTREE_TO_KCAL_MOL: f64 = 627.5094;

#[inline]
pub fn hartree_to_kcal_mol(hartree: f64) -> f64 {
    hartree * HARTREE_TO_KCAL_MOL
}

/// Absolute energy gap between two Hartree energies, expressed in kcal/mol.
#[inline]
pub fn energy_gap_kcal_mol(a_hartree: f64, b_hartree: f64) -> f64 {
    hartree_to_kcal_mol((a_hartree - b_hartree).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hartree_converts_to_conversion_factor() {
        assert_eq!(hartree_to_kcal_mol(1.0), 627.5094);
    }

    #[test]
    fn energy_gap_is_symmetric_and_non_negative() {
        let gap = energy_gap_kcal_mol(-44.7747, -44.7);
        assert!((gap - 0.0747 * 627.5094).abs() < 1e-9);
        assert_eq!(gap, energy_gap_kcal_mol(-44.7, -44.7747));
    }
}
