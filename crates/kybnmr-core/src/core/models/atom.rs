use super::element;
use nalgebra::Point3;

/// Represents a single atom of a conformer with its element and Cartesian position.
///
/// Atoms are immutable once parsed. The element symbol is kept exactly as it appeared
/// in the source file; it is only looked up in the periodic table on demand, so an
/// unusual symbol never prevents a structure from being read or compared.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol (e.g., "C", "H", "Cl").
    pub symbol: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from an element symbol and a position.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol of the atom.
    /// * `position` - The 3D coordinates of the atom in Angstroms.
    pub fn new(symbol: &str, position: Point3<f64>) -> Self {
        Self {
            symbol: symbol.to_string(),
            position,
        }
    }

    /// Returns the atomic number of this atom's element, if the symbol is known.
    pub fn atomic_number(&self) -> Option<u8> {
        element::atomic_number(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stores_symbol_and_position() {
        let atom = Atom::new("C", Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.symbol, "C");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn atomic_number_resolves_known_symbols() {
        assert_eq!(Atom::new("H", Point3::origin()).atomic_number(), Some(1));
        assert_eq!(Atom::new("Cl", Point3::origin()).atomic_number(), Some(17));
    }

    #[test]
    fn atomic_number_is_none_for_unknown_symbols() {
        assert_eq!(Atom::new("Xx", Point3::origin()).atomic_number(), None);
    }
}
