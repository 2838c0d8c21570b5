use super::atom::Atom;
use nalgebra::Point3;

/// A single candidate conformer: an ordered list of atoms plus its energy.
///
/// Atom order is significant. Two structures are compared atom index by atom index,
/// so every structure in one ensemble must describe the same molecule with the same
/// atom ordering. The energy is stored in Hartree.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// The atoms of the conformer, in file order.
    pub atoms: Vec<Atom>,
    /// The energy of the conformer in Hartree.
    pub energy: f64,
}

impl Structure {
    pub fn new(atoms: Vec<Atom>, energy: f64) -> Self {
        Self { atoms, energy }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Iterates over the atomic positions in atom order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = &Point3<f64>> + '_ {
        self.atoms.iter().map(|atom| &atom.position)
    }
}
