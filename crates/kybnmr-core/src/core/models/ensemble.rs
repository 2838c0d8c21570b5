use super::structure::Structure;

/// An ordered collection of conformers, in the order an upstream sampler produced them.
///
/// The ensemble is not required to be sorted by energy. The deduplication workflow
/// consumes an ensemble and returns a new one holding only the representatives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ensemble {
    structures: Vec<Structure>,
}

impl Ensemble {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_structures(structures: Vec<Structure>) -> Self {
        Self { structures }
    }

    pub fn push(&mut self, structure: Structure) {
        self.structures.push(structure);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Structure> {
        self.structures.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Structure> {
        self.structures.iter()
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn into_structures(self) -> Vec<Structure> {
        self.structures
    }

    /// Atom count of the first structure, which every other structure must share.
    pub fn atom_count(&self) -> Option<usize> {
        self.structures.first().map(Structure::atom_count)
    }

    /// Energies of all structures, in ensemble order.
    pub fn energies(&self) -> Vec<f64> {
        self.structures.iter().map(|s| s.energy).collect()
    }
}

impl FromIterator<Structure> for Ensemble {
    fn from_iter<I: IntoIterator<Item = Structure>>(iter: I) -> Self {
        Self {
            structures: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Ensemble {
    type Item = Structure;
    type IntoIter = std::vec::IntoIter<Structure>;

    fn into_iter(self) -> Self::IntoIter {
        self.structures.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ensemble {
    type Item = &'a Structure;
    type IntoIter = std::slice::Iter<'a, Structure>;

    fn into_iter(self) -> Self::IntoIter {
        self.structures.iter()
    }
}

impl Extend<Structure> for Ensemble {
    fn extend<I: IntoIterator<Item = Structure>>(&mut self, iter: I) {
        self.structures.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    fn diatomic(energy: f64) -> Structure {
        Structure::new(
            vec![
                Atom::new("H", Point3::new(0.0, 0.0, 0.0)),
                Atom::new("H", Point3::new(0.74, 0.0, 0.0)),
            ],
            energy,
        )
    }

    #[test]
    fn new_ensemble_is_empty() {
        let ensemble = Ensemble::new();
        assert!(ensemble.is_empty());
        assert_eq!(ensemble.len(), 0);
        assert_eq!(ensemble.atom_count(), None);
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut ensemble = Ensemble::new();
        ensemble.push(diatomic(-1.0));
        ensemble.push(diatomic(-3.0));
        ensemble.push(diatomic(-2.0));
        assert_eq!(ensemble.energies(), vec![-1.0, -3.0, -2.0]);
        assert_eq!(ensemble.atom_count(), Some(2));
    }

    #[test]
    fn collects_from_iterator_and_round_trips_into_structures() {
        let ensemble: Ensemble = (0..3).map(|i| diatomic(-(i as f64))).collect();
        assert_eq!(ensemble.len(), 3);
        let structures = ensemble.into_structures();
        assert_eq!(structures[2].energy, -2.0);
    }

    #[test]
    fn extend_appends_structures() {
        let mut ensemble = Ensemble::from_structures(vec![diatomic(-1.0)]);
        ensemble.extend(vec![diatomic(-2.0), diatomic(-3.0)]);
        assert_eq!(ensemble.len(), 3);
        assert_eq!(ensemble.get(1).map(|s| s.energy), Some(-2.0));
    }
}
