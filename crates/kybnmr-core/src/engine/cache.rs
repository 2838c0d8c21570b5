use crate::core::models::structure::Structure;
use crate::core::utils::geometry::Fingerprint;

/// A structure's comparison data: its position in the input ensemble, energy and fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct FingerprintEntry {
    pub index: usize,
    pub energy: f64,
    pub atom_count: usize,
    pub fingerprint: Fingerprint,
}

impl FingerprintEntry {
    pub fn from_structure(index: usize, structure: &Structure) -> Self {
        Self {
            index,
            energy: structure.energy,
            atom_count: structure.atom_count(),
            fingerprint: Fingerprint::compute(structure),
        }
    }
}

/// Fingerprints for every structure of one ensemble, indexed by ensemble position.
///
/// Filled once before the merge scan. Replacing a representative only swaps which
/// entry the representative slot points at, so no fingerprint is ever recomputed.
#[derive(Debug, Default, Clone)]
pub struct FingerprintCache {
    entries: Vec<FingerprintEntry>,
}

impl FingerprintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cache from entries that must be ordered by ensemble index.
    pub fn from_entries(entries: Vec<FingerprintEntry>) -> Self {
        debug_assert!(entries.iter().enumerate().all(|(i, e)| e.index == i));
        Self { entries }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&FingerprintEntry> {
        self.entries.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn energy_of(&self, index: usize) -> Option<f64> {
        self.get(index).map(|e| e.energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    fn diatomic(bond: f64, energy: f64) -> Structure {
        Structure::new(
            vec![
                Atom::new("H", Point3::origin()),
                Atom::new("H", Point3::new(bond, 0.0, 0.0)),
            ],
            energy,
        )
    }

    #[test]
    fn entry_captures_index_energy_and_fingerprint() {
        let entry = FingerprintEntry::from_structure(4, &diatomic(0.74, -1.17));
        assert_eq!(entry.index, 4);
        assert_eq!(entry.energy, -1.17);
        assert_eq!(entry.atom_count, 2);
        assert_eq!(entry.fingerprint.as_slice(), &[0.74]);
    }

    #[test]
    fn cache_lookups_are_by_ensemble_index() {
        let cache = FingerprintCache::from_entries(vec![
            FingerprintEntry::from_structure(0, &diatomic(0.74, -1.0)),
            FingerprintEntry::from_structure(1, &diatomic(0.80, -2.0)),
        ]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.energy_of(1), Some(-2.0));
        assert_eq!(cache.energy_of(2), None);
        assert!(!cache.is_empty());
        assert!(FingerprintCache::new().is_empty());
    }
}
