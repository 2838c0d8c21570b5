use super::cache::FingerprintEntry;
use super::config::SimilarityThresholds;
use super::error::EngineError;
use crate::core::models::structure::Structure;
use crate::core::utils::units::energy_gap_kcal_mol;

/// Decides whether two structures are duplicates of each other.
///
/// A pair is similar when its energy gap is within the energy threshold *and* the
/// largest fingerprint deviation is within the distance threshold. The energy test
/// runs first and skips the geometry comparison when it already fails.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityOracle {
    thresholds: SimilarityThresholds,
}

impl SimilarityOracle {
    pub fn new(thresholds: SimilarityThresholds) -> Self {
        Self { thresholds }
    }

    /// Energy half of the test: true when the gap is at most the energy threshold.
    #[inline]
    pub fn within_energy_threshold(&self, a_hartree: f64, b_hartree: f64) -> bool {
        energy_gap_kcal_mol(a_hartree, b_hartree) <= self.thresholds.energy_kcal_mol
    }

    /// Compares a candidate against a representative.
    ///
    /// Returns `Some(max_deviation)` when the pair is similar, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::StructureMismatch` (reporting the candidate's index) when the
    /// energies are close enough to require a geometry comparison but the atom counts differ.
    pub fn assess(
        &self,
        candidate: &FingerprintEntry,
        representative: &FingerprintEntry,
    ) -> Result<Option<f64>, EngineError> {
        if !self.within_energy_threshold(candidate.energy, representative.energy) {
            return Ok(None);
        }

        let mismatch = || EngineError::StructureMismatch {
            index: candidate.index,
            expected: representative.atom_count,
            found: candidate.atom_count,
        };
        if candidate.atom_count != representative.atom_count {
            return Err(mismatch());
        }
        let deviation = candidate
            .fingerprint
            .max_deviation(&representative.fingerprint)
            .ok_or_else(mismatch)?;

        Ok((deviation <= self.thresholds.distance_angstrom).then_some(deviation))
    }
}

/// Standalone similarity test between two structures.
///
/// Fingerprints are only computed for pairs that pass the energy test. A mismatch
/// error reports `b` as index 1 and `a`'s atom count as the expected one.
///
/// # Errors
///
/// Returns `EngineError::StructureMismatch` when a geometry comparison is needed and the
/// structures have different atom counts.
pub fn is_similar(
    a: &Structure,
    b: &Structure,
    energy_threshold_kcal_mol: f64,
    distance_threshold_angstrom: f64,
) -> Result<bool, EngineError> {
    let oracle = SimilarityOracle::new(SimilarityThresholds {
        energy_kcal_mol: energy_threshold_kcal_mol,
        distance_angstrom: distance_threshold_angstrom,
    });
    similar_with(&oracle, a, b, FingerprintEntry::from_structure)
}

fn similar_with(
    oracle: &SimilarityOracle,
    a: &Structure,
    b: &Structure,
    fingerprint: impl Fn(usize, &Structure) -> FingerprintEntry,
) -> Result<bool, EngineError> {
    if !oracle.within_energy_threshold(a.energy, b.energy) {
        return Ok(false);
    }
    let entry_a = fingerprint(0, a);
    let entry_b = fingerprint(1, b);
    Ok(oracle.assess(&entry_b, &entry_a)?.is_some())
}
