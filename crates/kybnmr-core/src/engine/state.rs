use super::cache::FingerprintCache;
use super::error::EngineError;

/// What happened to a candidate after it was compared against the representative set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No representative matched; the candidate became a new representative.
    Added,
    /// The candidate matched a representative with a higher energy and replaced it.
    Replaced { slot: usize, previous: usize },
    /// The candidate matched a representative with an equal or lower energy and was dropped.
    Discarded { slot: usize },
}

/// The growing set of representatives during a Double Check scan.
///
/// Slots hold ensemble indices, kept in discovery order. Replacing a representative
/// overwrites its slot, so the slot keeps its position in the scan order.
#[derive(Debug, Clone, Default)]
pub struct RepresentativeSet {
    slots: Vec<usize>,
    replaced: usize,
    discarded: usize,
}

impl RepresentativeSet {
    pub fn seeded(first: usize) -> Self {
        Self {
            slots: vec![first],
            ..Default::default()
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ensemble indices of the current representatives, in scan order.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn replaced(&self) -> usize {
        self.replaced
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Merges `candidate` into `slot` if `slot` is `Some`, otherwise appends it.
    ///
    /// A matched candidate replaces the representative only when its energy is strictly lower.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Internal` if an index is outside the cache or the slot is out of range.
    pub fn absorb(
        &mut self,
        candidate: usize,
        slot: Option<usize>,
        cache: &FingerprintCache,
    ) -> Result<MergeOutcome, EngineError> {
        let Some(slot) = slot else {
            self.slots.push(candidate);
            return Ok(MergeOutcome::Added);
        };

        let current = *self
            .slots
            .get(slot)
            .ok_or_else(|| {
                EngineError::Internal(format!("Representative slot {slot} out of range"))
            })?;
        let candidate_energy = energy(cache, candidate)?;
        let current_energy = energy(cache, current)?;

        if candidate_energy < current_energy {
            self.slots[slot] = candidate;
            self.replaced += 1;
            Ok(MergeOutcome::Replaced {
                slot,
                previous: current,
            })
        } else {
            self.discarded += 1;
            Ok(MergeOutcome::Discarded { slot })
        }
    }

    /// Finishes the scan: representatives stable-sorted by ascending energy.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Internal` if a slot refers to an index outside the cache.
    pub fn finalize(self, cache: &FingerprintCache) -> Result<Vec<usize>, EngineError> {
        let mut keyed = self
            .slots
            .into_iter()
            .map(|index| energy(cache, index).map(|e| (e, index)))
            .collect::<Result<Vec<_>, _>>()?;
        keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        Ok(keyed.into_iter().map(|(_, index)| index).collect())
    }
}

fn energy(cache: &FingerprintCache, index: usize) -> Result<f64, EngineError> {
    cache.energy_of(index).ok_or_else(|| {
        EngineError::Internal(format!(
            "Ensemble index {index} missing from fingerprint cache"
        ))
    })
}
