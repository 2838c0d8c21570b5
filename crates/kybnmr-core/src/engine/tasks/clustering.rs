use crate::engine::cache::{FingerprintCache, FingerprintEntry};
use crate::engine::config::MatchPolicy;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::similarity::SimilarityOracle;
use crate::engine::state::{MergeOutcome, RepresentativeSet};
use tracing::{debug, info, instrument, trace};

/// Outcome of a merge scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringResult {
    /// Ensemble indices of the representatives, sorted by ascending energy.
    pub representatives: Vec<usize>,
    pub replaced: usize,
    pub discarded: usize,
}

/// Scans the cached ensemble in input order and collapses duplicates.
///
/// The first structure seeds the representative set. Every later structure is compared
/// against the current representatives; under `FirstMatch` the earliest similar slot wins,
/// under `ClosestMatch` the slot with the smallest fingerprint deviation wins (ties go to
/// the earliest slot).
///
/// # Errors
///
/// Returns `EngineError::EmptyEnsemble` for an empty cache, and propagates
/// `EngineError::StructureMismatch` from the similarity test.
#[instrument(skip_all, name = "clustering_task")]
pub fn run(
    cache: &FingerprintCache,
    oracle: &SimilarityOracle,
    policy: MatchPolicy,
    reporter: &ProgressReporter,
) -> Result<ClusteringResult, EngineError> {
    if cache.is_empty() {
        return Err(EngineError::EmptyEnsemble);
    }

    reporter.report(Progress::TaskStart {
        total_steps: cache.len() as u64,
    });
    let mut set = RepresentativeSet::seeded(0);
    reporter.report(Progress::TaskIncrement);
    reporter.report(Progress::Representatives { count: set.len() });

    for candidate in 1..cache.len() {
        let slot = find_match(cache, oracle, policy, &set, candidate)?;
        let outcome = set.absorb(candidate, slot, cache)?;
        match outcome {
            MergeOutcome::Added => {
                trace!(candidate, "New representative.");
                reporter.report(Progress::Representatives { count: set.len() });
            }
            MergeOutcome::Replaced { slot, previous } => {
                trace!(candidate, slot, previous, "Replaced higher-energy representative.");
            }
            MergeOutcome::Discarded { slot } => {
                trace!(candidate, slot, "Discarded duplicate.");
            }
        }
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);

    let replaced = set.replaced();
    let discarded = set.discarded();
    let representatives = set.finalize(cache)?;
    info!(
        input = cache.len(),
        representatives = representatives.len(),
        replaced,
        discarded,
        "Merge scan complete."
    );

    Ok(ClusteringResult {
        representatives,
        replaced,
        discarded,
    })
}

fn find_match(
    cache: &FingerprintCache,
    oracle: &SimilarityOracle,
    policy: MatchPolicy,
    set: &RepresentativeSet,
    candidate: usize,
) -> Result<Option<usize>, EngineError> {
    let entry = lookup(cache, candidate)?;
    let mut best: Option<(usize, f64)> = None;

    for (slot, &rep_index) in set.slots().iter().enumerate() {
        let representative = lookup(cache, rep_index)?;
        let Some(deviation) = oracle.assess(entry, representative)? else {
            continue;
        };
        match policy {
            MatchPolicy::FirstMatch => return Ok(Some(slot)),
            MatchPolicy::ClosestMatch => {
                if best.is_none_or(|(_, d)| deviation < d) {
                    best = Some((slot, deviation));
                }
            }
        }
    }

    if let Some((slot, deviation)) = best {
        debug!(candidate, slot, deviation, "Closest similar representative.");
    }
    Ok(best.map(|(slot, _)| slot))
}

fn lookup(cache: &FingerprintCache, index: usize) -> Result<&FingerprintEntry, EngineError> {
    cache.get(index).ok_or_else(|| {
        EngineError::Internal(format!("Ensemble index {index} missing from fingerprint cache"))
    })
}
