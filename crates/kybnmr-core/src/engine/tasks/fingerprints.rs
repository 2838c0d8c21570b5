use crate::core::models::ensemble::Ensemble;
use crate::engine::cache::{FingerprintCache, FingerprintEntry};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Computes the fingerprint of every structure in the ensemble.
///
/// Each structure is independent, so with the `parallel` feature the work is spread
/// over the rayon pool; every task writes only its own entry. The result is identical
/// to the sequential computation.
#[instrument(skip_all, name = "fingerprint_task")]
pub fn run(ensemble: &Ensemble, reporter: &ProgressReporter) -> FingerprintCache {
    reporter.report(Progress::TaskStart {
        total_steps: ensemble.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = ensemble.structures().iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = ensemble.structures().par_iter().enumerate();

    let entries: Vec<FingerprintEntry> = iterator
        .map(|(index, structure)| {
            let entry = FingerprintEntry::from_structure(index, structure);
            reporter.report(Progress::TaskIncrement);
            entry
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    debug!(count = entries.len(), "Fingerprints computed.");

    FingerprintCache::from_entries(entries)
}
