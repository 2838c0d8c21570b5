use crate::core::models::ensemble::Ensemble;
use crate::core::models::structure::Structure;
use crate::engine::config::{DoubleCheckConfig, SimilarityThresholds};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::Report;
use crate::engine::similarity::SimilarityOracle;
use crate::engine::tasks;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct DoubleCheckResult {
    /// Surviving structures, sorted by ascending energy.
    pub representatives: Ensemble,
    pub report: Report,
}

/// Removes duplicate conformers from an ensemble.
///
/// Structures are scanned in input order. A structure similar to an existing
/// representative either replaces it (if strictly lower in energy) or is dropped;
/// otherwise it becomes a new representative. The result is sorted by energy, ties
/// keeping their scan order.
///
/// # Errors
///
/// - `EngineError::InvalidThreshold` if a threshold is negative or not finite. This is
///   checked before anything else.
/// - `EngineError::EmptyEnsemble` if the ensemble has no structures.
/// - `EngineError::TooFewAtoms` if a structure has fewer than two atoms.
/// - `EngineError::StructureMismatch` if a structure's atom count differs from the first one.
#[instrument(skip_all, name = "double_check_workflow")]
pub fn run(
    ensemble: Ensemble,
    config: &DoubleCheckConfig,
    reporter: &ProgressReporter,
) -> Result<DoubleCheckResult, EngineError> {
    validate_thresholds(&config.thresholds)?;
    validate_structures(&ensemble)?;

    info!(
        structures = ensemble.len(),
        energy_threshold = config.thresholds.energy_kcal_mol,
        distance_threshold = config.thresholds.distance_angstrom,
        policy = %config.match_policy,
        "Starting Double Check."
    );

    reporter.report(Progress::PhaseStart {
        name: "Fingerprints",
    });
    let cache = tasks::fingerprints::run(&ensemble, reporter);
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Merge" });
    let oracle = SimilarityOracle::new(config.thresholds);
    let clustering = tasks::clustering::run(&cache, &oracle, config.match_policy, reporter)?;
    reporter.report(Progress::PhaseFinish);

    let input_count = ensemble.len();
    let representatives = take_in_order(ensemble, &clustering.representatives)?;
    let report = Report::build(
        input_count,
        &representatives,
        &clustering.representatives,
        clustering.replaced,
        clustering.discarded,
    );

    info!(
        representatives = report.representative_count,
        removed = report.removed_count(),
        "Double Check finished."
    );
    reporter.report(Progress::Message(format!(
        "Kept {} of {} structure(s).",
        report.representative_count, report.input_count
    )));

    Ok(DoubleCheckResult {
        representatives,
        report,
    })
}

/// Runs Double Check with first-match assignment and no progress reporting.
///
/// # Errors
///
/// See [`run`].
pub fn double_check(
    energy_threshold_kcal_mol: f64,
    distance_threshold_angstrom: f64,
    ensemble: Ensemble,
) -> Result<(Ensemble, Report), EngineError> {
    let config = DoubleCheckConfig::new(energy_threshold_kcal_mol, distance_threshold_angstrom);
    let result = run(ensemble, &config, &ProgressReporter::new())?;
    Ok((result.representatives, result.report))
}

fn validate_thresholds(thresholds: &SimilarityThresholds) -> Result<(), EngineError> {
    let checks = [
        ("energy", thresholds.energy_kcal_mol),
        ("distance", thresholds.distance_angstrom),
    ];
    for (name, value) in checks {
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::InvalidThreshold { name, value });
        }
    }
    Ok(())
}

fn validate_structures(ensemble: &Ensemble) -> Result<(), EngineError> {
    let expected = ensemble.atom_count().ok_or(EngineError::EmptyEnsemble)?;
    for (index, structure) in ensemble.iter().enumerate() {
        let count = structure.atom_count();
        if count < 2 {
            return Err(EngineError::TooFewAtoms { index, count });
        }
        if count != expected {
            return Err(EngineError::StructureMismatch {
                index,
                expected,
                found: count,
            });
        }
    }
    Ok(())
}

fn take_in_order(ensemble: Ensemble, indices: &[usize]) -> Result<Ensemble, EngineError> {
    let mut slots: Vec<Option<Structure>> =
        ensemble.into_structures().into_iter().map(Some).collect();
    indices
        .iter()
        .map(|&index| {
            slots
                .get_mut(index)
                .and_then(Option::take)
                .ok_or_else(|| {
                    EngineError::Internal(format!(
                        "Representative index {index} taken twice or out of range"
                    ))
                })
        })
        .collect()
}
