use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use kybnmr::core::io::gaussian::GaussianLog;
use kybnmr::core::io::traits::EnsembleFile;
use kybnmr::core::io::xyz::XyzFile;
use kybnmr::core::models::ensemble::Ensemble;
use kybnmr::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info};

pub fn run(args: ExtractArgs, progress: CliProgressHandler) -> Result<()> {
    let reporter = ProgressReporter::with_callback(progress.get_callback());
    reporter.report(Progress::PhaseStart {
        name: "Extracting",
    });
    reporter.report(Progress::TaskStart {
        total_steps: args.logs.len() as u64,
    });

    let mut ensemble = Ensemble::new();
    for log in &args.logs {
        let structure = GaussianLog::read_from_path(log).map_err(|e| CliError::FileParsing {
            path: log.clone(),
            source: e.into(),
        })?;
        debug!(
            path = %log.display(),
            atoms = structure.atom_count(),
            energy = structure.energy,
            "Extracted structure."
        );
        ensemble.push(structure);
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    info!(
        "Writing {} structure(s) to {:?} (append: {})",
        ensemble.len(),
        &args.output,
        args.append
    );
    let write_result = if args.append {
        XyzFile::append_to_path(&ensemble, &args.output)
    } else {
        XyzFile::write_to_path(&ensemble, &args.output)
    };
    write_result.map_err(|e| CliError::FileWriting {
        path: args.output.clone(),
        source: e.into(),
    })?;

    println!(
        "✓ {} structure(s) written to: {}",
        ensemble.len(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn gaussian_log(energy: &str, bond: &str) -> String {
        format!(
            " NAtoms=      2 NActive=      2 NUniq=      1 SFac= 4.00D+00\n\
             \x20                        Standard orientation:\n\
             \x20---------------------------------------------------------------------\n\
             \x20Center     Atomic      Atomic             Coordinates (Angstroms)\n\
             \x20Number     Number       Type             X           Y           Z\n\
             \x20---------------------------------------------------------------------\n\
             \x20     1          1           0        0.000000    0.000000    0.000000\n\
             \x20     2          1           0        {bond}    0.000000    0.000000\n\
             \x20---------------------------------------------------------------------\n\
             \x20SCF Done:  E(RB3LYP) =  {energy}     A.U. after    9 cycles\n"
        )
    }

    #[test]
    fn logs_become_an_ensemble_in_argument_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.log");
        let second = dir.path().join("b.log");
        fs::write(&first, gaussian_log("-1.17000000", "0.740000")).unwrap();
        fs::write(&second, gaussian_log("-1.16000000", "0.760000")).unwrap();
        let output = dir.path().join("out.xyz");

        let args = ExtractArgs {
            output: output.clone(),
            append: false,
            logs: vec![first, second],
        };
        run(args, CliProgressHandler::hidden()).unwrap();

        let ensemble = XyzFile::read_from_path(&output).unwrap();
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.get(0).unwrap().energy, -1.17);
        assert_eq!(ensemble.get(1).unwrap().atoms[1].symbol, "H");
    }

    #[test]
    fn missing_log_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let missing = PathBuf::from("/nonexistent/job.log");
        let args = ExtractArgs {
            output: dir.path().join("out.xyz"),
            append: false,
            logs: vec![missing.clone()],
        };
        match run(args, CliProgressHandler::hidden()) {
            Err(CliError::FileParsing { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected FileParsing error, got {:?}", other),
        }
    }
}
