use crate::cli::CheckArgs;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use kybnmr::{
    core::io::{traits::EnsembleFile, xyz::XyzFile},
    engine::progress::ProgressReporter,
    workflows,
};
use std::fs::File;
use std::io::BufWriter;
use tracing::{info, warn};

pub fn run(args: CheckArgs, progress: CliProgressHandler) -> Result<()> {
    info!("Resolving configuration from defaults, file and CLI arguments...");
    let app = build_config(&args)?;

    info!("Loading ensemble from {:?}", &app.input_path);
    let ensemble =
        XyzFile::read_from_path(&app.input_path).map_err(|e| CliError::FileParsing {
            path: app.input_path.clone(),
            source: e.into(),
        })?;
    info!("Loaded {} structure(s).", ensemble.len());

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let result = workflows::double_check::run(ensemble, &app.core_config, &reporter)?;
    drop(reporter);

    let report = &result.report;
    if report.removed_count() == 0 {
        warn!("No duplicates found; the output is the input sorted by energy.");
    }

    let write_result = if app.append {
        XyzFile::append_to_path(&result.representatives, &app.output_path)
    } else {
        XyzFile::write_to_path(&result.representatives, &app.output_path)
    };
    write_result.map_err(|e| CliError::FileWriting {
        path: app.output_path.clone(),
        source: e.into(),
    })?;

    print!("{}", report);
    println!(
        "✓ {} representative(s) written to: {}",
        report.representative_count,
        app.output_path.display()
    );

    if let Some(report_path) = &app.report_path {
        let writing_error = |source: anyhow::Error| CliError::FileWriting {
            path: report_path.clone(),
            source,
        };
        let file = File::create(report_path).map_err(|e| writing_error(e.into()))?;
        report
            .write_csv(BufWriter::new(file))
            .map_err(|e| writing_error(e.into()))?;
        println!("✓ Report written to: {}", report_path.display());
    }

    Ok(())
}
