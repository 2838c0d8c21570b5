use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use kybnmr::engine::config::{DoubleCheckConfigBuilder, MatchPolicy};
use tracing::debug;

pub fn build_config(args: &CheckArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let dc_file = file_config.double_check.take().unwrap_or_default();
    let energy_threshold = args
        .energy_threshold
        .or(dc_file.energy_threshold)
        .unwrap_or(defaults.energy_threshold);
    let distance_threshold = args
        .distance_threshold
        .or(dc_file.distance_threshold)
        .unwrap_or(defaults.distance_threshold);

    let file_policy = dc_file
        .match_policy
        .as_deref()
        .map(str::parse::<MatchPolicy>)
        .transpose()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let match_policy = args
        .policy
        .or(file_policy)
        .unwrap_or(defaults.match_policy);

    let output_file = file_config.output.take().unwrap_or_default();
    let append = args.append || output_file.append.unwrap_or(defaults.append);

    let core_config = DoubleCheckConfigBuilder::new()
        .energy_threshold(energy_threshold)
        .distance_threshold(distance_threshold)
        .match_policy(match_policy)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    debug!(
        energy_threshold,
        distance_threshold,
        %match_policy,
        append,
        "Resolved Double Check configuration."
    );

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        append,
        report_path: args.report.clone(),
        core_config,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    let config_err = |e: parser::ParseError| CliError::Config(e.to_string());

    for kv_pair in set_values {
        let (key, value) = parser::parse_key_value(kv_pair).map_err(config_err)?;

        match key {
            "double-check.energy-threshold" => {
                config
                    .double_check
                    .get_or_insert_with(Default::default)
                    .energy_threshold = Some(parser::parse_f64(key, value).map_err(config_err)?);
            }
            "double-check.distance-threshold" => {
                config
                    .double_check
                    .get_or_insert_with(Default::default)
                    .distance_threshold = Some(parser::parse_f64(key, value).map_err(config_err)?);
            }
            "double-check.match-policy" => {
                value
                    .parse::<MatchPolicy>()
                    .map_err(|e| CliError::Config(e.to_string()))?;
                config
                    .double_check
                    .get_or_insert_with(Default::default)
                    .match_policy = Some(value.to_string());
            }
            "output.append" => {
                config.output.get_or_insert_with(Default::default).append =
                    Some(parser::parse_bool(key, value).map_err(config_err)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_check_args() -> CheckArgs {
        CheckArgs {
            input: PathBuf::from("in.xyz"),
            output: PathBuf::from("out.xyz"),
            config: None,
            energy_threshold: None,
            distance_threshold: None,
            policy: None,
            append: false,
            report: None,
            set_values: vec![],
        }
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let app = build_config(&base_check_args()).expect("build ok");
        let defaults = DefaultsConfig::default();
        assert_eq!(
            app.core_config.thresholds.energy_kcal_mol,
            defaults.energy_threshold
        );
        assert_eq!(
            app.core_config.thresholds.distance_angstrom,
            defaults.distance_threshold
        );
        assert_eq!(app.core_config.match_policy, MatchPolicy::FirstMatch);
        assert!(!app.append);
        assert_eq!(app.input_path, PathBuf::from("in.xyz"));
        assert!(app.report_path.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            r#"
            [double-check]
            energy-threshold = 0.5
            match-policy = "closest-match"

            [output]
            append = true
            "#,
        )
        .unwrap();

        let mut args = base_check_args();
        args.config = Some(cfg_path);
        let app = build_config(&args).expect("build ok");
        assert_eq!(app.core_config.thresholds.energy_kcal_mol, 0.5);
        assert_eq!(app.core_config.thresholds.distance_angstrom, 0.10);
        assert_eq!(app.core_config.match_policy, MatchPolicy::ClosestMatch);
        assert!(app.append);
    }

    #[test]
    fn cli_flags_override_set_values_and_file() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(&cfg_path, "[double-check]\ndistance-threshold = 0.3\n").unwrap();

        let mut args = base_check_args();
        args.config = Some(cfg_path);
        args.set_values = vec![
            "double-check.distance-threshold=0.2".to_string(),
            "double-check.energy-threshold=1.0".to_string(),
        ];
        args.energy_threshold = Some(2.0);
        let app = build_config(&args).expect("build ok");
        assert_eq!(app.core_config.thresholds.energy_kcal_mol, 2.0);
        assert_eq!(app.core_config.thresholds.distance_angstrom, 0.2);
    }

    #[test]
    fn set_values_cover_policy_and_append() {
        let mut args = base_check_args();
        args.set_values = vec![
            "double-check.match-policy=closest".to_string(),
            "output.append=yes".to_string(),
        ];
        let app = build_config(&args).expect("build ok");
        assert_eq!(app.core_config.match_policy, MatchPolicy::ClosestMatch);
        assert!(app.append);
    }

    #[test]
    fn invalid_set_values_are_config_errors() {
        for bad in [
            "double-check.energy-threshold",
            "double-check.energy-threshold=abc",
            "double-check.match-policy=nearest",
            "output.append=maybe",
            "optimization.num-solutions=3",
        ] {
            let mut args = base_check_args();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "expected config error for {bad}"
            );
        }
    }

    #[test]
    fn malformed_config_file_reports_its_path() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("broken.toml");
        fs::write(&cfg_path, "[double-check\n").unwrap();

        let mut args = base_check_args();
        args.config = Some(cfg_path.clone());
        match build_config(&args) {
            Err(CliError::FileParsing { path, .. }) => assert_eq!(path, cfg_path),
            other => panic!("expected FileParsing error, got {:?}", other.err()),
        }
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let mut args = base_check_args();
        args.config = Some(PathBuf::from("/nonexistent/kybnmr.toml"));
        assert!(matches!(build_config(&args), Err(CliError::Io(_))));
    }
}
