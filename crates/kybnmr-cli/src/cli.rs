use clap::{Args, Parser, Subcommand};
use kybnmr::engine::config::MatchPolicy;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Kimari Y.B.",
    version,
    about = "KYBNMR CLI - conformer ensemble tools for NMR workflows: duplicate removal (Double Check) and Gaussian output extraction.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used for fingerprint computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove duplicate conformers from an xyz ensemble (Double Check).
    Check(CheckArgs),
    /// Collect the final geometries and energies of Gaussian logs into an xyz ensemble.
    Extract(ExtractArgs),
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the input xyz ensemble.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the deduplicated xyz ensemble.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Energy threshold in kcal/mol, overriding the config file.
    #[arg(short = 'e', long, value_name = "KCAL")]
    pub energy_threshold: Option<f64>,

    /// Distance threshold in Angstroms, overriding the config file.
    #[arg(short = 'd', long, value_name = "ANGSTROM")]
    pub distance_threshold: Option<f64>,

    /// How to assign a conformer similar to several representatives
    /// ('first-match' or 'closest-match').
    #[arg(long, value_name = "POLICY")]
    pub policy: Option<MatchPolicy>,

    /// Append to the output file instead of replacing it.
    #[arg(long)]
    pub append: bool,

    /// Also write the ranked report as CSV to this path.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S double-check.energy-threshold=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path for the xyz ensemble to write.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Append to the output file instead of replacing it.
    #[arg(long)]
    pub append: bool,

    /// Gaussian output files, in the order the structures should appear.
    #[arg(required = true, value_name = "LOG")]
    pub logs: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_arguments_are_parsed() {
        let cli = Cli::try_parse_from([
            "kybnmr", "-vv", "check", "-i", "in.xyz", "-o", "out.xyz", "-e", "0.5", "--policy",
            "closest-match", "-S", "output.append=true",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.input, PathBuf::from("in.xyz"));
        assert_eq!(args.energy_threshold, Some(0.5));
        assert_eq!(args.distance_threshold, None);
        assert_eq!(args.policy, Some(MatchPolicy::ClosestMatch));
        assert_eq!(args.set_values, vec!["output.append=true".to_string()]);
    }

    #[test]
    fn unknown_policy_is_rejected_by_the_parser() {
        let result = Cli::try_parse_from([
            "kybnmr", "check", "-i", "in.xyz", "-o", "out.xyz", "--policy", "nearest",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn extract_requires_at_least_one_log() {
        assert!(Cli::try_parse_from(["kybnmr", "extract", "-o", "out.xyz"]).is_err());
        let cli =
            Cli::try_parse_from(["kybnmr", "extract", "-o", "out.xyz", "a.log", "b.log"]).unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract subcommand");
        };
        assert_eq!(args.logs.len(), 2);
        assert!(!args.append);
    }
}
