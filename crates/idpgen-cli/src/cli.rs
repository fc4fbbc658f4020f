use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "idpgen CLI - builds backbone conformers for disordered protein segments from a torsion-angle fragment database.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel conformer building.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build backbone conformers for a target sequence.
    Build(BuildArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    // --- Core Arguments ---
    /// Path to the fragment database directory (*.data files).
    #[arg(short = 'd', long = "database", required = true, value_name = "DIR")]
    pub database: PathBuf,

    /// The conformer residue sequence (one-letter codes).
    #[arg(short = 's', long = "sequence", required = true, value_name = "SEQ")]
    pub sequence: String,

    /// Directory the conformer files are written into.
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    // --- Sampling Options ---
    /// Number of conformers to build.
    #[arg(short = 'n', long, value_name = "NUM")]
    pub nconfs: Option<usize>,

    /// Secondary-structure patterns to draw fragments from
    /// (e.g. 'L{2,6}'; repeatable).
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Maximum clash-rejection redraws per growth step.
    #[arg(long, value_name = "NUM")]
    pub max_retries: Option<usize>,

    /// Base random seed for reproducible batches.
    #[arg(long, value_name = "SEED")]
    pub rng_seed: Option<u64>,

    // --- Configuration ---
    /// TOML configuration file; command-line arguments take precedence over
    /// its values.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// TOML file overriding the bond-geometry constants (takes precedence
    /// over the config file's [geometry] table).
    #[arg(short = 'g', long, value_name = "PATH")]
    pub geometry: Option<PathBuf>,
}
