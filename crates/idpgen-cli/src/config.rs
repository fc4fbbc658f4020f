use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use idpgen::core::constants::BondGeometryConstants;
use idpgen::engine::config::{BuildConfig, BuildConfigBuilder};
use idpgen::fragments::pattern::SsPattern;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Optional TOML configuration file. Every field mirrors a command-line
/// argument; values given on the command line win over file values.
///
/// ```toml
/// [build]
/// nconfs = 10
/// patterns = ["L{2,6}"]
/// max_retries = 128
/// rng_seed = 7
///
/// [geometry]
/// bond_n_ca = 1.47
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub geometry: Option<BondGeometryConstants>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    pub nconfs: Option<usize>,
    pub patterns: Option<Vec<String>>,
    pub max_retries: Option<usize>,
    pub rng_seed: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::ConfigFile {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// The default pattern when neither the command line nor the configuration
/// file requests one: overlapping windows of 2 to 6 loop residues.
pub const DEFAULT_PATTERN: &str = "L{2,6}";

/// Merges the configuration file (if any) with the command-line arguments
/// into a validated [`BuildConfig`]. Precedence: CLI > file > defaults.
pub fn resolve_build_config(args: &BuildArgs) -> Result<BuildConfig> {
    let file_config = match &args.config {
        Some(path) => {
            info!("Merging configuration from {:?} and CLI arguments.", path);
            FileConfig::load(path)?
        }
        None => FileConfig::default(),
    };

    let pattern_strings: Vec<String> = if !args.patterns.is_empty() {
        args.patterns.clone()
    } else {
        file_config
            .build
            .patterns
            .unwrap_or_else(|| vec![DEFAULT_PATTERN.to_string()])
    };
    let patterns: Vec<SsPattern> = pattern_strings
        .iter()
        .map(|s| s.parse())
        .collect::<std::result::Result<_, _>>()?;

    let mut builder = BuildConfigBuilder::new()
        .sequence(args.sequence.clone())
        .patterns(patterns);

    if let Some(n) = args.nconfs.or(file_config.build.nconfs) {
        builder = builder.num_conformers(n);
    }
    if let Some(retries) = args.max_retries.or(file_config.build.max_retries) {
        builder = builder.max_retries_per_step(retries);
    }
    if let Some(seed) = args.rng_seed.or(file_config.build.rng_seed) {
        builder = builder.rng_seed(seed);
    }
    if let Some(path) = &args.geometry {
        builder = builder.constants(BondGeometryConstants::load(path)?);
    } else if let Some(constants) = file_config.geometry {
        builder = builder.constants(constants);
    }

    Ok(builder.build()?)
}
