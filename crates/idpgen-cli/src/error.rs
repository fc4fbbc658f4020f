use idpgen::core::constants::ConstantsLoadError;
use idpgen::core::io::pdb::PdbWriteError;
use idpgen::engine::config::ConfigError;
use idpgen::engine::error::BuildError;
use idpgen::fragments::pattern::PatternParseError;
use idpgen::fragments::pool::PoolLoadError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid build parameters: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid secondary-structure pattern: {0}")]
    Pattern(#[from] PatternParseError),

    #[error("Failed to load fragment database: {0}")]
    Pool(#[from] PoolLoadError),

    #[error("Failed to load geometry constants: {0}")]
    Constants(#[from] ConstantsLoadError),

    #[error("Build failed: {0}")]
    Build(#[from] BuildError),

    #[error("Failed to write conformer: {0}")]
    Pdb(#[from] PdbWriteError),

    #[error("No conformer could be built: {0}")]
    NoConformers(String),

    #[error("Failed to build global thread pool: {0}")]
    ThreadPool(String),
}
