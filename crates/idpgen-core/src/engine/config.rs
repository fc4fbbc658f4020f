use crate::core::constants::BondGeometryConstants;
use crate::core::models::residue::is_standard_residue;
use crate::fragments::pattern::SsPattern;
use thiserror::Error;

pub const DEFAULT_MAX_RETRIES: usize = 64;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Input sequence is empty")]
    EmptySequence,
    #[error("Unknown residue code '{0}' in input sequence")]
    UnknownResidue(char),
    #[error("Number of conformers must be at least 1")]
    ZeroConformers,
}

/// Parameters of one conformer-build request.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// One-letter residue codes of the target segment.
    pub sequence: String,
    /// Secondary-structure patterns whose candidate windows feed the draws.
    pub patterns: Vec<SsPattern>,
    /// Number of independent conformers to build for this request.
    pub num_conformers: usize,
    /// Clash-rejection redraw bound per growth step.
    pub max_retries_per_step: usize,
    /// Base seed for reproducible builds; derived per conformer. Random when
    /// absent.
    pub rng_seed: Option<u64>,
    /// Physical constants shared by every placement.
    pub constants: BondGeometryConstants,
}

impl BuildConfig {
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::default()
    }

    /// Backbone atom budget implied by the target sequence (N, CA, C per
    /// residue; carbonyl oxygens are a post-pass).
    pub fn atom_budget(&self) -> usize {
        3 * self.sequence.chars().count()
    }
}

#[derive(Debug, Default)]
pub struct BuildConfigBuilder {
    sequence: Option<String>,
    patterns: Vec<SsPattern>,
    num_conformers: Option<usize>,
    max_retries_per_step: Option<usize>,
    rng_seed: Option<u64>,
    constants: Option<BondGeometryConstants>,
}

impl BuildConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence(mut self, sequence: impl Into<String>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }
    pub fn pattern(mut self, pattern: SsPattern) -> Self {
        self.patterns.push(pattern);
        self
    }
    pub fn patterns(mut self, patterns: impl IntoIterator<Item = SsPattern>) -> Self {
        self.patterns.extend(patterns);
        self
    }
    pub fn num_conformers(mut self, n: usize) -> Self {
        self.num_conformers = Some(n);
        self
    }
    pub fn max_retries_per_step(mut self, retries: usize) -> Self {
        self.max_retries_per_step = Some(retries);
        self
    }
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
    pub fn constants(mut self, constants: BondGeometryConstants) -> Self {
        self.constants = Some(constants);
        self
    }

    pub fn build(self) -> Result<BuildConfig, ConfigError> {
        let sequence = self
            .sequence
            .ok_or(ConfigError::MissingParameter("sequence"))?;
        if sequence.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        if let Some(bad) = sequence.chars().find(|c| !is_standard_residue(*c)) {
            return Err(ConfigError::UnknownResidue(bad));
        }
        if self.patterns.is_empty() {
            return Err(ConfigError::MissingParameter("patterns"));
        }
        let num_conformers = self.num_conformers.unwrap_or(1);
        if num_conformers == 0 {
            return Err(ConfigError::ZeroConformers);
        }

        Ok(BuildConfig {
            sequence,
            patterns: self.patterns,
            num_conformers,
            max_retries_per_step: self.max_retries_per_step.unwrap_or(DEFAULT_MAX_RETRIES),
            rng_seed: self.rng_seed,
            constants: self.constants.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loop_pattern() -> SsPattern {
        "L{2,6}".parse().unwrap()
    }

    #[test]
    fn builds_with_defaults_for_optional_parameters() {
        let config = BuildConfig::builder()
            .sequence("AGSV")
            .pattern(loop_pattern())
            .build()
            .unwrap();

        assert_eq!(config.num_conformers, 1);
        assert_eq!(config.max_retries_per_step, DEFAULT_MAX_RETRIES);
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.constants, BondGeometryConstants::default());
        assert_eq!(config.atom_budget(), 12);
    }

    #[test]
    fn missing_sequence_is_reported() {
        let result = BuildConfig::builder().pattern(loop_pattern()).build();

        assert_eq!(result, Err(ConfigError::MissingParameter("sequence")));
    }

    #[test]
    fn missing_patterns_are_reported() {
        let result = BuildConfig::builder().sequence("AG").build();

        assert_eq!(result, Err(ConfigError::MissingParameter("patterns")));
    }

    #[test]
    fn invalid_residue_codes_are_reported() {
        let result = BuildConfig::builder()
            .sequence("AGZ")
            .pattern(loop_pattern())
            .build();

        assert_eq!(result, Err(ConfigError::UnknownResidue('Z')));
    }

    #[test]
    fn empty_sequence_is_reported() {
        let result = BuildConfig::builder()
            .sequence("")
            .pattern(loop_pattern())
            .build();

        assert_eq!(result, Err(ConfigError::EmptySequence));
    }

    #[test]
    fn zero_conformers_are_rejected() {
        let result = BuildConfig::builder()
            .sequence("AG")
            .pattern(loop_pattern())
            .num_conformers(0)
            .build();

        assert_eq!(result, Err(ConfigError::ZeroConformers));
    }
}
