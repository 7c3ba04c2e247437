use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::matching::normalize::NormalizerConfig;
use crate::matching::scoring::ScoringConfig;

/// Default score at or above which a best match is accepted automatically
pub const DEFAULT_EXACT_THRESHOLD: f64 = 0.95;

/// Default score at or above which a best match is reported as ambiguous
pub const DEFAULT_AMBIGUOUS_THRESHOLD: f64 = 0.80;

/// Default cap on alternates per result
pub const DEFAULT_MAX_ALTERNATES: usize = 5;

/// Default pruning floor for fuzzy candidates
pub const DEFAULT_CANDIDATE_FLOOR: f64 = 0.50;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration for the lookup engine
///
/// Thresholds must satisfy `0 <= ambiguous_threshold < exact_threshold <= 1`;
/// [`LookupConfig::validate`] enforces this and is called by
/// [`LookupEngine::new`](crate::LookupEngine::new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Best-match score required for a `Matched` decision
    pub exact_threshold: f64,
    /// Best-match score required for an `Ambiguous` decision
    pub ambiguous_threshold: f64,
    /// Maximum number of alternates reported per result
    pub max_alternates: usize,
    /// Fuzzy candidates scoring below this are discarded before ranking
    pub candidate_floor: f64,
    /// Demote `Matched` to `Ambiguous` when a strong runner-up has a different status
    pub status_conflict_check: bool,
    /// Similarity blend weights
    pub scoring: ScoringConfig,
    /// Name normalization rules
    pub normalizer: NormalizerConfig,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            exact_threshold: DEFAULT_EXACT_THRESHOLD,
            ambiguous_threshold: DEFAULT_AMBIGUOUS_THRESHOLD,
            max_alternates: DEFAULT_MAX_ALTERNATES,
            candidate_floor: DEFAULT_CANDIDATE_FLOOR,
            status_conflict_check: true,
            scoring: ScoringConfig::default(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl LookupConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    ///
    /// The result is not validated here; validation happens when an engine is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigFileError` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a config from JSON
    ///
    /// # Errors
    ///
    /// Returns `ConfigFileError::ParseError` on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check threshold ordering, value ranges, weights and the diacritic table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfig` describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("exact_threshold", self.exact_threshold)?;
        check_unit_range("ambiguous_threshold", self.ambiguous_threshold)?;
        check_unit_range("candidate_floor", self.candidate_floor)?;

        if self.ambiguous_threshold >= self.exact_threshold {
            return Err(ConfigError::InvalidConfig(format!(
                "thresholds must satisfy 0 <= ambiguous_threshold ({}) < exact_threshold ({}) <= 1",
                self.ambiguous_threshold, self.exact_threshold
            )));
        }

        self.scoring.validate()?;
        self.normalizer.validate()
    }
}

fn check_unit_range(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidConfig(format!(
            "{name} must be a finite number in [0, 1], got {value}"
        )))
    }
}
