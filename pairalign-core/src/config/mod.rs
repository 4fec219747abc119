//! Configuration types for pairalign

use crate::PairAlignError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Which aligner handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Full-matrix Needleman-Wunsch
    Global,
    /// Hirschberg divide and conquer
    LinearSpace,
}

/// Substitution scoring used for byte sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum MatrixKind {
    /// `match_score` on equal symbols, `mismatch_score` otherwise
    Identity,
    /// Transition/transversion aware nucleotide scores
    Nucleotide,
    /// BLOSUM62 protein matrix
    Blosum62,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Global => write!(f, "global"),
            Algorithm::LinearSpace => write!(f, "linear-space"),
        }
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixKind::Identity => write!(f, "identity"),
            MatrixKind::Nucleotide => write!(f, "nucleotide"),
            MatrixKind::Blosum62 => write!(f, "blosum62"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    #[serde(default = "default_match_score")]
    pub match_score: i32,
    #[serde(default = "default_mismatch_score")]
    pub mismatch_score: i32,
    /// Added once per column that consumes a symbol of the second sequence only
    #[serde(default = "default_insertion")]
    pub insertion: i32,
    /// Added once per column that consumes a symbol of the first sequence only
    #[serde(default = "default_deletion")]
    pub deletion: i32,
    #[serde(default = "default_matrix")]
    pub matrix: MatrixKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlignmentConfig {
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    #[serde(default = "default_gap_symbol")]
    pub gap_symbol: char,
    /// Check every produced alignment against its inputs before returning it
    #[serde(default = "default_verify")]
    pub verify: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceConfig {
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Smallest sub-problem (rows x columns) worth splitting across threads
    #[serde(default = "default_min_parallel_cells")]
    pub min_parallel_cells: usize,
    /// Worker threads, 0 = all available
    #[serde(default = "default_threads")]
    pub threads: usize,
}

// Default value functions
fn default_match_score() -> i32 { 1 }
fn default_mismatch_score() -> i32 { -1 }
fn default_insertion() -> i32 { -1 }
fn default_deletion() -> i32 { -1 }
fn default_matrix() -> MatrixKind { MatrixKind::Identity }
fn default_algorithm() -> Algorithm { Algorithm::LinearSpace }
fn default_gap_symbol() -> char { '-' }
fn default_verify() -> bool { false }
fn default_parallel() -> bool { false }
fn default_min_parallel_cells() -> usize { 1 << 16 }
fn default_threads() -> usize { 0 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: default_match_score(),
            mismatch_score: default_mismatch_score(),
            insertion: default_insertion(),
            deletion: default_deletion(),
            matrix: default_matrix(),
        }
    }
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            gap_symbol: default_gap_symbol(),
            verify: default_verify(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            min_parallel_cells: default_min_parallel_cells(),
            threads: default_threads(),
        }
    }
}

impl Config {
    /// Reject settings the aligners cannot honour.
    pub fn validate(&self) -> Result<(), PairAlignError> {
        if !self.alignment.gap_symbol.is_ascii() {
            return Err(PairAlignError::Configuration(format!(
                "gap symbol must be a single ASCII character, got {:?}",
                self.alignment.gap_symbol
            )));
        }
        if self.performance.min_parallel_cells == 0 {
            return Err(PairAlignError::Configuration(
                "min_parallel_cells must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as the TOML accepted by [`load_config`].
    pub fn to_toml_string(&self) -> Result<String, PairAlignError> {
        toml::to_string_pretty(self)
            .map_err(|e| PairAlignError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    /// Gap symbol as the byte inserted into aligned output.
    pub fn gap_byte(&self) -> u8 {
        // validate() guarantees ASCII; anything else falls back to '-'
        u8::try_from(self.alignment.gap_symbol).unwrap_or(b'-')
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, PairAlignError> {
    let path = path.as_ref();
    debug!("Loading config from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| PairAlignError::Configuration(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), PairAlignError> {
    std::fs::write(path, config.to_toml_string()?)?;
    Ok(())
}
