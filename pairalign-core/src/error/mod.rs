//! Core error types for pairalign

use thiserror::Error;

/// Main error type for pairalign operations
#[derive(Error, Debug)]
pub enum PairAlignError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The dynamic-programming state contradicts itself. Indicates a broken
    /// score type or an aligner bug, never a bad input.
    #[error("Internal invariant violated: {0}")]
    Invariant(String),

    /// An alignment does not witness the sequences it claims to align.
    #[error("Invalid alignment: {0}")]
    InvalidAlignment(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for pairalign operations
pub type PairAlignResult<T> = Result<T, PairAlignError>;

impl PairAlignError {
    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            PairAlignError::Configuration(_) => 2,
            PairAlignError::Io(_) => 3,
            PairAlignError::InvalidInput(_) | PairAlignError::Serialization(_) => 4,
            PairAlignError::Invariant(_) | PairAlignError::InvalidAlignment(_) => 5,
            PairAlignError::Other(_) => 1,
        }
    }
}

impl From<serde_json::Error> for PairAlignError {
    fn from(err: serde_json::Error) -> Self {
        PairAlignError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for PairAlignError {
    fn from(err: anyhow::Error) -> Self {
        PairAlignError::Other(err.to_string())
    }
}
