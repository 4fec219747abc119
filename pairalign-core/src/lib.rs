//! Core types shared across all pairalign crates

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{default_config, load_config, save_config, Algorithm, Config, MatrixKind};
pub use error::{PairAlignError, PairAlignResult};

/// Version information for the pairalign project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
