//! Pairwise global sequence alignment for pairalign

pub mod alignment;

// Re-export commonly used types
pub use alignment::{
    global_align, linear_space_align, Alignment, BasicScore, Hirschberg, NeedlemanWunsch,
    ScoringPolicy,
};
