pub mod hirschberg;
pub mod nw_aligner;
pub mod result;
pub mod scoring;

pub use hirschberg::{last_row, linear_space_align, Hirschberg, DEFAULT_MIN_PARALLEL_CELLS};
pub use nw_aligner::{global_align, NeedlemanWunsch};
pub use result::{Alignment, AlignmentSummary, Delta};
pub use scoring::{BasicScore, Blosum62, Equality, MatchPredicate, NucleotideMatrix, Score, ScoringPolicy};
