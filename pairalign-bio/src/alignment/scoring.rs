/// Scoring policies for linear-gap sequence alignment
use std::collections::HashMap;
use std::fmt::Debug;
use std::ops::Add;

/// Values an aligner can accumulate and compare.
///
/// `Default` is the additive identity. Every signed integer type qualifies.
pub trait Score: Copy + Ord + Add<Output = Self> + Default + Debug {
    /// `self` added to itself `n` times, starting from zero.
    fn times(self, n: usize) -> Self {
        (0..n).fold(Self::default(), |acc, _| acc + self)
    }
}

impl<S> Score for S where S: Copy + Ord + Add<Output = S> + Default + Debug {}

/// Scores one aligned column.
///
/// Insertion is charged for a column that consumes a symbol of the second
/// sequence against a gap, deletion for a column that consumes a symbol of
/// the first sequence against a gap.
pub trait ScoringPolicy<T: ?Sized> {
    type Score: Score;

    fn score(&self, a: &T, b: &T) -> Self::Score;
    fn insertion(&self) -> Self::Score;
    fn deletion(&self) -> Self::Score;
}

impl<T: ?Sized, P: ScoringPolicy<T> + ?Sized> ScoringPolicy<T> for &P {
    type Score = P::Score;

    fn score(&self, a: &T, b: &T) -> Self::Score {
        (**self).score(a, b)
    }

    fn insertion(&self) -> Self::Score {
        (**self).insertion()
    }

    fn deletion(&self) -> Self::Score {
        (**self).deletion()
    }
}

/// Decides whether two symbols count as a match.
pub trait MatchPredicate<T: ?Sized> {
    fn matches(&self, a: &T, b: &T) -> bool;
}

/// Matches symbols that compare equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Equality;

impl<T: PartialEq + ?Sized> MatchPredicate<T> for Equality {
    fn matches(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T: ?Sized, F> MatchPredicate<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn matches(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Fixed match/mismatch scores with linear gap costs.
#[derive(Debug, Clone, Copy)]
pub struct BasicScore<S, M = Equality> {
    match_score: S,
    mismatch_score: S,
    insertion: S,
    deletion: S,
    matcher: M,
}

impl<S: Score> BasicScore<S> {
    pub fn new(match_score: S, mismatch_score: S, insertion: S, deletion: S) -> Self {
        Self {
            match_score,
            mismatch_score,
            insertion,
            deletion,
            matcher: Equality,
        }
    }
}

impl<S: Score, M> BasicScore<S, M> {
    /// Replace the match predicate, keeping the scores.
    pub fn with_matcher<N>(self, matcher: N) -> BasicScore<S, N> {
        BasicScore {
            match_score: self.match_score,
            mismatch_score: self.mismatch_score,
            insertion: self.insertion,
            deletion: self.deletion,
            matcher,
        }
    }

    pub fn match_score(&self) -> S {
        self.match_score
    }

    pub fn mismatch_score(&self) -> S {
        self.mismatch_score
    }
}

impl<T: ?Sized, S: Score, M: MatchPredicate<T>> ScoringPolicy<T> for BasicScore<S, M> {
    type Score = S;

    fn score(&self, a: &T, b: &T) -> S {
        if self.matcher.matches(a, b) {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    fn insertion(&self) -> S {
        self.insertion
    }

    fn deletion(&self) -> S {
        self.deletion
    }
}

/// BLOSUM62 substitution matrix for protein sequences
#[derive(Debug, Clone)]
pub struct Blosum62 {
    matrix: [[i32; 24]; 24],
    index_map: HashMap<u8, usize>,
    insertion: i32,
    deletion: i32,
}

const BLOSUM62_ORDER: &[u8; 24] = b"ARNDCQEGHILKMFPSTWYVBZX*";
const BLOSUM62_UNKNOWN: usize = 22;

impl Blosum62 {
    pub fn new() -> Self {
        let index_map = BLOSUM62_ORDER
            .iter()
            .enumerate()
            .map(|(i, &aa)| (aa, i))
            .collect();

        #[rustfmt::skip]
        let matrix = [
            [ 4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4],
            [-1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4],
            [-2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4],
            [-2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4],
            [ 0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4],
            [-1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4],
            [-1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4],
            [ 0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4],
            [-2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4],
            [-1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4],
            [-1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4],
            [-1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4],
            [-1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4],
            [-2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4],
            [-1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4],
            [ 1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4],
            [ 0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4],
            [-3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4],
            [-2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4],
            [ 0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4],
            [-2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4],
            [-1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4],
            [ 0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4],
            [-4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1],
        ];

        Self {
            matrix,
            index_map,
            insertion: -4,
            deletion: -4,
        }
    }

    pub fn with_gap_costs(mut self, insertion: i32, deletion: i32) -> Self {
        self.insertion = insertion;
        self.deletion = deletion;
        self
    }

    fn index(&self, residue: u8) -> usize {
        self.index_map
            .get(&residue.to_ascii_uppercase())
            .copied()
            .unwrap_or(BLOSUM62_UNKNOWN)
    }
}

impl Default for Blosum62 {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringPolicy<u8> for Blosum62 {
    type Score = i32;

    fn score(&self, a: &u8, b: &u8) -> i32 {
        self.matrix[self.index(*a)][self.index(*b)]
    }

    fn insertion(&self) -> i32 {
        self.insertion
    }

    fn deletion(&self) -> i32 {
        self.deletion
    }
}

/// Nucleotide scoring that separates transitions from transversions
#[derive(Debug, Clone, Copy)]
pub struct NucleotideMatrix {
    match_score: i32,
    transition_score: i32,   // purine-purine or pyrimidine-pyrimidine
    transversion_score: i32, // purine-pyrimidine
    insertion: i32,
    deletion: i32,
}

impl NucleotideMatrix {
    pub fn new() -> Self {
        Self {
            match_score: 10,
            transition_score: -5,
            transversion_score: -5,
            insertion: -10,
            deletion: -10,
        }
    }

    pub fn with_scores(mut self, match_score: i32, mismatch_score: i32) -> Self {
        self.match_score = match_score;
        self.transition_score = mismatch_score;
        self.transversion_score = mismatch_score;
        self
    }

    pub fn with_substitutions(mut self, transition_score: i32, transversion_score: i32) -> Self {
        self.transition_score = transition_score;
        self.transversion_score = transversion_score;
        self
    }

    pub fn with_gap_costs(mut self, insertion: i32, deletion: i32) -> Self {
        self.insertion = insertion;
        self.deletion = deletion;
        self
    }

    fn is_purine(base: u8) -> bool {
        matches!(base, b'A' | b'G')
    }

    fn is_pyrimidine(base: u8) -> bool {
        matches!(base, b'C' | b'T' | b'U')
    }
}

impl Default for NucleotideMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringPolicy<u8> for NucleotideMatrix {
    type Score = i32;

    fn score(&self, a: &u8, b: &u8) -> i32 {
        let a = a.to_ascii_uppercase();
        let b = b.to_ascii_uppercase();

        if a == b {
            self.match_score
        } else if (Self::is_purine(a) && Self::is_purine(b))
            || (Self::is_pyrimidine(a) && Self::is_pyrimidine(b))
        {
            self.transition_score
        } else {
            self.transversion_score
        }
    }

    fn insertion(&self) -> i32 {
        self.insertion
    }

    fn deletion(&self) -> i32 {
        self.deletion
    }
}
