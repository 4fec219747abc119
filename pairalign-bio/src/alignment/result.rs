/// Alignment results and the checks that can be run against them
use crate::alignment::scoring::{Score, ScoringPolicy};
use pairalign_core::{PairAlignError, PairAlignResult};

/// A scored pair of gap-padded sequences.
///
/// `aligned_x` and `aligned_y` always have the same length; column `k` pairs
/// `aligned_x[k]` with `aligned_y[k]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<T, S> {
    pub score: S,
    pub aligned_x: Vec<T>,
    pub aligned_y: Vec<T>,
}

/// A substitution in the first sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta<T> {
    /// Offset in the ungapped first sequence
    pub position: usize,
    pub reference: T,
    pub query: T,
}

/// Column counts for an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlignmentSummary {
    pub matches: usize,
    pub mismatches: usize,
    pub insertions: usize,
    pub deletions: usize,
    /// Matching columns over all columns (0.0 to 1.0)
    pub identity: f64,
}

impl<T: Copy, S: Score> Alignment<T, S> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            score: S::default(),
            aligned_x: Vec::with_capacity(capacity),
            aligned_y: Vec::with_capacity(capacity),
        }
    }

    /// Every symbol of `y` against a gap.
    pub(crate) fn insertions_only(y: &[T], gap: T, insertion: S) -> Self {
        Self {
            score: insertion.times(y.len()),
            aligned_x: vec![gap; y.len()],
            aligned_y: y.to_vec(),
        }
    }

    /// Every symbol of `x` against a gap.
    pub(crate) fn deletions_only(x: &[T], gap: T, deletion: S) -> Self {
        Self {
            score: deletion.times(x.len()),
            aligned_x: x.to_vec(),
            aligned_y: vec![gap; x.len()],
        }
    }

    /// Append `other` after `self`, summing the scores.
    pub(crate) fn concat(mut self, other: Self) -> Self {
        self.score = self.score + other.score;
        self.aligned_x.extend(other.aligned_x);
        self.aligned_y.extend(other.aligned_y);
        self
    }
}

impl<T, S> Alignment<T, S> {
    /// Number of columns.
    pub fn len(&self) -> usize {
        self.aligned_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_x.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&T, &T)> + '_ {
        self.aligned_x.iter().zip(self.aligned_y.iter())
    }
}

impl<T: PartialEq + Copy, S> Alignment<T, S> {
    /// Check that this alignment witnesses `x` against `y`.
    ///
    /// Both rows must have equal length, no column may pair two gaps, and
    /// removing the gaps from each row must give back the input exactly.
    pub fn verify(&self, x: &[T], y: &[T], gap: T) -> PairAlignResult<()> {
        if self.aligned_x.len() != self.aligned_y.len() {
            return Err(PairAlignError::InvalidAlignment(format!(
                "rows differ in length ({} vs {})",
                self.aligned_x.len(),
                self.aligned_y.len()
            )));
        }

        if let Some(column) = self.columns().position(|(a, b)| *a == gap && *b == gap) {
            return Err(PairAlignError::InvalidAlignment(format!(
                "column {} pairs two gaps",
                column
            )));
        }

        if !self.aligned_x.iter().filter(|&&a| a != gap).eq(x.iter()) {
            return Err(PairAlignError::InvalidAlignment(
                "first row does not reconstruct the first sequence".to_string(),
            ));
        }

        if !self.aligned_y.iter().filter(|&&b| b != gap).eq(y.iter()) {
            return Err(PairAlignError::InvalidAlignment(
                "second row does not reconstruct the second sequence".to_string(),
            ));
        }

        Ok(())
    }

    /// Recompute the score column by column under `policy`.
    pub fn rescore<P>(&self, policy: &P, gap: T) -> P::Score
    where
        P: ScoringPolicy<T>,
    {
        self.columns().fold(P::Score::default(), |acc, (a, b)| {
            let column = if *a == gap {
                policy.insertion()
            } else if *b == gap {
                policy.deletion()
            } else {
                policy.score(a, b)
            };
            acc + column
        })
    }

    /// Count matches, mismatches and gaps.
    pub fn summary(&self, gap: T) -> AlignmentSummary {
        let mut summary = AlignmentSummary::default();

        for (a, b) in self.columns() {
            if *a == gap {
                summary.insertions += 1;
            } else if *b == gap {
                summary.deletions += 1;
            } else if a == b {
                summary.matches += 1;
            } else {
                summary.mismatches += 1;
            }
        }

        summary.identity = if self.is_empty() {
            0.0
        } else {
            summary.matches as f64 / self.len() as f64
        };
        summary
    }

    /// Substituted columns, positioned in the ungapped first sequence.
    pub fn deltas(&self, gap: T) -> Vec<Delta<T>> {
        let mut deltas = Vec::new();
        let mut ref_pos = 0;

        for (&r, &q) in self.columns() {
            if r != gap {
                if q != gap && r != q {
                    deltas.push(Delta {
                        position: ref_pos,
                        reference: r,
                        query: q,
                    });
                }
                ref_pos += 1;
            }
        }

        deltas
    }
}

impl<S> Alignment<u8, S> {
    /// `|` for a match, `X` for a mismatch, space for a gap column.
    pub fn alignment_string(&self, gap: u8) -> Vec<u8> {
        self.columns()
            .map(|(&r, &q)| {
                if r == gap || q == gap {
                    b' '
                } else if r == q {
                    b'|'
                } else {
                    b'X'
                }
            })
            .collect()
    }
}
