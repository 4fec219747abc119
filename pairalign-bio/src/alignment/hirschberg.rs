//! Hirschberg's linear-space global alignment.
//!
//! The first sequence is halved; a forward score pass over its left half and
//! a backward pass over its (reversed) right half, both against the whole
//! second sequence, locate the column where an optimal alignment crosses the
//! middle row. Both halves are then solved recursively and concatenated.
//! Sub-problems with a single row or column go to [`NeedlemanWunsch`].
//!
//! # Complexity
//!
//! O(N * M) time and O(N + M) auxiliary space.

use crate::alignment::nw_aligner::NeedlemanWunsch;
use crate::alignment::result::Alignment;
use crate::alignment::scoring::{Score, ScoringPolicy};
use pairalign_core::PairAlignResult;
use tracing::{debug, trace};

/// Sub-problems below this many cells are not split across threads.
pub const DEFAULT_MIN_PARALLEL_CELLS: usize = 1 << 16;

/// Last row of the global score matrix of `x` against `y`.
///
/// Keeps two rows of length `|y| + 1` and no back-pointers. Any iterators
/// over symbol references work, so a backward pass is just `iter().rev()`.
pub fn last_row<'a, T, P, X, Y>(scoring: &P, x: X, y: Y) -> Vec<P::Score>
where
    T: 'a,
    P: ScoringPolicy<T> + ?Sized,
    X: IntoIterator<Item = &'a T>,
    Y: Iterator<Item = &'a T> + Clone,
{
    let insertion = scoring.insertion();
    let deletion = scoring.deletion();

    let mut prev: Vec<P::Score> = std::iter::once(P::Score::default())
        .chain(y.clone().scan(P::Score::default(), |acc, _| {
            *acc = *acc + insertion;
            Some(*acc)
        }))
        .collect();
    let mut curr = prev.clone();

    for a in x {
        curr[0] = prev[0] + deletion;
        for (col, b) in y.clone().enumerate() {
            let up = prev[col + 1] + deletion;
            let left = curr[col] + insertion;
            let diag = prev[col] + scoring.score(a, b);
            curr[col + 1] = up.max(left).max(diag);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev
}

/// Column where the forward and backward passes meet with the best total.
///
/// `backward[k]` scores the last `k` symbols of the second sequence. The
/// smallest maximising column wins.
fn best_split<S: Score>(forward: &[S], backward: &[S]) -> usize {
    let m = forward.len() - 1;
    let mut ymid = 0;
    let mut best = forward[0] + backward[m];

    for idx in 1..=m {
        let total = forward[idx] + backward[m - idx];
        if total > best {
            best = total;
            ymid = idx;
        }
    }

    ymid
}

pub struct Hirschberg<P> {
    scoring: P,
    min_parallel_cells: usize,
}

impl<P> Hirschberg<P> {
    pub fn new(scoring: P) -> Self {
        Self {
            scoring,
            min_parallel_cells: DEFAULT_MIN_PARALLEL_CELLS,
        }
    }

    /// Only hand sub-problems of at least `cells` (rows x columns) to
    /// [`par_align`](Self::par_align) workers.
    pub fn with_min_parallel_cells(mut self, cells: usize) -> Self {
        self.min_parallel_cells = cells.max(1);
        self
    }

    pub fn scoring(&self) -> &P {
        &self.scoring
    }

    /// Optimal global alignment of `x` against `y` in linear space.
    pub fn align<T>(&self, x: &[T], y: &[T], gap: T) -> PairAlignResult<Alignment<T, P::Score>>
    where
        T: Copy,
        P: ScoringPolicy<T>,
    {
        debug!("Hirschberg: aligning {} x {} symbols", x.len(), y.len());
        self.solve(x, y, gap)
    }

    /// Empty and single row/column problems, solved directly.
    fn base_case<T>(&self, x: &[T], y: &[T], gap: T) -> Option<PairAlignResult<Alignment<T, P::Score>>>
    where
        T: Copy,
        P: ScoringPolicy<T>,
    {
        if x.is_empty() {
            return Some(Ok(Alignment::insertions_only(y, gap, self.scoring.insertion())));
        }
        if y.is_empty() {
            return Some(Ok(Alignment::deletions_only(x, gap, self.scoring.deletion())));
        }
        if x.len() == 1 || y.len() == 1 {
            return Some(NeedlemanWunsch::new(&self.scoring).align(x, y, gap));
        }
        None
    }

    fn solve<T>(&self, x: &[T], y: &[T], gap: T) -> PairAlignResult<Alignment<T, P::Score>>
    where
        T: Copy,
        P: ScoringPolicy<T>,
    {
        if let Some(result) = self.base_case(x, y, gap) {
            return result;
        }

        let xmid = x.len() / 2;
        let forward = last_row(&self.scoring, x[..xmid].iter(), y.iter());
        let backward = last_row(&self.scoring, x[xmid..].iter().rev(), y.iter().rev());
        let ymid = best_split(&forward, &backward);
        trace!("split {} x {} at ({}, {})", x.len(), y.len(), xmid, ymid);

        let left = self.solve(&x[..xmid], &y[..ymid], gap)?;
        let right = self.solve(&x[xmid..], &y[ymid..], gap)?;
        Ok(left.concat(right))
    }
}

impl<P: Sync> Hirschberg<P> {
    /// Same result as [`align`](Self::align), with the two score passes and
    /// the two sub-problems of each large enough frame run on the rayon pool.
    pub fn par_align<T>(&self, x: &[T], y: &[T], gap: T) -> PairAlignResult<Alignment<T, P::Score>>
    where
        T: Copy + Send + Sync,
        P: ScoringPolicy<T>,
        P::Score: Send,
    {
        debug!(
            "Hirschberg (parallel, threshold {} cells): aligning {} x {} symbols",
            self.min_parallel_cells,
            x.len(),
            y.len()
        );
        self.par_solve(x, y, gap)
    }

    fn par_solve<T>(&self, x: &[T], y: &[T], gap: T) -> PairAlignResult<Alignment<T, P::Score>>
    where
        T: Copy + Send + Sync,
        P: ScoringPolicy<T>,
        P::Score: Send,
    {
        if let Some(result) = self.base_case(x, y, gap) {
            return result;
        }
        if x.len().saturating_mul(y.len()) < self.min_parallel_cells {
            return self.solve(x, y, gap);
        }

        let xmid = x.len() / 2;
        let (forward, backward) = rayon::join(
            || last_row(&self.scoring, x[..xmid].iter(), y.iter()),
            || last_row(&self.scoring, x[xmid..].iter().rev(), y.iter().rev()),
        );
        let ymid = best_split(&forward, &backward);
        trace!("parallel split {} x {} at ({}, {})", x.len(), y.len(), xmid, ymid);

        let (left, right) = rayon::join(
            || self.par_solve(&x[..xmid], &y[..ymid], gap),
            || self.par_solve(&x[xmid..], &y[ymid..], gap),
        );
        Ok(left?.concat(right?))
    }
}

/// Align `x` against `y` in linear space.
pub fn linear_space_align<T, P>(
    x: &[T],
    y: &[T],
    gap: T,
    scoring: &P,
) -> PairAlignResult<Alignment<T, P::Score>>
where
    T: Copy,
    P: ScoringPolicy<T>,
{
    Hirschberg::new(scoring).align(x, y, gap)
}
