/// Needleman-Wunsch global alignment with a full traceback matrix
use crate::alignment::hirschberg::last_row;
use crate::alignment::result::Alignment;
use crate::alignment::scoring::ScoringPolicy;
use pairalign_core::{PairAlignError, PairAlignResult};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Diagonal,
    Up,
    Left,
}

#[derive(Debug, Clone, Copy)]
struct Cell<S> {
    score: S,
    from: Option<Direction>,
}

/// Scores and back-pointers for every prefix pair, stored row-major.
struct ScoreGrid<S> {
    cells: Vec<Cell<S>>,
    cols: usize,
}

impl<S: Copy> ScoreGrid<S> {
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn score(&self, row: usize, col: usize) -> S {
        self.cells[self.index(row, col)].score
    }

    fn direction(&self, row: usize, col: usize) -> Option<Direction> {
        self.cells[self.index(row, col)].from
    }

    fn set(&mut self, row: usize, col: usize, score: S, from: Direction) {
        let idx = self.index(row, col);
        self.cells[idx] = Cell {
            score,
            from: Some(from),
        };
    }
}

pub struct NeedlemanWunsch<P> {
    scoring: P,
}

impl<P> NeedlemanWunsch<P> {
    pub fn new(scoring: P) -> Self {
        Self { scoring }
    }

    pub fn scoring(&self) -> &P {
        &self.scoring
    }

    /// Optimal global alignment of `x` against `y`.
    ///
    /// Ties prefer the diagonal, then up (consume `x`), then left
    /// (consume `y`), so the returned alignment is deterministic.
    pub fn align<T>(&self, x: &[T], y: &[T], gap: T) -> PairAlignResult<Alignment<T, P::Score>>
    where
        T: Copy,
        P: ScoringPolicy<T>,
    {
        debug!("Needleman-Wunsch: aligning {} x {} symbols", x.len(), y.len());

        let grid = self.fill(x, y)?;
        let mut alignment = self.traceback(&grid, x, y, gap)?;
        alignment.score = grid.score(x.len(), y.len());
        Ok(alignment)
    }

    /// Optimal score only, computed in linear space.
    pub fn score<T>(&self, x: &[T], y: &[T]) -> P::Score
    where
        P: ScoringPolicy<T>,
    {
        let row = last_row(&self.scoring, x.iter(), y.iter());
        row[y.len()]
    }

    fn fill<T>(&self, x: &[T], y: &[T]) -> PairAlignResult<ScoreGrid<P::Score>>
    where
        P: ScoringPolicy<T>,
    {
        let rows = x.len() + 1;
        let cols = y.len() + 1;
        let size = rows.checked_mul(cols).ok_or_else(|| {
            PairAlignError::InvalidInput(format!(
                "score matrix of {} x {} cells does not fit in memory",
                rows, cols
            ))
        })?;

        let mut grid = ScoreGrid {
            cells: vec![
                Cell {
                    score: P::Score::default(),
                    from: None,
                };
                size
            ],
            cols,
        };

        let insertion = self.scoring.insertion();
        let deletion = self.scoring.deletion();

        // First row: only insertions
        for col in 1..cols {
            let score = grid.score(0, col - 1) + insertion;
            grid.set(0, col, score, Direction::Left);
        }

        for row in 1..rows {
            // First column: only deletions
            let score = grid.score(row - 1, 0) + deletion;
            grid.set(row, 0, score, Direction::Up);

            for col in 1..cols {
                let up = grid.score(row - 1, col) + deletion;
                let left = grid.score(row, col - 1) + insertion;
                let diag = grid.score(row - 1, col - 1) + self.scoring.score(&x[row - 1], &y[col - 1]);

                let (best, from) = if diag >= up && diag >= left {
                    (diag, Direction::Diagonal)
                } else if up >= left {
                    (up, Direction::Up)
                } else {
                    (left, Direction::Left)
                };

                grid.set(row, col, best, from);
            }
        }

        Ok(grid)
    }

    fn traceback<T: Copy>(
        &self,
        grid: &ScoreGrid<P::Score>,
        x: &[T],
        y: &[T],
        gap: T,
    ) -> PairAlignResult<Alignment<T, P::Score>>
    where
        P: ScoringPolicy<T>,
    {
        let mut alignment = Alignment::with_capacity(x.len() + y.len());

        let mut row = x.len();
        let mut col = y.len();

        while row > 0 || col > 0 {
            let score = grid.score(row, col);
            let (prev_row, prev_col, step) = match grid.direction(row, col) {
                Some(Direction::Diagonal) if row > 0 && col > 0 => (
                    row - 1,
                    col - 1,
                    self.scoring.score(&x[row - 1], &y[col - 1]),
                ),
                Some(Direction::Up) if row > 0 => (row - 1, col, self.scoring.deletion()),
                Some(Direction::Left) if col > 0 => (row, col - 1, self.scoring.insertion()),
                from => {
                    return Err(PairAlignError::Invariant(format!(
                        "traceback reached cell ({}, {}) with direction {:?}",
                        row, col, from
                    )));
                }
            };

            // The stored move must still explain the stored score
            if grid.score(prev_row, prev_col) + step != score {
                return Err(PairAlignError::Invariant(format!(
                    "cell ({}, {}) no longer matches its recorded predecessor",
                    row, col
                )));
            }

            alignment
                .aligned_x
                .push(if prev_row < row { x[prev_row] } else { gap });
            alignment
                .aligned_y
                .push(if prev_col < col { y[prev_col] } else { gap });
            row = prev_row;
            col = prev_col;
        }

        alignment.aligned_x.reverse();
        alignment.aligned_y.reverse();

        Ok(alignment)
    }
}

/// Align `x` against `y` with the full-matrix algorithm.
pub fn global_align<T, P>(
    x: &[T],
    y: &[T],
    gap: T,
    scoring: &P,
) -> PairAlignResult<Alignment<T, P::Score>>
where
    T: Copy,
    P: ScoringPolicy<T>,
{
    NeedlemanWunsch::new(scoring).align(x, y, gap)
}
