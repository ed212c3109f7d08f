use crate::dihedral::Dihedral;
use crate::scoring::ScoringParams;

/// Fully materialized local-alignment score matrix for one sequence pair.
///
/// The grid has `(rows + 1) x (cols + 1)` cells: row 0 and column 0 are the
/// boundary before either sequence starts and stay fixed at 0, so a local
/// alignment may begin at any offset with zero accumulated cost. Every cell
/// is floored at 0.
pub struct ScoreMatrix {
    cells: Vec<i64>,
    rows: usize,
    cols: usize,
}

impl ScoreMatrix {
    /// Zero-initialized matrix for sequences of the given lengths.
    pub fn new(seq1_len: usize, seq2_len: usize) -> Self {
        let rows = seq1_len + 1;
        let cols = seq2_len + 1;
        ScoreMatrix {
            cells: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i64 {
        assert!(i < self.rows && j < self.cols);
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: i64) {
        assert!(i < self.rows && j < self.cols);
        self.cells[i * self.cols + j] = value;
    }

    /// Maximum over the entire matrix. Local alignments may end anywhere,
    /// so this is not restricted to the last row or column. The boundary
    /// cells are 0, hence the result is never negative.
    pub fn best_score(&self) -> i64 {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

/// Fill the full local-alignment matrix for one sequence pair.
///
/// Strict row-major, left-to-right evaluation with no early termination or
/// banding: the unoptimized order is what makes the result usable as a
/// ground truth for parallel reimplementations of the same recurrence.
pub fn fill_matrix(
    seq1: &[Dihedral],
    seq2: &[Dihedral],
    gap_penalty: i64,
    params: &ScoringParams,
) -> ScoreMatrix {
    let mut matrix = ScoreMatrix::new(seq1.len(), seq2.len());

    for i in 1..=seq1.len() {
        for j in 1..=seq2.len() {
            let gap_left = matrix.get(i, j - 1) + gap_penalty;
            let gap_up = matrix.get(i - 1, j) + gap_penalty;
            let diag = matrix.get(i - 1, j - 1) + params.score(seq1[i - 1], seq2[j - 1]);
            let cell = gap_left.max(gap_up).max(diag).max(0);
            matrix.set(i, j, cell);
        }
    }

    matrix
}

/// Best local-alignment score between two sequences: fill the matrix and
/// take the global maximum. An empty sequence on either side yields 0.
pub fn smith_waterman(
    seq1: &[Dihedral],
    seq2: &[Dihedral],
    gap_penalty: i64,
    params: &ScoringParams,
) -> i64 {
    fill_matrix(seq1, seq2, gap_penalty, params).best_score()
}
