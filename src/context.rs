/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Per-solve working state for the Munkres step machine.
//!
//! A [`WorkingContext`] is built once per solve call from the caller's
//! [`CostMatrix`] and owns everything the steps mutate: a reduced copy of the
//! costs, row/column coverage, the star/prime marks and the augmenting path.
//! It never holds a reference back to the caller's matrix.
//!
//! # Invariants
//!
//! - After row reduction every working cost is `>= 0`.
//! - At most one [`Mark::Starred`] cell per row and per column.
//! - The star count never exceeds `n`.
//! - Coverage is all-false on creation, after initial starring and after
//!   each augmentation.

use alloc::vec;
use alloc::vec::Vec;

use crate::matrix::CostMatrix;

// ─── Mark ────────────────────────────────────────────────────────────────────

/// Per-cell marking used by the step machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Mark {
    /// No marking.
    #[default]
    Unmarked,
    /// Zero selected in the current partial assignment.
    Starred,
    /// Candidate zero found while searching for an augmenting path.
    Primed,
}

// ─── WorkingContext ──────────────────────────────────────────────────────────

/// Mutable state for a single solve invocation.
#[derive(Debug)]
pub(crate) struct WorkingContext {
    /// Dimension of the problem.
    pub(crate) n: usize,
    /// Row-major working costs, progressively reduced.
    pub(crate) costs: Vec<f64>,
    /// `row_covered[r]` is set while row `r` is covered.
    pub(crate) row_covered: Vec<bool>,
    /// `col_covered[c]` is set while column `c` is covered.
    pub(crate) col_covered: Vec<bool>,
    /// Row-major marks, one per cell.
    pub(crate) marks: Vec<Mark>,
    /// Alternating star/prime path, rebuilt on every augmentation.
    pub(crate) path: Vec<(usize, usize)>,
    /// Primed zero with no star in its row; start of the next augmenting path.
    pub(crate) z0: (usize, usize),
    /// Cells with `|cost| <= zero_tolerance` count as zero. Never negative or NaN.
    pub(crate) zero_tolerance: f64,
}

impl WorkingContext {
    /// Copy `matrix` into a fresh context: nothing covered, nothing marked.
    ///
    /// A negative or NaN `zero_tolerance` is read as 0.0; below that no
    /// cost adjustment could ever produce a zero.
    pub(crate) fn new(matrix: &CostMatrix, zero_tolerance: f64) -> Self {
        let n = matrix.dim();
        Self {
            n,
            costs: matrix.as_slice().to_vec(),
            row_covered: vec![false; n],
            col_covered: vec![false; n],
            marks: vec![Mark::Unmarked; n * n],
            path: Vec::with_capacity(2 * n),
            z0: (0, 0),
            zero_tolerance: zero_tolerance.max(0.0),
        }
    }

    #[inline]
    pub(crate) fn idx(&self, row: usize, col: usize) -> usize {
        row * self.n + col
    }

    #[inline]
    pub(crate) fn is_zero(&self, row: usize, col: usize) -> bool {
        self.costs[self.idx(row, col)].abs() <= self.zero_tolerance
    }

    #[inline]
    pub(crate) fn mark(&self, row: usize, col: usize) -> Mark {
        self.marks[self.idx(row, col)]
    }

    #[inline]
    pub(crate) fn set_mark(&mut self, row: usize, col: usize, mark: Mark) {
        let idx = self.idx(row, col);
        self.marks[idx] = mark;
    }

    pub(crate) fn clear_covers(&mut self) {
        self.row_covered.fill(false);
        self.col_covered.fill(false);
    }

    /// First zero in row-major order whose row and column are both uncovered.
    pub(crate) fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        for row in (0..self.n).filter(|&r| !self.row_covered[r]) {
            for col in 0..self.n {
                if !self.col_covered[col] && self.is_zero(row, col) {
                    return Some((row, col));
                }
            }
        }
        None
    }

    pub(crate) fn find_star_in_row(&self, row: usize) -> Option<usize> {
        (0..self.n).find(|&col| self.mark(row, col) == Mark::Starred)
    }

    pub(crate) fn find_star_in_col(&self, col: usize) -> Option<usize> {
        (0..self.n).find(|&row| self.mark(row, col) == Mark::Starred)
    }

    pub(crate) fn find_prime_in_row(&self, row: usize) -> Option<usize> {
        (0..self.n).find(|&col| self.mark(row, col) == Mark::Primed)
    }

    /// Flip every mark on the current path: stars become unmarked, primes become stars.
    pub(crate) fn convert_path(&mut self) {
        for i in 0..self.path.len() {
            let (row, col) = self.path[i];
            let flipped = match self.mark(row, col) {
                Mark::Starred => Mark::Unmarked,
                _ => Mark::Starred,
            };
            self.set_mark(row, col, flipped);
        }
    }

    pub(crate) fn erase_primes(&mut self) {
        for m in self.marks.iter_mut().filter(|m| **m == Mark::Primed) {
            *m = Mark::Unmarked;
        }
    }

    /// Smallest finite working cost among cells with uncovered row and
    /// uncovered column. `None` when no such cell exists.
    pub(crate) fn smallest_uncovered(&self) -> Option<f64> {
        let mut min: Option<f64> = None;
        for row in (0..self.n).filter(|&r| !self.row_covered[r]) {
            for col in (0..self.n).filter(|&c| !self.col_covered[c]) {
                let v = self.costs[self.idx(row, col)];
                if v.is_finite() && min.map_or(true, |m| v < m) {
                    min = Some(v);
                }
            }
        }
        min
    }

    pub(crate) fn star_count(&self) -> usize {
        self.marks.iter().filter(|&&m| m == Mark::Starred).count()
    }

    /// Column of the star in each row. `None` for rows without a star.
    pub(crate) fn starred_columns(&self) -> Vec<Option<usize>> {
        (0..self.n).map(|row| self.find_star_in_row(row)).collect()
    }
}
