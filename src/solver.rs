/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Solve driver: validates input, runs the step machine, reads off the result.
//!
//! [`Munkres`] carries the solver configuration; [`solve`] and [`assign`] are
//! shortcuts for the default configuration.
//!
//! The driver copies the caller's matrix into a private working context, runs
//! [`Step`]s from [`Step::Reduce`] until [`Step::Done`], then sums the
//! *original* cost of every starred cell. The caller's matrix is only read.

use alloc::vec::Vec;

use tracing::debug;

use crate::context::WorkingContext;
use crate::error::{Error, Result};
use crate::matrix::CostMatrix;
use crate::step::Step;

// ─── Assignment ──────────────────────────────────────────────────────────────

/// Optimal assignment returned by [`Munkres::assign`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// Sum of the original costs of the assigned cells.
    pub total_cost: f64,
    /// `columns[row]` is the column assigned to `row`. Always a permutation of `0..n`.
    pub columns: Vec<usize>,
    /// Number of augmenting paths applied (step 5 runs).
    pub augmentations: u32,
    /// Number of cost adjustments applied (step 6 runs).
    pub adjustments: u32,
}

impl Assignment {
    /// Column assigned to `row`, or `None` if `row` is out of range.
    pub fn column_for(&self, row: usize) -> Option<usize> {
        self.columns.get(row).copied()
    }

    /// `(row, column)` pairs in row order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns.iter().copied().enumerate()
    }

    /// Number of assigned rows.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// `true` for the assignment of an empty matrix.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ─── Munkres ─────────────────────────────────────────────────────────────────

/// Hungarian-algorithm solver configuration.
///
/// ```rust
/// use munkres_core::{CostMatrix, Munkres};
///
/// let m = CostMatrix::from_rows(&[[4.0, 1.0, 3.0], [2.0, 0.0, 5.0], [3.0, 2.0, 2.0]]).unwrap();
/// let a = Munkres::default().assign(&m).unwrap();
/// assert_eq!(a.total_cost, 5.0);
/// assert_eq!(a.columns, vec![1, 0, 2]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Munkres {
    /// Working costs with `|v| <= zero_tolerance` are treated as zero (default: 0.0).
    ///
    /// The classical algorithm compares against exact zero. A small positive
    /// tolerance absorbs rounding residue on inputs with many fractional costs,
    /// at the price of an assignment that may miss the optimum by roughly
    /// `n * zero_tolerance`. Must be finite and `>= 0`; with validation off a
    /// negative or NaN tolerance is read as 0.0.
    pub zero_tolerance: f64,
    /// Reject bad tolerances, empty matrices, non-finite costs and cost
    /// ranges that would overflow before solving (default: true).
    ///
    /// With validation off an empty matrix solves to 0.0, and non-finite or
    /// overflowing costs give unspecified results and may panic.
    pub validate_input: bool,
}

impl Default for Munkres {
    fn default() -> Self {
        Self { zero_tolerance: 0.0, validate_input: true }
    }
}

impl Munkres {
    /// Create a solver with the given zero tolerance and validation policy.
    pub fn new(zero_tolerance: f64, validate_input: bool) -> Self {
        Self { zero_tolerance, validate_input }
    }

    /// Minimum total cost over all one-to-one row/column assignments.
    pub fn solve(&self, matrix: &CostMatrix) -> Result<f64> {
        self.assign(matrix).map(|a| a.total_cost)
    }

    /// Optimal assignment together with its total cost.
    pub fn assign(&self, matrix: &CostMatrix) -> Result<Assignment> {
        if self.validate_input {
            self.validate(matrix)?;
        }
        let n = matrix.dim();
        debug!(n, "solving assignment");

        let mut ctx = WorkingContext::new(matrix, self.zero_tolerance);
        let mut augmentations = 0u32;
        let mut adjustments = 0u32;
        let mut step = Step::Reduce;
        while step != Step::Done {
            match step {
                Step::Augment => augmentations += 1,
                Step::AdjustCosts => adjustments += 1,
                _ => {}
            }
            step = step.compute(&mut ctx);
        }

        let mut columns = Vec::with_capacity(n);
        let mut total_cost = 0.0;
        for (row, col) in ctx.starred_columns().into_iter().enumerate() {
            let Some(col) = col else {
                unreachable!("row {row} has no starred zero after termination");
            };
            total_cost += matrix.get(row, col);
            columns.push(col);
        }
        debug!(
            n,
            total_cost,
            augmentations,
            adjustments,
            stars = ctx.star_count(),
            "assignment solved"
        );

        Ok(Assignment { total_cost, columns, augmentations, adjustments })
    }

    fn validate(&self, matrix: &CostMatrix) -> Result<()> {
        let checked = check_tolerance(self.zero_tolerance)
            .and_then(|()| if matrix.is_empty() { Err(Error::EmptyMatrix) } else { Ok(()) })
            .and_then(|()| matrix.check_finite())
            .and_then(|()| check_cost_range(matrix));
        if let Err(ref err) = checked {
            debug!(n = matrix.dim(), %err, "rejecting solve input");
        }
        checked
    }
}

fn check_tolerance(value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidTolerance { value })
    }
}

/// Every working cost stays within `[0, n * (max - min)]` and the result sums
/// `n` original costs, so both bounds must fit in an `f64`.
fn check_cost_range(matrix: &CostMatrix) -> Result<()> {
    let cells = matrix.as_slice();
    let min = cells.iter().copied().fold(f64::INFINITY, f64::min);
    let max = cells.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let widest = (max - min).max(min.abs()).max(max.abs());
    if (widest * matrix.dim() as f64).is_finite() {
        Ok(())
    } else {
        Err(Error::CostOverflow { min, max, dim: matrix.dim() })
    }
}

/// Minimum total assignment cost using the default [`Munkres`] configuration.
pub fn solve(matrix: &CostMatrix) -> Result<f64> {
    Munkres::default().solve(matrix)
}

/// Optimal assignment using the default [`Munkres`] configuration.
pub fn assign(matrix: &CostMatrix) -> Result<Assignment> {
    Munkres::default().assign(matrix)
}
