/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! The six Munkres phases as an explicit state machine.
//!
//! Each [`Step`] mutates the per-solve working context and returns the step to run
//! next. [`Step::Reduce`] is the only entry state and [`Step::Done`] the only
//! terminal one; it is produced solely by [`Step::CoverColumns`] once every
//! row holds a starred zero.
//!
//! ```text
//! Reduce → StarZeros → CoverColumns ─(n stars)→ Done
//!                        ↑      │
//!                        │      ↓
//!                     Augment ← PrimeZeros ⇄ AdjustCosts
//! ```

use core::fmt;

use tracing::trace;

use crate::context::{Mark, WorkingContext};

/// A phase of the Munkres algorithm.
///
/// Steps are driven internally by [`crate::Munkres::assign`]; the type is
/// public so log output and diagnostics can name a phase. Outside the crate
/// it is a label only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Step 1: subtract each row's minimum from that row.
    Reduce,
    /// Step 2: greedily star one zero per uncovered row and column.
    StarZeros,
    /// Step 3: cover starred columns and test for a complete assignment.
    CoverColumns,
    /// Step 4: prime uncovered zeros until an augmenting path opens.
    PrimeZeros,
    /// Step 5: flip marks along the alternating star/prime path.
    Augment,
    /// Step 6: shift costs by the smallest uncovered value.
    AdjustCosts,
    /// Terminal: every row holds exactly one starred zero.
    Done,
}

impl Step {
    /// Short stable name, used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Step::Reduce => "reduce",
            Step::StarZeros => "star_zeros",
            Step::CoverColumns => "cover_columns",
            Step::PrimeZeros => "prime_zeros",
            Step::Augment => "augment",
            Step::AdjustCosts => "adjust_costs",
            Step::Done => "done",
        }
    }

    /// Run this step against `ctx` and return the step to run next.
    ///
    /// Calling `compute` on [`Step::Done`] is a no-op that returns `Done`.
    pub(crate) fn compute(self, ctx: &mut WorkingContext) -> Step {
        let next = match self {
            Step::Reduce => reduce_rows(ctx),
            Step::StarZeros => star_zeros(ctx),
            Step::CoverColumns => cover_starred_columns(ctx),
            Step::PrimeZeros => prime_zeros(ctx),
            Step::Augment => augment_path(ctx),
            Step::AdjustCosts => adjust_costs(ctx),
            Step::Done => Step::Done,
        };
        trace!(from = self.name(), to = next.name(), "step transition");
        next
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Step 1 ──────────────────────────────────────────────────────────────────

fn reduce_rows(ctx: &mut WorkingContext) -> Step {
    let n = ctx.n;
    for row in ctx.costs.chunks_mut(n.max(1)) {
        let min = row.iter().copied().fold(f64::MAX, f64::min);
        for v in row.iter_mut() {
            *v -= min;
        }
    }
    Step::StarZeros
}

// ─── Step 2 ──────────────────────────────────────────────────────────────────

fn star_zeros(ctx: &mut WorkingContext) -> Step {
    for row in 0..ctx.n {
        for col in 0..ctx.n {
            if ctx.is_zero(row, col) && !ctx.row_covered[row] && !ctx.col_covered[col] {
                ctx.set_mark(row, col, Mark::Starred);
                ctx.row_covered[row] = true;
                ctx.col_covered[col] = true;
            }
        }
    }
    // Coverage only guarded against double-starring.
    ctx.clear_covers();
    Step::CoverColumns
}

// ─── Step 3 ──────────────────────────────────────────────────────────────────

fn cover_starred_columns(ctx: &mut WorkingContext) -> Step {
    let mut count = 0;
    for row in 0..ctx.n {
        for col in 0..ctx.n {
            if ctx.mark(row, col) == Mark::Starred {
                ctx.col_covered[col] = true;
                count += 1;
            }
        }
    }
    if count >= ctx.n {
        Step::Done
    } else {
        Step::PrimeZeros
    }
}

// ─── Step 4 ──────────────────────────────────────────────────────────────────

fn prime_zeros(ctx: &mut WorkingContext) -> Step {
    loop {
        let Some((row, col)) = ctx.find_uncovered_zero() else {
            return Step::AdjustCosts;
        };
        ctx.set_mark(row, col, Mark::Primed);
        match ctx.find_star_in_row(row) {
            Some(star_col) => {
                ctx.row_covered[row] = true;
                ctx.col_covered[star_col] = false;
            }
            None => {
                ctx.z0 = (row, col);
                return Step::Augment;
            }
        }
    }
}

// ─── Step 5 ──────────────────────────────────────────────────────────────────

fn augment_path(ctx: &mut WorkingContext) -> Step {
    ctx.path.clear();
    ctx.path.push(ctx.z0);
    let (_, mut col) = ctx.z0;
    while let Some(row) = ctx.find_star_in_col(col) {
        ctx.path.push((row, col));
        // The row was covered in step 4 because of this star, which only
        // happens right after a zero in it was primed.
        let Some(prime_col) = ctx.find_prime_in_row(row) else {
            unreachable!("starred row {row} on the augmenting path has no primed zero");
        };
        ctx.path.push((row, prime_col));
        col = prime_col;
    }
    ctx.convert_path();
    ctx.clear_covers();
    ctx.erase_primes();
    Step::CoverColumns
}

// ─── Step 6 ──────────────────────────────────────────────────────────────────

fn adjust_costs(ctx: &mut WorkingContext) -> Step {
    // Reachable only with unchecked input whose working costs overflowed.
    let Some(min) = ctx.smallest_uncovered() else {
        panic!("no finite uncovered cost to adjust by; working costs overflowed f64");
    };
    let n = ctx.n;
    for row in 0..n {
        for col in 0..n {
            let idx = row * n + col;
            // A covered row over an uncovered column nets to zero.
            match (ctx.row_covered[row], ctx.col_covered[col]) {
                (true, true) => ctx.costs[idx] += min,
                (false, false) => ctx.costs[idx] -= min,
                _ => {}
            }
        }
    }
    Step::PrimeZeros
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::CostMatrix;

    fn ctx_from<R: AsRef<[f64]>>(rows: &[R]) -> WorkingContext {
        WorkingContext::new(&CostMatrix::from_rows(rows).unwrap(), 0.0)
    }

    /// At most one star in every row and every column.
    fn assert_star_lines_unique(ctx: &WorkingContext) {
        for row in 0..ctx.n {
            let stars = (0..ctx.n).filter(|&c| ctx.mark(row, c) == Mark::Starred).count();
            assert!(stars <= 1, "row {} holds {} stars", row, stars);
        }
        for col in 0..ctx.n {
            let stars = (0..ctx.n).filter(|&r| ctx.mark(r, col) == Mark::Starred).count();
            assert!(stars <= 1, "col {} holds {} stars", col, stars);
        }
    }

    /// Drive the machine to `Done`, checking invariants after every step.
    /// Returns the star count observed at each entry into `CoverColumns`.
    fn run_checked(ctx: &mut WorkingContext) -> Vec<usize> {
        let mut step = Step::Reduce;
        let mut counts = Vec::new();
        let mut guard = 0;
        while step != Step::Done {
            let prev = step;
            step = step.compute(ctx);
            if prev != Step::Reduce {
                assert_star_lines_unique(ctx);
            }
            assert!(ctx.star_count() <= ctx.n);
            if step == Step::CoverColumns {
                counts.push(ctx.star_count());
            }
            guard += 1;
            assert!(guard < 10_000, "state machine failed to terminate");
        }
        counts
    }

    #[test]
    fn reduce_leaves_a_zero_in_every_row() {
        let mut ctx = ctx_from(&[[4.0, 1.0, 3.0], [2.0, 0.0, 5.0], [3.0, 2.0, 2.0]]);
        assert_eq!(Step::Reduce.compute(&mut ctx), Step::StarZeros);
        assert_eq!(ctx.costs, [3.0, 0.0, 2.0, 2.0, 0.0, 5.0, 1.0, 0.0, 0.0]);
        for row in ctx.costs.chunks(3) {
            assert!(row.iter().any(|&v| v == 0.0));
            assert!(row.iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn reduce_handles_negative_costs() {
        let mut ctx = ctx_from(&[[-5.0, -1.0], [3.0, -2.0]]);
        Step::Reduce.compute(&mut ctx);
        assert_eq!(ctx.costs, [0.0, 4.0, 5.0, 0.0]);
    }

    #[test]
    fn star_zeros_is_greedy_first_fit() {
        let mut ctx = ctx_from(&[[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 0.0, 0.0]]);
        assert_eq!(Step::StarZeros.compute(&mut ctx), Step::CoverColumns);
        assert_eq!(ctx.mark(0, 0), Mark::Starred);
        assert_eq!(ctx.mark(0, 1), Mark::Unmarked);
        assert_eq!(ctx.mark(1, 0), Mark::Unmarked);
        assert_eq!(ctx.mark(2, 1), Mark::Starred);
        assert_eq!(ctx.star_count(), 2);
        assert!(ctx.row_covered.iter().chain(&ctx.col_covered).all(|&b| !b));
    }

    #[test]
    fn cover_columns_terminates_on_full_starring() {
        let mut ctx = ctx_from(&[[0.0, 1.0], [1.0, 0.0]]);
        Step::StarZeros.compute(&mut ctx);
        assert_eq!(Step::CoverColumns.compute(&mut ctx), Step::Done);
        assert_eq!(ctx.col_covered, [true, true]);
    }

    #[test]
    fn cover_columns_continues_on_partial_starring() {
        let mut ctx = ctx_from(&[[0.0, 1.0], [0.0, 1.0]]);
        Step::StarZeros.compute(&mut ctx);
        assert_eq!(Step::CoverColumns.compute(&mut ctx), Step::PrimeZeros);
        assert_eq!(ctx.col_covered, [true, false]);
    }

    #[test]
    fn prime_zeros_without_uncovered_zero_goes_to_adjust() {
        let mut ctx = ctx_from(&[[0.0, 1.0], [0.0, 1.0]]);
        Step::StarZeros.compute(&mut ctx);
        Step::CoverColumns.compute(&mut ctx);
        assert_eq!(Step::PrimeZeros.compute(&mut ctx), Step::AdjustCosts);
    }

    #[test]
    fn prime_zeros_records_z0_in_starless_row() {
        // (0,0) starred; (1,0) blocked by cover; (1,1) is an uncovered zero in a starless row.
        let mut ctx = ctx_from(&[[0.0, 1.0], [0.0, 0.0]]);
        ctx.set_mark(0, 0, Mark::Starred);
        Step::CoverColumns.compute(&mut ctx);
        assert_eq!(Step::PrimeZeros.compute(&mut ctx), Step::Augment);
        assert_eq!(ctx.z0, (1, 1));
        assert_eq!(ctx.mark(1, 1), Mark::Primed);
    }

    #[test]
    fn prime_zeros_covers_row_and_uncovers_star_column() {
        // Stars at (0,0) and (1,1); uncovered zero (0,2) shares row 0 with a star.
        let mut ctx = ctx_from(&[[0.0, 5.0, 0.0], [5.0, 0.0, 5.0], [0.0, 5.0, 5.0]]);
        ctx.set_mark(0, 0, Mark::Starred);
        ctx.set_mark(1, 1, Mark::Starred);
        Step::CoverColumns.compute(&mut ctx);
        let next = Step::PrimeZeros.compute(&mut ctx);
        assert_eq!(ctx.mark(0, 2), Mark::Primed);
        assert!(ctx.row_covered[0]);
        // column 0 reopened, so (2,0) becomes reachable and row 2 has no star
        assert_eq!(next, Step::Augment);
        assert_eq!(ctx.z0, (2, 0));
        assert_eq!(ctx.mark(2, 0), Mark::Primed);
    }

    #[test]
    fn augment_grows_matching_by_one() {
        let mut ctx = ctx_from(&[[0.0, 5.0, 0.0], [5.0, 0.0, 5.0], [0.0, 5.0, 5.0]]);
        ctx.set_mark(0, 0, Mark::Starred);
        ctx.set_mark(1, 1, Mark::Starred);
        Step::CoverColumns.compute(&mut ctx);
        Step::PrimeZeros.compute(&mut ctx);
        assert_eq!(Step::Augment.compute(&mut ctx), Step::CoverColumns);
        assert_eq!(ctx.path, [(2, 0), (0, 0), (0, 2)]);
        assert_eq!(ctx.mark(2, 0), Mark::Starred);
        assert_eq!(ctx.mark(0, 0), Mark::Unmarked);
        assert_eq!(ctx.mark(0, 2), Mark::Starred);
        assert_eq!(ctx.star_count(), 3);
        assert!(ctx.marks.iter().all(|&m| m != Mark::Primed));
        assert!(ctx.row_covered.iter().chain(&ctx.col_covered).all(|&b| !b));
    }

    #[test]
    fn adjust_costs_creates_uncovered_zero() {
        let mut ctx = ctx_from(&[[0.0, 1.0], [0.0, 3.0]]);
        Step::StarZeros.compute(&mut ctx);
        Step::CoverColumns.compute(&mut ctx);
        Step::PrimeZeros.compute(&mut ctx);
        assert_eq!(Step::AdjustCosts.compute(&mut ctx), Step::PrimeZeros);
        // column 0 covered, no rows covered: uncovered column 1 drops by 1
        assert_eq!(ctx.costs, [0.0, 0.0, 0.0, 2.0]);
        assert!(ctx.find_uncovered_zero().is_some());
        assert!(ctx.costs.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn adjust_costs_adds_to_covered_rows() {
        let mut ctx = ctx_from(&[[0.0, 2.0], [4.0, 3.0]]);
        ctx.row_covered[0] = true;
        ctx.col_covered[0] = true;
        Step::AdjustCosts.compute(&mut ctx);
        // min uncovered = 3 at (1,1)
        assert_eq!(ctx.costs, [3.0, 2.0, 4.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "no finite uncovered cost")]
    fn adjust_costs_refuses_to_spin_on_infinite_costs() {
        let mut ctx = ctx_from(&[[0.0, f64::INFINITY], [0.0, f64::INFINITY]]);
        Step::StarZeros.compute(&mut ctx);
        Step::CoverColumns.compute(&mut ctx);
        assert_eq!(Step::PrimeZeros.compute(&mut ctx), Step::AdjustCosts);
        Step::AdjustCosts.compute(&mut ctx);
    }

    #[test]
    fn done_is_absorbing() {
        let mut ctx = ctx_from(&[[1.0]]);
        assert_eq!(Step::Done.compute(&mut ctx), Step::Done);
        assert_eq!(ctx.costs, [1.0]);
    }

    #[test]
    fn full_run_keeps_invariants_and_monotone_star_count() {
        let mut ctx = ctx_from(&[
            [7.0, 3.0, 9.0, 1.0, 4.0],
            [2.0, 8.0, 6.0, 5.0, 3.0],
            [9.0, 1.0, 4.0, 8.0, 7.0],
            [3.0, 6.0, 2.0, 9.0, 5.0],
            [6.0, 4.0, 7.0, 2.0, 8.0],
        ]);
        let counts = run_checked(&mut ctx);
        assert!(counts.windows(2).all(|w| w[0] <= w[1]), "star counts {:?}", counts);
        assert_eq!(ctx.star_count(), 5);
        assert!(ctx.starred_columns().iter().all(Option::is_some));
    }

    #[test]
    fn full_run_on_degenerate_matrix() {
        let mut ctx = ctx_from(&[[1.0; 4]; 4]);
        run_checked(&mut ctx);
        assert_eq!(ctx.star_count(), 4);
    }

    #[test]
    fn step_names_are_distinct() {
        let all = [
            Step::Reduce,
            Step::StarZeros,
            Step::CoverColumns,
            Step::PrimeZeros,
            Step::Augment,
            Step::AdjustCosts,
            Step::Done,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
        assert_eq!(format!("{}", Step::AdjustCosts), "adjust_costs");
    }
}
