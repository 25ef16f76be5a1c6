//! Error type for matrix construction and the solve boundary.
//!
//! The solver itself has no recoverable failure modes. Everything here is an
//! input or configuration problem caught before the step machine starts, or
//! a checked accessor refusing an index.

/// Errors returned by [`crate::CostMatrix`] constructors and the solve entry points.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The matrix has dimension zero; there is nothing to assign.
    #[error("cost matrix is empty")]
    EmptyMatrix,

    /// A row did not have as many entries as the matrix has rows.
    #[error("row {row} has {found} entries, expected {expected}")]
    DimensionMismatch {
        /// Index of the offending row.
        row: usize,
        /// Required row length (the number of rows).
        expected: usize,
        /// Actual row length.
        found: usize,
    },

    /// A cell holds NaN or an infinity.
    #[error("non-finite cost {value} at ({row}, {col})")]
    NonFinite {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The offending value.
        value: f64,
    },

    /// Costs spread so widely that the solve would overflow `f64`.
    ///
    /// Row reduction and cost adjustment work with differences of up to
    /// `n * (max - min)`, and the result sums `n` costs.
    #[error("costs in [{min}, {max}] overflow f64 arithmetic in a {dim}x{dim} solve")]
    CostOverflow {
        /// Smallest cost in the matrix.
        min: f64,
        /// Largest cost in the matrix.
        max: f64,
        /// Matrix dimension.
        dim: usize,
    },

    /// The solver's zero tolerance is negative or not finite.
    #[error("zero tolerance {value} must be finite and non-negative")]
    InvalidTolerance {
        /// The rejected tolerance.
        value: f64,
    },

    /// A checked accessor was given an index outside `[0, dim)`.
    #[error("cell ({row}, {col}) is outside a {dim}x{dim} matrix")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Matrix dimension.
        dim: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
