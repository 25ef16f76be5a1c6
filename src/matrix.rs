//! Dense square cost matrix.
//!
//! [`CostMatrix`] is the input type of the solver: an N×N grid of `f64` costs
//! stored row-major in a single buffer. The solver only ever reads it; all
//! reduction work happens on a private copy (see [`crate::solver`]).
//!
//! Plain [`CostMatrix::get`] / [`CostMatrix::set`] treat an out-of-range index
//! as a caller bug and panic. The `try_` variants return instead, for
//! wrappers that must not panic (the Python bindings).

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, Result};

/// N×N matrix of assignment costs, row-major.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")
)]
pub struct CostMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl CostMatrix {
    /// Allocate an `n × n` matrix with every cost set to zero.
    pub fn new(n: usize) -> Self {
        Self { n, cells: vec![0.0; n * n] }
    }

    /// Build a matrix from nested rows.
    ///
    /// The number of rows fixes the dimension; every row must have exactly
    /// that many entries.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(Error::DimensionMismatch { row: i, expected: n, found: row.len() });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { n, cells })
    }

    /// Build an `n × n` matrix by evaluating `f(row, col)` for every cell.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut cells = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                cells.push(f(row, col));
            }
        }
        Self { n, cells }
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// `true` when the matrix has dimension zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The whole matrix as a flat row-major slice of length `dim()²`.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// One row as a slice.
    ///
    /// # Panics
    /// If `row >= dim()`.
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.n, "row {row} out of range for {0}x{0} matrix", self.n);
        &self.cells[row * self.n..(row + 1) * self.n]
    }

    /// Cost at `(row, col)`.
    ///
    /// # Panics
    /// If either index is `>= dim()`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[self.offset(row, col)]
    }

    /// Overwrite the cost at `(row, col)`.
    ///
    /// # Panics
    /// If either index is `>= dim()`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let idx = self.offset(row, col);
        self.cells[idx] = value;
    }

    /// Cost at `(row, col)`, or `None` when the cell is out of range.
    pub fn try_get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.n && col < self.n).then(|| self.cells[row * self.n + col])
    }

    /// Overwrite the cost at `(row, col)`, refusing out-of-range cells.
    pub fn try_set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= self.n || col >= self.n {
            return Err(Error::OutOfBounds { row, col, dim: self.n });
        }
        self.cells[row * self.n + col] = value;
        Ok(())
    }

    /// Return the first NaN or infinite cell in row-major order as an error.
    pub fn check_finite(&self) -> Result<()> {
        match self.cells.iter().position(|v| !v.is_finite()) {
            Some(idx) => Err(Error::NonFinite {
                row: idx / self.n,
                col: idx % self.n,
                value: self.cells[idx],
            }),
            None => Ok(()),
        }
    }

    /// Human-readable dump: one line per row, entries space-separated.
    ///
    /// Diagnostic only. Same text as the `Display` impl.
    pub fn render(&self) -> String {
        self.to_string()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.n && col < self.n,
            "cell ({row}, {col}) out of range for {0}x{0} matrix",
            self.n
        );
        row * self.n + col
    }
}

impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.n.max(1)) {
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{v:.6}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(m: CostMatrix) -> Self {
        m.cells.chunks(m.n.max(1)).map(<[f64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}
