//! Python FFI bindings via PyO3.
//!
//! Exposes the cost matrix and the solver to Python. Indexing mistakes and
//! invalid input raise Python exceptions instead of panicking across the
//! boundary.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from munkres_core import CostMatrix, solve, assign
//!
//! m = CostMatrix.from_rows([[4.0, 1.0, 3.0], [2.0, 0.0, 5.0], [3.0, 2.0, 2.0]])
//! print(solve(m))            # 5.0
//! cost, columns = assign(m)  # (5.0, [1, 0, 2])
//! m.set(0, 0, 0.5)
//! print(m.render())
//! ```

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::error::Error;
use crate::matrix::CostMatrix as RustCostMatrix;
use crate::solver::Munkres;

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::OutOfBounds { .. } => PyIndexError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Python callers always get full validation, tolerance included.
fn checked_solver(zero_tolerance: f64) -> Munkres {
    Munkres { zero_tolerance, validate_input: true }
}

// ── CostMatrix ────────────────────────────────────────────────────────────────

/// Square matrix of assignment costs.
///
/// Construct with `CostMatrix(n)` (all zeros) or `CostMatrix.from_rows(rows)`.
#[pyclass(name = "CostMatrix")]
#[derive(Clone)]
pub struct PyCostMatrix {
    inner: RustCostMatrix,
}

#[pymethods]
impl PyCostMatrix {
    /// Create an n×n matrix of zeros.
    #[new]
    pub fn new(n: usize) -> Self {
        Self { inner: RustCostMatrix::new(n) }
    }

    /// Build a matrix from a list of equally long rows.
    ///
    /// Raises ValueError if any row length differs from the number of rows.
    #[staticmethod]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> PyResult<Self> {
        RustCostMatrix::from_rows(&rows).map(|inner| Self { inner }).map_err(to_py_err)
    }

    /// Matrix dimension.
    #[getter]
    pub fn dim(&self) -> usize {
        self.inner.dim()
    }

    /// Cost at (row, col). Raises IndexError when out of range.
    pub fn get(&self, row: usize, col: usize) -> PyResult<f64> {
        self.inner.try_get(row, col).ok_or_else(|| {
            to_py_err(Error::OutOfBounds { row, col, dim: self.inner.dim() })
        })
    }

    /// Overwrite the cost at (row, col). Raises IndexError when out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> PyResult<()> {
        self.inner.try_set(row, col, value).map_err(to_py_err)
    }

    /// One line per row, entries space-separated.
    pub fn render(&self) -> String {
        self.inner.render()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("CostMatrix(dim={})", self.inner.dim())
    }
}

// ── Solver functions ──────────────────────────────────────────────────────────

/// Minimum total assignment cost.
///
/// Args:
///     matrix:         CostMatrix with finite entries
///     zero_tolerance: costs with |v| <= zero_tolerance count as zero (default 0.0)
///
/// Raises ValueError for empty matrices, NaN/infinite costs, costs whose
/// range would overflow, or a negative/non-finite zero_tolerance.
#[pyfunction]
#[pyo3(signature = (matrix, zero_tolerance=0.0))]
pub fn solve(matrix: &PyCostMatrix, zero_tolerance: f64) -> PyResult<f64> {
    checked_solver(zero_tolerance).solve(&matrix.inner).map_err(to_py_err)
}

/// Optimal assignment as `(total_cost, columns)` where `columns[row]` is the
/// column assigned to `row`.
///
/// Raises ValueError under the same conditions as `solve`.
#[pyfunction]
#[pyo3(signature = (matrix, zero_tolerance=0.0))]
pub fn assign(matrix: &PyCostMatrix, zero_tolerance: f64) -> PyResult<(f64, Vec<usize>)> {
    let a = checked_solver(zero_tolerance).assign(&matrix.inner).map_err(to_py_err)?;
    Ok((a.total_cost, a.columns))
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Hungarian-algorithm assignment solver.
#[pymodule]
pub fn munkres_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCostMatrix>()?;
    m.add_function(wrap_pyfunction!(solve, m)?)?;
    m.add_function(wrap_pyfunction!(assign, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
