//! # munkres-core
//!
//! Hungarian (Kuhn–Munkres) solver for the square linear assignment problem.
//!
//! Given an N×N matrix of costs, find the one-to-one pairing of rows to
//! columns with the smallest total cost, in O(N³).
//!
//! ```rust
//! use munkres_core::{solve, CostMatrix};
//!
//! let costs = CostMatrix::from_rows(&[[1.0, 2.0], [2.0, 1.0]]).unwrap();
//! assert_eq!(solve(&costs).unwrap(), 2.0);
//! ```
//!
//! ## The algorithm
//!
//! The solver is the classical six-step formulation, run as an explicit state
//! machine over a private working copy of the costs:
//!
//! ```text
//! CostMatrix ─copy→ WorkingContext ─Step…Step→ Done ─sum starred→ cost
//! ```
//!
//! 1. **Reduce** — subtract each row's minimum.
//! 2. **StarZeros** — greedily star one zero per row and column.
//! 3. **CoverColumns** — cover starred columns; N stars means done.
//! 4. **PrimeZeros** — prime uncovered zeros until an augmenting path opens.
//! 5. **Augment** — flip stars and primes along the path (one more star).
//! 6. **AdjustCosts** — shift by the smallest uncovered cost to create zeros.
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`matrix`] | [`CostMatrix`] | Dense row-major N×N cost container |
//! | [`step`] | [`Step`] | The six phases; the public type is a log label, transitions stay internal |
//! | [`solver`] | [`Munkres`], [`Assignment`] | Validation, driver loop, result extraction |
//! | [`error`] | [`Error`] | Input errors caught at the solve boundary |
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default and needs only `alloc`. Enable the
//! `std` feature to link the standard library, `serde` for serialisation of
//! matrices and results, and `python-ffi` for the PyO3 bindings.
//!
//! ## Logging
//!
//! Solve start, finish and rejected input are reported at `debug` level via
//! [`tracing`]; every step transition at `trace` level. Install any
//! subscriber to see them.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

#[cfg(any(feature = "std", feature = "python-ffi"))]
extern crate std;

mod context;
pub mod error;
pub mod matrix;
pub mod solver;
pub mod step;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use error::{Error, Result};
pub use matrix::CostMatrix;
pub use solver::{assign, solve, Assignment, Munkres};
pub use step::Step;
