//! # bsm-math
//!
//! Mathematical utilities: the normal distribution (via statrs), seeded
//! random number generation, linear least-squares regression (over
//! nalgebra), statistics accumulators, risk statistics and 1-D root finders.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// General linear least-squares regression.
pub mod linear_least_squares;

/// Random number generators.
pub mod random_numbers;

/// 1D root-finding solvers.
pub mod solvers1d;

/// Statistics accumulators and risk statistics.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_pdf};
pub use linear_least_squares::LinearLeastSquaresRegression;
pub use random_numbers::MersenneTwisterUniformRng;
pub use statistics::Statistics;
