//! # bsm-methods
//!
//! Numerical methods: the recombining binomial lattice with exercise masks,
//! risk-neutral path simulation, and Longstaff-Schwartz backward induction.
//!
//! # Modules
//!
//! * [`lattice`]: time grids, exercise masks, the CRR tree and backward
//!   induction
//! * [`monte_carlo`]: path ensembles, path pricers and the regression-based
//!   optimal stopping rule

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: time grids, binomial trees, backward induction.
pub mod lattice;

/// Monte Carlo simulation: path generation, pricing, regression exercise.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{exercise_mask, rollback, BinomialTree, TimeGrid};
pub use monte_carlo::{
    averaging_indices, longstaff_schwartz, simulate_statistics, AsianArithmeticPathPricer,
    EuropeanPathPricer, LongstaffSchwartzOutcome, PathEnsemble, PathGenerator, PathPricer,
};
