//! # bsm
//!
//! Option pricing under the Black-Scholes-Merton model: binomial lattices,
//! least-squares Monte Carlo, finite-difference Greeks and implied
//! volatility.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `bsm-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use bsm::instruments::{MarketData, OptionType, VanillaOption};
//! use bsm::pricingengines::{AnalyticEuropeanEngine, BinomialEngine};
//!
//! let option = VanillaOption::american(OptionType::Put, 100.0, 1.0, 100.0).unwrap();
//! let market = MarketData::new(0.05, 0.2, 0.0);
//! let american = option.price(&BinomialEngine::new(200), &market).unwrap().npv;
//!
//! let european = VanillaOption::european(OptionType::Put, 100.0, 1.0, 100.0).unwrap();
//! let closed_form = european.price(&AnalyticEuropeanEngine, &market).unwrap().npv;
//! assert!(american > closed_form);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error definitions and settings.
pub use bsm_core as core;

/// Normal distribution, regression, random numbers, solvers and statistics.
pub use bsm_math as math;

/// Payoffs, exercise styles, market data and the option contract.
pub use bsm_instruments as instruments;

/// Stochastic process definitions.
pub use bsm_processes as processes;

/// Lattice and Monte Carlo numerical methods.
pub use bsm_methods as methods;

/// Pricing engines, Greeks and implied volatility.
pub use bsm_pricingengines as pricingengines;

pub use bsm_core::{Error, Result};
