//! # bsm-pricingengines
//!
//! Pricing engines for single-asset options and the tools layered on top of
//! any engine.
//!
//! ## Engines
//!
//! - [`AnalyticEuropeanEngine`]: Black-Scholes-Merton closed form for European options
//! - [`BinomialEngine`]: CRR lattice for European, American and Bermudan options
//! - [`MonteCarloEngine`]: plain simulation for European and Asian options
//! - [`LongstaffSchwartzEngine`]: least-squares Monte Carlo for early exercise
//!
//! ## Engine-agnostic tools
//!
//! - [`FiniteDifferenceGreeks`]: bump-and-reprice sensitivities
//! - [`implied_volatility`]: Brent search for the volatility matching a price

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod implied_volatility;
pub mod longstaff_schwartz_engine;
pub mod monte_carlo_engine;
pub mod numerical_greeks;

pub use analytic_european_engine::{black_scholes_merton, AnalyticEuropeanEngine, BlackScholesValues};
pub use binomial_engine::BinomialEngine;
pub use implied_volatility::{default_engine, implied_volatility};
pub use longstaff_schwartz_engine::LongstaffSchwartzEngine;
pub use monte_carlo_engine::MonteCarloEngine;
pub use numerical_greeks::{FiniteDifferenceGreeks, Greeks};
