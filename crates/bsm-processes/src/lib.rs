//! # bsm-processes
//!
//! Stochastic processes: the [`StochasticProcess1D`] trait and the
//! constant-parameter [`BlackScholesProcess`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod black_scholes_process;
pub mod stochastic_process;

pub use black_scholes_process::BlackScholesProcess;
pub use stochastic_process::StochasticProcess1D;
