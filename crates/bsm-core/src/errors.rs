//! Error types for bsm-rs.
//!
//! A single `thiserror`-derived enum covers the three failure classes of the
//! pricing engines (invalid input, numerical degeneracy, convergence
//! failure) plus a catch-all runtime variant. The `ensure!`,
//! `ensure_finite!` and `fail!` macros keep precondition checks on one line.

use thiserror::Error;

/// The top-level error type used throughout bsm-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Invalid caller input: bad contract terms, non-positive volatility,
    /// zero step or path counts, or an exercise style an engine cannot price.
    ///
    /// Always raised before any computation starts.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The numerical configuration cannot produce a finite, deterministic
    /// result (degenerate lattice, singular regression, NaN/Inf).
    #[error("numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    /// An iterative search failed to bracket or reach a solution.
    #[error("convergence failure: {0}")]
    ConvergenceFailure(String),

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// Whether this error reports invalid caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Whether this error reports a numerically degenerate configuration.
    pub fn is_numerical_degeneracy(&self) -> bool {
        matches!(self, Error::NumericalDegeneracy(_))
    }
}

/// Shorthand `Result` type used throughout bsm-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Precondition check on caller input.
///
/// Returns `Err(Error::InvalidInput(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use bsm_core::{ensure, errors::Error};
/// fn positive(x: f64) -> bsm_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidInput(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidInput(
                format!($($msg)*)
            ));
        }
    };
}

/// Rejects a non-finite intermediate or final value.
///
/// Returns `Err(Error::NumericalDegeneracy(...))` if `$value` is NaN or
/// infinite.
///
/// # Example
/// ```
/// use bsm_core::{ensure_finite, errors::Error};
/// fn ratio(a: f64, b: f64) -> bsm_core::errors::Result<f64> {
///     let r = a / b;
///     ensure_finite!(r, "ratio {a}/{b} is not finite");
///     Ok(r)
/// }
/// assert!(ratio(1.0, 2.0).is_ok());
/// assert!(matches!(ratio(1.0, 0.0), Err(Error::NumericalDegeneracy(_))));
/// ```
#[macro_export]
macro_rules! ensure_finite {
    ($value:expr, $($msg:tt)*) => {
        if !$value.is_finite() {
            return Err($crate::errors::Error::NumericalDegeneracy(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use bsm_core::{fail, errors::Error};
/// fn always_err() -> bsm_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
