//! # bsm-core
//!
//! Core types, error definitions and process-wide settings for bsm-rs.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace: type aliases, the error taxonomy with its
//! `ensure!` family of macros, and the [`Settings`] singleton that holds the
//! default numerical parameters of the pricing engines.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_finite!` / `fail!` macros.
pub mod errors;

/// Process-wide pricing defaults.
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

/// Length of one calendar day in years, as used for theta.
pub const ONE_DAY: Time = 1.0 / 365.0;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::{PricingDefaults, ScopedPricingDefaults, Settings};
