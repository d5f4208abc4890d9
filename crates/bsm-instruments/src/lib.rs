//! # bsm-instruments
//!
//! Option contracts and the market snapshot they are priced against, plus
//! the [`PricingEngine`] capability every engine implements.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod exercise;
pub mod instrument;
pub mod market;
pub mod option;
pub mod payoff;

pub use exercise::{Exercise, ExerciseType};
pub use instrument::{PricingEngine, PricingResults};
pub use market::MarketData;
pub use option::VanillaOption;
pub use payoff::{OptionType, PlainVanillaPayoff};
