//! Vanilla option contract.

use crate::exercise::{Exercise, ExerciseType};
use crate::instrument::{PricingEngine, PricingResults};
use crate::market::MarketData;
use crate::payoff::{OptionType, PlainVanillaPayoff};
use bsm_core::{ensure, errors::Result, Real, Time};
use std::fmt;

/// A single-asset option: payoff, exercise style, expiry and the current
/// price of the underlying.
///
/// Construction validates the terms. The exercise style cannot change
/// afterwards; spot and expiry vary only through [`with_spot`] and
/// [`with_expiry`], which return modified copies.
///
/// [`with_spot`]: VanillaOption::with_spot
/// [`with_expiry`]: VanillaOption::with_expiry
#[derive(Debug, Clone, PartialEq)]
pub struct VanillaOption {
    payoff: PlainVanillaPayoff,
    exercise: Exercise,
    expiry: Time,
    spot: Real,
}

fn check_spot(spot: Real) -> Result<()> {
    ensure!(
        spot.is_finite() && spot > 0.0,
        "underlying price must be positive, got {spot}"
    );
    Ok(())
}

fn check_expiry(expiry: Time) -> Result<()> {
    ensure!(
        expiry.is_finite() && expiry >= 0.0,
        "time to expiration must be non-negative, got {expiry}"
    );
    Ok(())
}

impl VanillaOption {
    /// Create a new option, validating its terms.
    pub fn new(
        option_type: OptionType,
        strike: Real,
        expiry: Time,
        exercise: Exercise,
        spot: Real,
    ) -> Result<Self> {
        ensure!(
            strike.is_finite() && strike > 0.0,
            "strike must be positive, got {strike}"
        );
        check_expiry(expiry)?;
        check_spot(spot)?;
        if let Some(last) = exercise.last_time() {
            ensure!(
                last <= expiry,
                "{} time {last} lies after expiry {expiry}",
                exercise.exercise_type()
            );
        }
        Ok(Self {
            payoff: PlainVanillaPayoff::new(option_type, strike),
            exercise,
            expiry,
            spot,
        })
    }

    /// European call/put.
    pub fn european(option_type: OptionType, strike: Real, expiry: Time, spot: Real) -> Result<Self> {
        Self::new(option_type, strike, expiry, Exercise::European, spot)
    }

    /// American call/put.
    pub fn american(option_type: OptionType, strike: Real, expiry: Time, spot: Real) -> Result<Self> {
        Self::new(option_type, strike, expiry, Exercise::American, spot)
    }

    /// Bermudan call/put exercisable at `exercise_times`.
    pub fn bermudan(
        option_type: OptionType,
        strike: Real,
        expiry: Time,
        exercise_times: Vec<Time>,
        spot: Real,
    ) -> Result<Self> {
        Self::new(option_type, strike, expiry, Exercise::bermudan(exercise_times)?, spot)
    }

    /// Arithmetic-average Asian call/put sampled at `averaging_times`.
    pub fn asian(
        option_type: OptionType,
        strike: Real,
        expiry: Time,
        averaging_times: Vec<Time>,
        spot: Real,
    ) -> Result<Self> {
        Self::new(option_type, strike, expiry, Exercise::asian(averaging_times)?, spot)
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.payoff.strike
    }

    /// The option type (call/put).
    pub fn option_type(&self) -> OptionType {
        self.payoff.option_type
    }

    /// The payoff.
    pub fn payoff(&self) -> &PlainVanillaPayoff {
        &self.payoff
    }

    /// The exercise.
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    /// Shorthand for `self.exercise().exercise_type()`.
    pub fn exercise_type(&self) -> ExerciseType {
        self.exercise.exercise_type()
    }

    /// Time to expiration in years.
    pub fn expiry(&self) -> Time {
        self.expiry
    }

    /// Current underlying price.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Whether no time value remains.
    pub fn is_expired(&self) -> bool {
        self.expiry == 0.0
    }

    /// Payoff at a single underlying price.
    pub fn payoff_at(&self, price: Real) -> Real {
        self.payoff.value(price)
    }

    /// Payoff of immediate exercise at the current spot.
    pub fn intrinsic_value(&self) -> Real {
        self.payoff_at(self.spot)
    }

    /// Copy with the underlying price replaced.
    pub fn with_spot(&self, spot: Real) -> Result<Self> {
        check_spot(spot)?;
        Ok(Self {
            spot,
            ..self.clone()
        })
    }

    /// Copy with the time to expiration replaced. Bermudan and Asian times
    /// later than the new expiry collapse onto it.
    pub fn with_expiry(&self, expiry: Time) -> Result<Self> {
        check_expiry(expiry)?;
        Ok(Self {
            exercise: self.exercise.truncated(expiry),
            expiry,
            ..self.clone()
        })
    }

    /// Price this option using the given engine.
    pub fn price(&self, engine: &dyn PricingEngine, market: &MarketData) -> Result<PricingResults> {
        engine.calculate(self, market)
    }
}

impl fmt::Display for VanillaOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Option(K={}, T={}, type={}, exercise={}, S={})",
            self.strike(),
            self.expiry,
            self.option_type(),
            self.exercise,
            self.spot
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn european_construction() {
        let o = VanillaOption::european(OptionType::Call, 100.0, 1.0, 105.0).unwrap();
        assert_eq!(o.strike(), 100.0);
        assert_eq!(o.exercise_type(), ExerciseType::European);
        assert!((o.intrinsic_value() - 5.0).abs() < 1e-15);
        assert!(!o.is_expired());
    }

    #[test]
    fn invalid_terms_are_rejected() {
        assert!(VanillaOption::european(OptionType::Call, 0.0, 1.0, 100.0).is_err());
        assert!(VanillaOption::european(OptionType::Call, 100.0, -1.0, 100.0).is_err());
        assert!(VanillaOption::european(OptionType::Put, 100.0, 1.0, 0.0).is_err());
        let err = VanillaOption::bermudan(OptionType::Put, 100.0, 1.0, vec![0.5, 1.5], 100.0)
            .unwrap_err();
        assert!(err.is_invalid_input(), "{err}");
        assert!(VanillaOption::asian(OptionType::Call, 100.0, 1.0, vec![], 100.0).is_err());
    }

    #[test]
    fn overrides_return_copies() {
        let o = VanillaOption::american(OptionType::Put, 100.0, 1.0, 100.0).unwrap();
        let bumped = o.with_spot(101.0).unwrap().with_expiry(0.5).unwrap();
        assert_eq!(o.spot(), 100.0);
        assert_eq!(o.expiry(), 1.0);
        assert_eq!(bumped.spot(), 101.0);
        assert_eq!(bumped.expiry(), 0.5);
        assert_eq!(bumped.exercise(), o.exercise());
        assert!(o.with_spot(-1.0).unwrap_err().is_invalid_input());
    }

    #[test]
    fn shortened_bermudan_stays_valid() {
        let o = VanillaOption::bermudan(OptionType::Put, 100.0, 1.0, vec![0.5, 1.0], 100.0).unwrap();
        let shorter = o.with_expiry(1.0 - bsm_core::ONE_DAY).unwrap();
        assert_eq!(shorter.exercise().last_time(), Some(1.0 - bsm_core::ONE_DAY));
        assert_eq!(shorter.exercise().times().len(), 2);
    }
}
