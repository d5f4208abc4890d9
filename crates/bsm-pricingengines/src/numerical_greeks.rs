//! Finite-difference Greeks for any pricing engine.
//!
//! Every sensitivity re-prices a copy of the contract or market with one
//! field bumped; the caller's objects are never touched. Symmetric
//! differences are used for delta, gamma, vega and rho, a one-sided
//! difference for theta.

use bsm_core::{errors::Result, Real, Settings, ONE_DAY};
use bsm_instruments::{MarketData, PricingEngine, VanillaOption};
use tracing::debug;

/// Magnitude below which a bump becomes absolute instead of relative.
const ZERO_THRESHOLD: Real = 1e-8;

/// Finite-difference sensitivities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Greeks {
    /// ∂V/∂S.
    pub delta: Real,
    /// ∂²V/∂S².
    pub gamma: Real,
    /// `(V(T − 1 day) − V(T)) / 1 day`, in value per year of elapsed time.
    pub theta: Real,
    /// ∂V/∂σ per 1 % volatility.
    pub vega: Real,
    /// ∂V/∂r per 1 % rate.
    pub rho: Real,
}

/// Bumped points around `x` and the half-width used as denominator.
///
/// Relative `x(1 ± h)` normally; absolute `x ± h` when `x` is (close to)
/// zero, where a relative bump would collapse onto `x`.
fn bump(x: Real, h: Real) -> (Real, Real, Real) {
    if x.abs() < ZERO_THRESHOLD {
        (x + h, x - h, h)
    } else {
        (x * (1.0 + h), x * (1.0 - h), x * h)
    }
}

/// Bump-and-reprice Greeks estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifferenceGreeks {
    bump: Real,
}

impl FiniteDifferenceGreeks {
    /// Create an estimator with relative bump size `bump`.
    pub fn new(bump: Real) -> Result<Self> {
        bsm_core::ensure!(
            bump.is_finite() && bump > 0.0 && bump < 1.0,
            "bump size must lie in (0, 1), got {bump}"
        );
        Ok(Self { bump })
    }

    /// Relative bump size.
    pub fn bump(&self) -> Real {
        self.bump
    }

    /// All five Greeks; the base and spot-bumped prices are shared between
    /// delta, gamma and theta.
    pub fn calculate(
        &self,
        engine: &dyn PricingEngine,
        option: &VanillaOption,
        market: &MarketData,
    ) -> Result<Greeks> {
        let base = engine.npv(option, market)?;
        let (delta, gamma) = self.spot_sensitivities(engine, option, market, base)?;
        let greeks = Greeks {
            delta,
            gamma,
            theta: self.theta_from(engine, option, market, base)?,
            vega: self.vega(engine, option, market)?,
            rho: self.rho(engine, option, market)?,
        };
        debug!(?greeks, bump = self.bump, "finite-difference Greeks");
        Ok(greeks)
    }

    /// Delta: `(P(S(1+h)) − P(S(1−h))) / (2Sh)`.
    pub fn delta(&self, engine: &dyn PricingEngine, option: &VanillaOption, market: &MarketData) -> Result<Real> {
        let (up, down, width) = bump(option.spot(), self.bump);
        let p_up = engine.npv(&option.with_spot(up)?, market)?;
        let p_down = engine.npv(&option.with_spot(down)?, market)?;
        Ok((p_up - p_down) / (2.0 * width))
    }

    /// Gamma: `(P(S(1+h)) − 2P(S) + P(S(1−h))) / (Sh)²`.
    pub fn gamma(&self, engine: &dyn PricingEngine, option: &VanillaOption, market: &MarketData) -> Result<Real> {
        let base = engine.npv(option, market)?;
        self.spot_sensitivities(engine, option, market, base).map(|(_, gamma)| gamma)
    }

    /// Theta: `(P(T − 1/365) − P(T)) / (1/365)`.
    ///
    /// When less than a day remains the bump stops at expiry, where the
    /// value is the intrinsic payoff, and the difference is divided by the
    /// remaining time instead.
    pub fn theta(&self, engine: &dyn PricingEngine, option: &VanillaOption, market: &MarketData) -> Result<Real> {
        let base = engine.npv(option, market)?;
        self.theta_from(engine, option, market, base)
    }

    /// Vega per 1 %: `(P(σ(1+h)) − P(σ(1−h))) / (2σh · 100)`.
    pub fn vega(&self, engine: &dyn PricingEngine, option: &VanillaOption, market: &MarketData) -> Result<Real> {
        let (up, down, width) = bump(market.volatility, self.bump);
        let p_up = engine.npv(option, &market.with_volatility(up))?;
        let p_down = engine.npv(option, &market.with_volatility(down))?;
        Ok((p_up - p_down) / (2.0 * width * 100.0))
    }

    /// Rho per 1 %: `(P(r(1+h)) − P(r(1−h))) / (2rh · 100)`.
    pub fn rho(&self, engine: &dyn PricingEngine, option: &VanillaOption, market: &MarketData) -> Result<Real> {
        let (up, down, width) = bump(market.risk_free_rate, self.bump);
        let p_up = engine.npv(option, &market.with_rate(up))?;
        let p_down = engine.npv(option, &market.with_rate(down))?;
        Ok((p_up - p_down) / (2.0 * width * 100.0))
    }

    fn spot_sensitivities(
        &self,
        engine: &dyn PricingEngine,
        option: &VanillaOption,
        market: &MarketData,
        base: Real,
    ) -> Result<(Real, Real)> {
        let (up, down, width) = bump(option.spot(), self.bump);
        let p_up = engine.npv(&option.with_spot(up)?, market)?;
        let p_down = engine.npv(&option.with_spot(down)?, market)?;
        let delta = (p_up - p_down) / (2.0 * width);
        let gamma = (p_up - 2.0 * base + p_down) / (width * width);
        Ok((delta, gamma))
    }

    fn theta_from(
        &self,
        engine: &dyn PricingEngine,
        option: &VanillaOption,
        market: &MarketData,
        base: Real,
    ) -> Result<Real> {
        let expiry = option.expiry();
        if option.is_expired() {
            Ok(0.0)
        } else if expiry > ONE_DAY {
            let shorter = engine.npv(&option.with_expiry(expiry - ONE_DAY)?, market)?;
            Ok((shorter - base) / ONE_DAY)
        } else {
            Ok((option.intrinsic_value() - base) / expiry)
        }
    }
}

impl Default for FiniteDifferenceGreeks {
    fn default() -> Self {
        Self {
            bump: Settings::instance().pricing_defaults().greeks_bump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european_engine::AnalyticEuropeanEngine;
    use crate::binomial_engine::BinomialEngine;
    use approx::assert_abs_diff_eq;
    use bsm_instruments::OptionType;
    use proptest::prelude::*;

    fn fd() -> FiniteDifferenceGreeks {
        FiniteDifferenceGreeks::new(1e-3).unwrap()
    }

    #[test]
    fn matches_analytic_greeks() {
        let option = VanillaOption::european(OptionType::Call, 100.0, 1.0, 100.0).unwrap();
        let market = MarketData::new(0.05, 0.2, 0.02);
        let engine = AnalyticEuropeanEngine;
        let g = fd().calculate(&engine, &option, &market).unwrap();
        let a = engine.calculate(&option, &market).unwrap();
        assert_abs_diff_eq!(g.delta, a.result("delta").unwrap(), epsilon = 1e-6);
        assert_abs_diff_eq!(g.gamma, a.result("gamma").unwrap(), epsilon = 1e-5);
        assert_abs_diff_eq!(g.vega, a.result("vega").unwrap(), epsilon = 1e-6);
        assert_abs_diff_eq!(g.rho, a.result("rho").unwrap(), epsilon = 1e-6);
        // One-sided, per year; the analytic value is per day.
        assert_abs_diff_eq!(g.theta * ONE_DAY, a.result("theta").unwrap(), epsilon = 1e-4);
    }

    #[test]
    fn short_dated_theta_uses_intrinsic_value() {
        // Less than a day left: the bump lands on expiry, which a lattice
        // could not price.
        let option = VanillaOption::american(OptionType::Put, 100.0, 0.5 * ONE_DAY, 100.0).unwrap();
        let market = MarketData::new(0.05, 0.2, 0.0);
        let snapshot = (option.clone(), market);
        let engine = BinomialEngine::new(50);
        let theta = fd().theta(&engine, &option, &market).unwrap();
        assert!(theta < 0.0, "theta = {theta}");
        assert_eq!((option, market), snapshot);
    }

    #[test]
    fn expired_option_has_no_theta() {
        let option = VanillaOption::european(OptionType::Call, 90.0, 0.0, 100.0).unwrap();
        assert!(option.is_expired());
        let theta = fd()
            .theta(&AnalyticEuropeanEngine, &option, &MarketData::new(0.05, 0.2, 0.0))
            .unwrap();
        assert_eq!(theta, 0.0);
    }

    #[test]
    fn zero_rate_uses_absolute_bump() {
        let option = VanillaOption::european(OptionType::Call, 100.0, 1.0, 100.0).unwrap();
        let market = MarketData::new(0.0, 0.2, 0.0);
        let engine = AnalyticEuropeanEngine;
        let rho = fd().rho(&engine, &option, &market).unwrap();
        assert!(rho.is_finite() && rho > 0.0);
        assert_abs_diff_eq!(rho, engine.calculate(&option, &market).unwrap().result("rho").unwrap(), epsilon = 1e-6);
    }

    #[test]
    fn engine_errors_propagate() {
        let option = VanillaOption::american(OptionType::Put, 100.0, 1.0, 100.0).unwrap();
        let market = MarketData::new(0.05, 0.2, 0.0);
        let err = fd().calculate(&AnalyticEuropeanEngine, &option, &market).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn bump_must_be_a_fraction() {
        assert!(FiniteDifferenceGreeks::new(0.0).is_err());
        assert!(FiniteDifferenceGreeks::new(1.5).is_err());
        assert_eq!(fd().bump(), 1e-3);
    }

    proptest! {
        #[test]
        fn delta_is_bounded_by_the_dividend_discount(
            strike in 50.0..200.0f64,
            volatility in 0.05..0.8f64,
            expiry in 0.05..3.0f64,
        ) {
            let market = MarketData::new(0.05, volatility, 0.03);
            let carry = (-0.03 * expiry).exp();
            let call = VanillaOption::european(OptionType::Call, strike, expiry, 100.0).unwrap();
            let put = VanillaOption::european(OptionType::Put, strike, expiry, 100.0).unwrap();
            let call_delta = fd().delta(&AnalyticEuropeanEngine, &call, &market).unwrap();
            let put_delta = fd().delta(&AnalyticEuropeanEngine, &put, &market).unwrap();
            prop_assert!((-1e-9..=carry + 1e-9).contains(&call_delta), "call delta {}", call_delta);
            prop_assert!((-carry - 1e-9..=1e-9).contains(&put_delta), "put delta {}", put_delta);
        }
    }
}
