//! Closed-form Black-Scholes-Merton engine.
//!
//! The reference against which the lattice, the simulation engines and the
//! finite-difference Greeks are checked.

use bsm_core::{ensure, errors::Result, Rate, Real, Time, Volatility, ONE_DAY};
use bsm_instruments::{
    ExerciseType, MarketData, OptionType, PricingEngine, PricingResults, VanillaOption,
};
use bsm_math::distributions::{normal_cdf, normal_pdf};
use tracing::debug;

/// Price and sensitivities from the Black-Scholes-Merton formula, all in
/// natural units: theta per year, vega and rho per unit shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesValues {
    /// Option value.
    pub price: Real,
    /// ∂V/∂S.
    pub delta: Real,
    /// ∂²V/∂S².
    pub gamma: Real,
    /// ∂V/∂σ.
    pub vega: Real,
    /// −∂V/∂T.
    pub theta: Real,
    /// ∂V/∂r.
    pub rho: Real,
}

impl BlackScholesValues {
    fn intrinsic(phi: Real, spot: Real, strike: Real) -> Self {
        Self {
            price: (phi * (spot - strike)).max(0.0),
            delta: 0.0,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
        }
    }
}

/// Black-Scholes-Merton value of a European option with a continuous
/// dividend yield.
///
/// ```text
/// V = φ (S e^{−qT} N(φ d₁) − K e^{−rT} N(φ d₂))
/// d₁ = (ln(S/K) + (r − q + σ²/2) T) / (σ √T),   d₂ = d₁ − σ √T
/// ```
///
/// with `φ = +1` for calls and `−1` for puts. At or past expiry the
/// intrinsic value is returned with zero sensitivities.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    expiry: Time,
) -> BlackScholesValues {
    let phi = option_type.sign();
    if expiry <= 0.0 {
        return BlackScholesValues::intrinsic(phi, spot, strike);
    }

    let (r, q, t) = (risk_free_rate, dividend_yield, expiry);
    let sqrt_t = t.sqrt();
    let total_vol = volatility * sqrt_t;
    let spot_df = spot * (-q * t).exp();
    let strike_df = strike * (-r * t).exp();

    // With no spread left the option is worth its discounted forward payoff.
    let (d1, d2) = if total_vol > 1e-15 {
        let d1 = ((spot_df / strike_df).ln() + 0.5 * total_vol * total_vol) / total_vol;
        (d1, d1 - total_vol)
    } else {
        let limit = if spot_df > strike_df { 1e15 } else { -1e15 };
        (limit, limit)
    };

    let n1 = normal_cdf(phi * d1);
    let n2 = normal_cdf(phi * d2);
    let density = normal_pdf(d1);

    let gamma = if total_vol > 1e-15 {
        spot_df * density / (spot * spot * total_vol)
    } else {
        0.0
    };
    BlackScholesValues {
        price: phi * (spot_df * n1 - strike_df * n2),
        delta: phi * spot_df / spot * n1,
        gamma,
        vega: spot_df * density * sqrt_t,
        theta: -spot_df * density * volatility / (2.0 * sqrt_t) - phi * r * strike_df * n2
            + phi * q * spot_df * n1,
        rho: phi * t * strike_df * n2,
    }
}

/// European options priced in closed form.
///
/// Additional results: `delta`, `gamma`, `theta` (per calendar day),
/// `vega` and `rho` (per 1 % move).
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEuropeanEngine;

impl AnalyticEuropeanEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl PricingEngine for AnalyticEuropeanEngine {
    fn calculate(&self, option: &VanillaOption, market: &MarketData) -> Result<PricingResults> {
        ensure!(
            option.exercise_type() == ExerciseType::European,
            "closed form prices European options only, got {}",
            option.exercise_type()
        );
        market.validate()?;
        debug!(%option, %market, "Black-Scholes-Merton");

        let v = black_scholes_merton(
            option.option_type(),
            option.spot(),
            option.strike(),
            market.risk_free_rate,
            market.dividend_yield,
            market.volatility,
            option.expiry(),
        );
        Ok(PricingResults::from_npv(v.price)
            .with_result("delta", v.delta)
            .with_result("gamma", v.gamma)
            .with_result("theta", v.theta * ONE_DAY)
            .with_result("vega", v.vega / 100.0)
            .with_result("rho", v.rho / 100.0))
    }
}
