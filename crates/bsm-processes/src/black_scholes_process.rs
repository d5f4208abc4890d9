//! Black-Scholes-Merton process with constant parameters.
//!
//! `dS/S = (r − q) dt + σ dW`
//!
//! where `r` is the risk-free rate, `q` the continuous dividend yield and
//! `σ` the volatility, all flat.

use crate::stochastic_process::StochasticProcess1D;
use bsm_core::{errors::Result, DiscountFactor, Rate, Real, Time, Volatility};
use bsm_instruments::MarketData;

/// A Black-Scholes-Merton process with flat rate, yield and volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesProcess {
    x0: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
}

impl BlackScholesProcess {
    /// Create a process starting at `spot` driven by `market`.
    ///
    /// Fails with invalid input when the market cannot drive a numerical
    /// method (non-positive volatility, non-finite rates).
    pub fn new(spot: Real, market: &MarketData) -> Result<Self> {
        market.validate()?;
        bsm_core::ensure!(
            spot.is_finite() && spot > 0.0,
            "spot must be positive, got {spot}"
        );
        Ok(Self {
            x0: spot,
            risk_free_rate: market.risk_free_rate,
            dividend_yield: market.dividend_yield,
            volatility: market.volatility,
        })
    }

    /// The risk-free rate.
    pub fn risk_free_rate(&self) -> Rate {
        self.risk_free_rate
    }

    /// The dividend yield.
    pub fn dividend_yield(&self) -> Rate {
        self.dividend_yield
    }

    /// The volatility.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Risk-neutral growth rate `r − q`.
    pub fn carry(&self) -> Rate {
        self.risk_free_rate - self.dividend_yield
    }

    /// Risk-free discount factor over `t`.
    pub fn discount(&self, t: Time) -> DiscountFactor {
        (-self.risk_free_rate * t).exp()
    }

    /// Log-price drift `r − q − σ²/2`.
    pub fn log_drift(&self) -> Real {
        self.carry() - 0.5 * self.volatility * self.volatility
    }
}

impl StochasticProcess1D for BlackScholesProcess {
    fn x0(&self) -> Real {
        self.x0
    }

    fn drift_1d(&self, _t: Time, x: Real) -> Real {
        self.carry() * x
    }

    fn diffusion_1d(&self, _t: Time, x: Real) -> Real {
        self.volatility * x
    }

    fn expectation_1d(&self, _t: Time, x: Real, dt: Time) -> Real {
        x * (self.carry() * dt).exp()
    }

    fn evolve_1d(&self, _t: Time, x: Real, dt: Time, dw: Real) -> Real {
        // Exact log-normal step: S(t+dt) = S(t) exp((r − q − σ²/2)dt + σ√dt·dw)
        x * (self.log_drift() * dt + self.volatility * dt.sqrt() * dw).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn make_bsm() -> BlackScholesProcess {
        BlackScholesProcess::new(100.0, &MarketData::new(0.05, 0.20, 0.02)).unwrap()
    }

    #[test]
    fn parameters() {
        let p = make_bsm();
        assert_eq!(p.x0(), 100.0);
        assert_abs_diff_eq!(p.carry(), 0.03, epsilon = 1e-15);
        assert_abs_diff_eq!(p.log_drift(), 0.01, epsilon = 1e-15);
        assert_abs_diff_eq!(p.discount(1.0), (-0.05_f64).exp(), epsilon = 1e-15);
        assert_abs_diff_eq!(p.diffusion_1d(0.0, 100.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.variance_1d(0.0, 100.0, 0.25), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn evolve_is_exact_lognormal() {
        let p = make_bsm();
        let dt = 0.5;
        let s = p.evolve_1d(0.0, 100.0, dt, 0.0);
        assert_abs_diff_eq!(s, 100.0 * (0.01 * dt).exp(), epsilon = 1e-12);
        let up = p.evolve_1d(0.0, 100.0, dt, 1.0);
        let down = p.evolve_1d(0.0, 100.0, dt, -1.0);
        assert_abs_diff_eq!(up * down, s * s, epsilon = 1e-9);
        assert_abs_diff_eq!(p.expectation_1d(0.0, 100.0, 1.0), 100.0 * 0.03_f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_market() {
        let err = BlackScholesProcess::new(100.0, &MarketData::new(0.05, 0.0, 0.0)).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(BlackScholesProcess::new(-1.0, &MarketData::new(0.05, 0.2, 0.0)).is_err());
    }
}
