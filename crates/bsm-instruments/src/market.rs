//! Market snapshot with constant rates.

use bsm_core::{ensure, errors::Result, Rate, Volatility};
use std::fmt;

/// Flat market parameters an option is priced against.
///
/// Overrides go through the `with_*` constructors, which return a modified
/// copy and leave `self` untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketData {
    /// Continuously compounded annual risk-free rate.
    pub risk_free_rate: Rate,
    /// Annual volatility of the underlying.
    pub volatility: Volatility,
    /// Continuously compounded annual dividend yield.
    pub dividend_yield: Rate,
}

impl MarketData {
    /// Create a market snapshot.
    pub fn new(risk_free_rate: Rate, volatility: Volatility, dividend_yield: Rate) -> Self {
        Self {
            risk_free_rate,
            volatility,
            dividend_yield,
        }
    }

    /// Copy with the volatility replaced.
    pub fn with_volatility(&self, volatility: Volatility) -> Self {
        Self { volatility, ..*self }
    }

    /// Copy with the risk-free rate replaced.
    pub fn with_rate(&self, risk_free_rate: Rate) -> Self {
        Self {
            risk_free_rate,
            ..*self
        }
    }

    /// Copy with the dividend yield replaced.
    pub fn with_dividend_yield(&self, dividend_yield: Rate) -> Self {
        Self {
            dividend_yield,
            ..*self
        }
    }

    /// Check the snapshot can drive a numerical engine: finite rates and a
    /// strictly positive, finite volatility.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.volatility.is_finite() && self.volatility > 0.0,
            "volatility must be positive, got {}",
            self.volatility
        );
        ensure!(
            self.risk_free_rate.is_finite(),
            "risk-free rate must be finite, got {}",
            self.risk_free_rate
        );
        ensure!(
            self.dividend_yield.is_finite(),
            "dividend yield must be finite, got {}",
            self.dividend_yield
        );
        Ok(())
    }
}

impl fmt::Display for MarketData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MarketData(r={}, sigma={}, q={})",
            self.risk_free_rate, self.volatility, self.dividend_yield
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_leave_the_source_untouched() {
        let m = MarketData::new(0.05, 0.2, 0.01);
        let bumped = m.with_volatility(0.25).with_rate(0.04);
        assert_eq!(m, MarketData::new(0.05, 0.2, 0.01));
        assert_eq!(bumped, MarketData::new(0.04, 0.25, 0.01));
        assert_eq!(m.with_dividend_yield(0.0).dividend_yield, 0.0);
    }

    #[test]
    fn validation() {
        assert!(MarketData::new(0.05, 0.2, 0.0).validate().is_ok());
        assert!(MarketData::new(-0.01, 0.2, 0.0).validate().is_ok());
        assert!(MarketData::new(0.05, 0.0, 0.0).validate().unwrap_err().is_invalid_input());
        assert!(MarketData::new(0.05, -0.2, 0.0).validate().is_err());
        assert!(MarketData::new(f64::NAN, 0.2, 0.0).validate().is_err());
    }
}
