//! Pricing results and the pricing engine capability.

use crate::market::MarketData;
use crate::option::VanillaOption;
use bsm_core::{errors::Result, Real};
use std::collections::HashMap;

/// What an engine returns: the value, a standard error for simulation
/// engines, and engine-specific named figures such as closed-form Greeks or
/// exercise diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingResults {
    /// Present value.
    pub npv: Real,
    /// Standard error of `npv`, when it is an estimate.
    pub error_estimate: Option<Real>,
    /// Named engine-specific figures.
    pub additional_results: HashMap<String, Real>,
}

impl PricingResults {
    /// Results carrying only a value.
    pub fn from_npv(npv: Real) -> Self {
        Self {
            npv,
            error_estimate: None,
            additional_results: HashMap::new(),
        }
    }

    /// Attach an error estimate.
    pub fn with_error_estimate(mut self, error: Real) -> Self {
        self.error_estimate = Some(error);
        self
    }

    /// Record a named figure.
    pub fn with_result(mut self, key: impl Into<String>, value: Real) -> Self {
        self.additional_results.insert(key.into(), value);
        self
    }

    /// Look up a named result.
    pub fn result(&self, key: &str) -> Option<Real> {
        self.additional_results.get(key).copied()
    }
}

/// The single capability every engine offers.
///
/// An engine is a pure function of the contract and the market snapshot: it
/// never mutates either, and the same inputs always give the same result.
pub trait PricingEngine: std::fmt::Debug + Send + Sync {
    /// Price `option` against `market`.
    fn calculate(&self, option: &VanillaOption, market: &MarketData) -> Result<PricingResults>;

    /// Shorthand for the NPV of [`calculate`](PricingEngine::calculate).
    fn npv(&self, option: &VanillaOption, market: &MarketData) -> Result<Real> {
        self.calculate(option, market).map(|r| r.npv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::OptionType;

    #[test]
    fn results_accumulate_named_figures() {
        let r = PricingResults::from_npv(42.0)
            .with_result("delta", 0.55)
            .with_result("gamma", 0.02)
            .with_result("delta", 0.6)
            .with_error_estimate(0.1);
        assert_eq!(r.npv, 42.0);
        assert_eq!(r.additional_results.len(), 2);
        assert_eq!(r.result("delta"), Some(0.6));
        assert_eq!(r.result("gamma"), Some(0.02));
        assert_eq!(r.result("vega"), None);
        assert_eq!(r.error_estimate, Some(0.1));
    }

    #[derive(Debug)]
    struct IntrinsicEngine;

    impl PricingEngine for IntrinsicEngine {
        fn calculate(&self, option: &VanillaOption, _: &MarketData) -> Result<PricingResults> {
            Ok(PricingResults::from_npv(option.intrinsic_value()))
        }
    }

    #[test]
    fn engines_are_object_safe() {
        let engine: Box<dyn PricingEngine> = Box::new(IntrinsicEngine);
        let o = VanillaOption::european(OptionType::Put, 100.0, 1.0, 90.0).unwrap();
        let m = MarketData::new(0.05, 0.2, 0.0);
        assert_eq!(engine.npv(&o, &m).unwrap(), 10.0);
        assert_eq!(o.price(engine.as_ref(), &m).unwrap().npv, 10.0);
    }
}
