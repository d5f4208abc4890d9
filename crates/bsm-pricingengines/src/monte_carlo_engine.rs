//! Plain Monte Carlo engine for European and Asian options.

use bsm_core::{
    errors::{Error, Result},
    Settings, Size,
};
use bsm_instruments::{Exercise, MarketData, PricingEngine, PricingResults, VanillaOption};
use bsm_math::MersenneTwisterUniformRng;
use bsm_methods::{
    averaging_indices, simulate_statistics, AsianArithmeticPathPricer, EuropeanPathPricer,
    PathGenerator, PathPricer,
};
use bsm_processes::BlackScholesProcess;
use tracing::debug;

/// Monte Carlo pricing engine.
///
/// Simulates risk-neutral paths on a uniform grid and averages the
/// discounted payoff: terminal for European options, on the arithmetic mean
/// of the averaging columns for Asian ones. The error estimate is the
/// standard error of that mean. A fresh generator seeded with `seed` is
/// built for every call, so repeated calls are bit-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloEngine {
    paths: Size,
    steps: Size,
    seed: u64,
}

impl MonteCarloEngine {
    /// Create an engine with `paths` paths of `steps` steps.
    pub fn new(paths: Size, steps: Size, seed: u64) -> Self {
        Self { paths, steps, seed }
    }

    /// Number of simulated paths.
    pub fn paths(&self) -> Size {
        self.paths
    }

    /// Number of time steps per path.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Seed of the random number generator.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        let d = Settings::instance().pricing_defaults();
        Self::new(d.mc_paths, d.mc_steps, d.seed)
    }
}

impl PricingEngine for MonteCarloEngine {
    fn calculate(&self, option: &VanillaOption, market: &MarketData) -> Result<PricingResults> {
        if option.exercise().allows_early_exercise() {
            return Err(Error::InvalidInput(format!(
                "Monte Carlo engine cannot price {} exercise",
                option.exercise_type()
            )));
        }
        market.validate()?;
        let process = BlackScholesProcess::new(option.spot(), market)?;
        let generator = PathGenerator::new(&process, option.expiry(), self.steps)?;
        let discount = process.discount(option.expiry());

        let pricer: Box<dyn PathPricer> = match option.exercise() {
            Exercise::Asian(times) => Box::new(AsianArithmeticPathPricer::new(
                *option.payoff(),
                discount,
                averaging_indices(times, generator.grid())?,
            )?),
            _ => Box::new(EuropeanPathPricer::new(*option.payoff(), discount)),
        };

        debug!(paths = self.paths, steps = self.steps, seed = self.seed, %option, "Monte Carlo");
        let mut rng = MersenneTwisterUniformRng::new(self.seed);
        let ensemble = generator.simulate(self.paths, &mut rng)?;
        let stats = simulate_statistics(&ensemble, pricer.as_ref());

        let npv = stats
            .mean()
            .ok_or_else(|| Error::Runtime("no simulated paths".into()))?;
        Ok(PricingResults::from_npv(npv).with_error_estimate(stats.error_estimate().unwrap_or(0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european_engine::AnalyticEuropeanEngine;
    use bsm_instruments::OptionType;

    fn market() -> MarketData {
        MarketData::new(0.05, 0.2, 0.01)
    }

    #[test]
    fn european_within_three_standard_errors() {
        let option = VanillaOption::european(OptionType::Put, 105.0, 0.75, 100.0).unwrap();
        let r = MonteCarloEngine::new(50_000, 10, 42).calculate(&option, &market()).unwrap();
        let analytic = AnalyticEuropeanEngine.npv(&option, &market()).unwrap();
        let se = r.error_estimate.unwrap();
        assert!(se > 0.0);
        assert!((r.npv - analytic).abs() < 3.0 * se, "{} ± {se} vs {analytic}", r.npv);
    }

    #[test]
    fn asian_call_cheaper_than_european() {
        let m = market();
        let engine = MonteCarloEngine::new(20_000, 12, 7);
        let times: Vec<_> = (1..=12).map(|i| i as f64 / 12.0).collect();
        let asian = VanillaOption::asian(OptionType::Call, 100.0, 1.0, times, 100.0).unwrap();
        let european = VanillaOption::european(OptionType::Call, 100.0, 1.0, 100.0).unwrap();
        let a = engine.npv(&asian, &m).unwrap();
        let e = engine.npv(&european, &m).unwrap();
        assert!(a > 0.0 && a < e, "asian {a}, european {e}");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let option = VanillaOption::european(OptionType::Call, 100.0, 1.0, 100.0).unwrap();
        let engine = MonteCarloEngine::new(1000, 5, 99);
        assert_eq!(
            engine.calculate(&option, &market()).unwrap(),
            engine.calculate(&option, &market()).unwrap()
        );
    }

    #[test]
    fn early_exercise_and_bad_counts_are_rejected() {
        let m = market();
        let american = VanillaOption::american(OptionType::Put, 100.0, 1.0, 100.0).unwrap();
        assert!(MonteCarloEngine::new(100, 10, 1).calculate(&american, &m).unwrap_err().is_invalid_input());
        let european = VanillaOption::european(OptionType::Put, 100.0, 1.0, 100.0).unwrap();
        assert!(MonteCarloEngine::new(0, 10, 1).calculate(&european, &m).unwrap_err().is_invalid_input());
        assert!(MonteCarloEngine::new(100, 0, 1).calculate(&european, &m).unwrap_err().is_invalid_input());
    }
}
