//! Longstaff-Schwartz least-squares Monte Carlo engine.

use bsm_core::{ensure, errors::Result, Settings, Size};
use bsm_instruments::{MarketData, PricingEngine, PricingResults, VanillaOption};
use bsm_math::MersenneTwisterUniformRng;
use bsm_methods::{exercise_mask, longstaff_schwartz, LongstaffSchwartzOutcome, PathGenerator};
use bsm_processes::BlackScholesProcess;
use tracing::debug;

/// Regression-based Monte Carlo engine for early-exercise options.
///
/// American options may stop at every interior simulation step, Bermudan
/// ones at the steps nearest their exercise times; European options reduce
/// to the discounted terminal payoff. Asian contracts are rejected.
///
/// Additional results: `regression_steps_skipped` (exercisable steps where
/// the continuation fit was not attempted or was degenerate) and
/// `early_exercise_fraction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongstaffSchwartzEngine {
    paths: Size,
    steps: Size,
    seed: u64,
}

impl LongstaffSchwartzEngine {
    /// Create an engine with `paths` paths and `steps` exercise steps.
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

    /// Run the full backward induction, keeping the cash-flow matrix.
    pub fn run(&self, option: &VanillaOption, market: &MarketData) -> Result<LongstaffSchwartzOutcome> {
        ensure!(self.paths > 0, "number of paths must be positive");
        market.validate()?;
        let process = BlackScholesProcess::new(option.spot(), market)?;
        let generator = PathGenerator::new(&process, option.expiry(), self.steps)?;
        let mask = exercise_mask(option.exercise(), generator.grid())?;

        debug!(paths = self.paths, steps = self.steps, seed = self.seed, %option, "Longstaff-Schwartz");
        let mut rng = MersenneTwisterUniformRng::new(self.seed);
        let ensemble = generator.simulate(self.paths, &mut rng)?;
        let outcome = longstaff_schwartz(&ensemble, option.payoff(), market.risk_free_rate, &mask)?;
        if outcome.skipped_steps > 0 {
            debug!(skipped = outcome.skipped_steps, "regression steps without exercise decision");
        }
        Ok(outcome)
    }
}

impl Default for LongstaffSchwartzEngine {
    fn default() -> Self {
        let d = Settings::instance().pricing_defaults();
        Self::new(d.lsm_paths, d.lsm_steps, d.seed)
    }
}

impl PricingEngine for LongstaffSchwartzEngine {
    fn calculate(&self, option: &VanillaOption, market: &MarketData) -> Result<PricingResults> {
        let outcome = self.run(option, market)?;
        Ok(PricingResults::from_npv(outcome.price)
            .with_error_estimate(outcome.std_error)
            .with_result("regression_steps_skipped", outcome.skipped_steps as f64)
            .with_result(
                "early_exercise_fraction",
                outcome.early_exercises as f64 / self.paths as f64,
            ))
    }
}
