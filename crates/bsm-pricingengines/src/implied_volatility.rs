//! Implied volatility by root search over any pricing engine.

use crate::{AnalyticEuropeanEngine, BinomialEngine, MonteCarloEngine};
use bsm_core::{
    ensure,
    errors::{Error, Result},
    Real, Volatility,
};
use bsm_instruments::{ExerciseType, MarketData, PricingEngine, VanillaOption};
use bsm_math::solvers1d::brent;
use tracing::{debug, warn};

/// Volatility brackets tried in order.
const BRACKETS: [(Volatility, Volatility); 2] = [(0.001, 5.0), (0.0001, 10.0)];

/// Default accuracy of the volatility search.
pub const DEFAULT_ACCURACY: Real = 1e-6;

/// The engine used when none is given: analytic for European options, a
/// lattice for early exercise and simulation for Asian averaging.
pub fn default_engine(option: &VanillaOption) -> Box<dyn PricingEngine> {
    match option.exercise_type() {
        ExerciseType::European => Box::new(AnalyticEuropeanEngine),
        ExerciseType::American | ExerciseType::Bermudan => Box::<BinomialEngine>::default(),
        ExerciseType::Asian => Box::<MonteCarloEngine>::default(),
    }
}

/// Volatility at which `engine` prices `option` at `target_price`.
///
/// Brent's method runs on `[0.001, 5]` first and on `[0.0001, 10]` if the
/// first bracket holds no sign change. A non-positive `accuracy` selects
/// [`DEFAULT_ACCURACY`]. Fails with [`Error::ConvergenceFailure`] when
/// neither bracket contains the target.
///
/// Lattice engines cannot build a tree for volatilities too small against
/// the drift; the lower end of a bracket is doubled until the engine prices
/// it.
pub fn implied_volatility(
    option: &VanillaOption,
    market: &MarketData,
    target_price: Real,
    engine: &dyn PricingEngine,
    accuracy: Real,
) -> Result<Volatility> {
    ensure!(
        target_price.is_finite() && target_price > 0.0,
        "target price must be positive, got {target_price}"
    );
    let accuracy = if accuracy > 0.0 { accuracy } else { DEFAULT_ACCURACY };
    let objective = |sigma: Volatility| -> Result<Real> {
        Ok(engine.npv(option, &market.with_volatility(sigma))? - target_price)
    };

    let mut last_failure = None;
    for (low, high) in BRACKETS {
        let low = lowest_priceable(&objective, low, high)?;
        match brent(&objective, low, high, accuracy) {
            Ok(sigma) => {
                debug!(sigma, target_price, "implied volatility found");
                return Ok(sigma);
            }
            Err(Error::ConvergenceFailure(reason)) => {
                warn!(low, high, %reason, "implied volatility bracket failed");
                last_failure = Some(reason);
            }
            Err(e) => return Err(e),
        }
    }
    Err(Error::ConvergenceFailure(format!(
        "implied volatility for price {target_price} not found: {}",
        last_failure.unwrap_or_default()
    )))
}

fn lowest_priceable<F>(objective: F, low: Volatility, high: Volatility) -> Result<Volatility>
where
    F: Fn(Volatility) -> Result<Real>,
{
    let mut sigma = low;
    loop {
        match objective(sigma) {
            Ok(_) => return Ok(sigma),
            Err(e) if e.is_numerical_degeneracy() && 2.0 * sigma < high => {
                debug!(sigma, "engine degenerate at low volatility, raising bracket");
                sigma *= 2.0;
            }
            Err(e) => return Err(e),
        }
    }
}
