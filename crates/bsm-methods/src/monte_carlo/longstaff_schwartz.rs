//! Longstaff-Schwartz least-squares Monte Carlo.
//!
//! Backward induction over a simulated [`PathEnsemble`]: at every
//! exercisable step the continuation value of in-the-money paths is
//! estimated by regressing the realized, discounted future cash flow on
//! `[1, S/K, (S/K)²]`, and a path exercises when its immediate payoff
//! strictly exceeds that estimate.

use super::PathEnsemble;
use bsm_core::{
    ensure, ensure_finite,
    errors::{Error, Result},
    Rate, Real,
};
use bsm_instruments::PlainVanillaPayoff;
use bsm_math::{LinearLeastSquaresRegression, Statistics};
use nalgebra::DMatrix;
use tracing::{debug, warn};

/// Fewest in-the-money paths for which a quadratic fit is attempted.
const MIN_REGRESSION_PATHS: usize = 3;

/// Result of a Longstaff-Schwartz run.
#[derive(Debug, Clone)]
pub struct LongstaffSchwartzOutcome {
    /// Mean discounted cash flow over all paths.
    pub price: Real,
    /// Standard error of `price`.
    pub std_error: Real,
    /// Undiscounted cash flows, `paths × (steps + 1)`; each row holds at
    /// most one non-zero cell, at the time the path stops.
    pub cash_flows: DMatrix<Real>,
    /// Exercisable steps where the regression was skipped.
    pub skipped_steps: usize,
    /// Paths that stopped before expiry.
    pub early_exercises: usize,
}

/// Run the Longstaff-Schwartz algorithm.
///
/// `exercise_mask[t]` allows exercise at time index `t`; only indices
/// `1..steps` are consulted, since there is no decision at the valuation
/// time and expiry always pays. Rates are continuously compounded.
pub fn longstaff_schwartz(
    ensemble: &PathEnsemble,
    payoff: &PlainVanillaPayoff,
    risk_free_rate: Rate,
    exercise_mask: &[bool],
) -> Result<LongstaffSchwartzOutcome> {
    let paths = ensemble.paths();
    let steps = ensemble.steps();
    ensure!(
        exercise_mask.len() == steps + 1,
        "exercise mask has {} entries for {} time points",
        exercise_mask.len(),
        steps + 1
    );
    let dt = ensemble.dt();
    let step_discount = (-risk_free_rate * dt).exp();
    let strike = payoff.strike;

    let mut cash_flows = DMatrix::zeros(paths, steps + 1);
    let mut stop = vec![steps; paths];
    // Realized cash flow of each path, discounted to the current step.
    let mut realized = Vec::with_capacity(paths);
    for p in 0..paths {
        let cf = payoff.value(ensemble.terminal(p));
        cash_flows[(p, steps)] = cf;
        realized.push(cf);
    }

    let mut skipped_steps = 0;
    let mut early_exercises = 0;
    for t in (1..steps).rev() {
        realized.iter_mut().for_each(|v| *v *= step_discount);
        if !exercise_mask[t] {
            continue;
        }

        let itm: Vec<usize> = (0..paths)
            .filter(|&p| payoff.option_type.is_in_the_money(ensemble.value(p, t), strike))
            .collect();
        if itm.len() < MIN_REGRESSION_PATHS {
            debug!(step = t, itm = itm.len(), "too few in-the-money paths, no exercise");
            skipped_steps += 1;
            continue;
        }

        let design = DMatrix::from_fn(itm.len(), 3, |k, j| {
            (ensemble.value(itm[k], t) / strike).powi(j as i32)
        });
        let targets: Vec<Real> = itm.iter().map(|&p| realized[p]).collect();
        let fit = match LinearLeastSquaresRegression::from_design_matrix(design, &targets) {
            Ok(fit) => fit,
            Err(Error::NumericalDegeneracy(reason)) => {
                warn!(step = t, %reason, "continuation regression skipped");
                skipped_steps += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        for (&p, &continuation) in itm.iter().zip(fit.fitted_values()) {
            let exercise = payoff.value(ensemble.value(p, t));
            if exercise > continuation {
                cash_flows[(p, stop[p])] = 0.0;
                cash_flows[(p, t)] = exercise;
                if stop[p] == steps {
                    early_exercises += 1;
                }
                stop[p] = t;
                realized[p] = exercise;
            }
        }
    }

    let mut stats = Statistics::new();
    stats.add_all((0..paths).map(|p| {
        let t = stop[p];
        cash_flows[(p, t)] * (-risk_free_rate * t as Real * dt).exp()
    }));
    let price = stats.mean().unwrap_or(0.0);
    ensure_finite!(price, "regression engine produced a non-finite price");

    Ok(LongstaffSchwartzOutcome {
        price,
        std_error: stats.error_estimate().unwrap_or(0.0),
        cash_flows,
        skipped_steps,
        early_exercises,
    })
}
