//! Monte Carlo simulation framework.
//!
//! # Overview
//!
//! * [`PathGenerator`]: simulates an ensemble of paths of a 1-D process on
//!   a uniform grid from an injected random source
//! * [`PathEnsemble`]: the simulated prices, one row per path
//! * [`PathPricer`]: evaluates a discounted payoff on one path
//! * [`simulate_statistics`]: collects pricer values over an ensemble
//! * [`longstaff_schwartz`]: regression-based optimal stopping

pub mod longstaff_schwartz;

pub use longstaff_schwartz::{longstaff_schwartz, LongstaffSchwartzOutcome};

use crate::lattice::TimeGrid;
use bsm_core::{
    ensure,
    errors::{Error, Result},
    Real, Time,
};
use bsm_instruments::PlainVanillaPayoff;
use bsm_math::Statistics;
use bsm_processes::StochasticProcess1D;
use nalgebra::DMatrix;
use rand::Rng;
use rand_distr::StandardNormal;

// ─── PathEnsemble ─────────────────────────────────────────────────────────────

/// Simulated prices: `paths × (steps + 1)`, column 0 holding the spot.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    values: DMatrix<Real>,
    grid: TimeGrid,
}

impl PathEnsemble {
    /// Number of paths (rows).
    pub fn paths(&self) -> usize {
        self.values.nrows()
    }

    /// Number of time steps (columns − 1).
    pub fn steps(&self) -> usize {
        self.grid.steps()
    }

    /// The simulation grid.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Time step.
    pub fn dt(&self) -> Time {
        self.grid.dt()
    }

    /// Price of `path` at time index `t`.
    pub fn value(&self, path: usize, t: usize) -> Real {
        self.values[(path, t)]
    }

    /// Final price of `path`.
    pub fn terminal(&self, path: usize) -> Real {
        self.values[(path, self.steps())]
    }

    /// The full price matrix.
    pub fn matrix(&self) -> &DMatrix<Real> {
        &self.values
    }
}

// ─── PathGenerator ────────────────────────────────────────────────────────────

/// Generates sample paths of a 1-D stochastic process.
///
/// Uses the process's `evolve_1d` method to step forward from the initial
/// value through a uniform time grid, one standard normal draw per step.
#[derive(Debug)]
pub struct PathGenerator<'a> {
    process: &'a dyn StochasticProcess1D,
    grid: TimeGrid,
}

impl<'a> PathGenerator<'a> {
    /// Create a new path generator.
    ///
    /// # Arguments
    /// * `process`: the stochastic process to simulate
    /// * `maturity`: total time horizon
    /// * `steps`: number of time steps
    pub fn new(process: &'a dyn StochasticProcess1D, maturity: Time, steps: usize) -> Result<Self> {
        Ok(Self {
            process,
            grid: TimeGrid::uniform(maturity, steps)?,
        })
    }

    /// The simulation grid.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Simulate `paths` trajectories.
    ///
    /// Draws are consumed path by path, step by step, so the same generator
    /// state always yields the same matrix.
    pub fn simulate<R: Rng + ?Sized>(&self, paths: usize, rng: &mut R) -> Result<PathEnsemble> {
        ensure!(paths > 0, "number of paths must be positive");
        let steps = self.grid.steps();
        let dt = self.grid.dt();
        let x0 = self.process.x0();
        let mut values = DMatrix::zeros(paths, steps + 1);

        for p in 0..paths {
            let mut x = x0;
            values[(p, 0)] = x;
            for i in 0..steps {
                let dw: Real = rng.sample(StandardNormal);
                x = self.process.evolve_1d(self.grid.time(i), x, dt, dw);
                values[(p, i + 1)] = x;
            }
            if !x.is_finite() {
                return Err(Error::NumericalDegeneracy(format!(
                    "path {p} reached a non-finite price"
                )));
            }
        }

        Ok(PathEnsemble {
            values,
            grid: self.grid.clone(),
        })
    }
}

/// Grid columns sampled for an Asian average.
///
/// Each time no later than the grid end maps to its nearest column; the
/// result is sorted and free of duplicates. Fails with invalid input when no
/// time falls on the grid.
pub fn averaging_indices(times: &[Time], grid: &TimeGrid) -> Result<Vec<usize>> {
    let mut indices: Vec<usize> = times
        .iter()
        .filter(|&&t| t <= grid.end())
        .map(|&t| grid.nearest_index(t))
        .collect();
    indices.sort_unstable();
    indices.dedup();
    ensure!(
        !indices.is_empty(),
        "no averaging time lies within the horizon {}",
        grid.end()
    );
    Ok(indices)
}

// ─── PathPricer ───────────────────────────────────────────────────────────────

/// A trait for computing the discounted payoff of one path of an ensemble.
pub trait PathPricer: Send + Sync {
    /// Evaluate the discounted payoff of row `path`.
    fn value(&self, ensemble: &PathEnsemble, path: usize) -> Real;
}

/// A European payoff pricer: evaluates `payoff(S_T) * discount`.
#[derive(Debug, Clone)]
pub struct EuropeanPathPricer {
    payoff: PlainVanillaPayoff,
    discount: Real,
}

impl EuropeanPathPricer {
    /// Create a European pricer with payoff and discount factor.
    pub fn new(payoff: PlainVanillaPayoff, discount: Real) -> Self {
        Self { payoff, discount }
    }
}

impl PathPricer for EuropeanPathPricer {
    fn value(&self, ensemble: &PathEnsemble, path: usize) -> Real {
        self.payoff.value(ensemble.terminal(path)) * self.discount
    }
}

/// An arithmetic-average Asian payoff pricer over selected grid columns.
#[derive(Debug, Clone)]
pub struct AsianArithmeticPathPricer {
    payoff: PlainVanillaPayoff,
    discount: Real,
    indices: Vec<usize>,
}

impl AsianArithmeticPathPricer {
    /// Create an Asian pricer averaging the columns in `indices` (see
    /// [`averaging_indices`]).
    pub fn new(payoff: PlainVanillaPayoff, discount: Real, indices: Vec<usize>) -> Result<Self> {
        ensure!(!indices.is_empty(), "Asian pricer needs at least one averaging column");
        Ok(Self {
            payoff,
            discount,
            indices,
        })
    }
}

impl PathPricer for AsianArithmeticPathPricer {
    fn value(&self, ensemble: &PathEnsemble, path: usize) -> Real {
        let fixings: Vec<Real> = self.indices.iter().map(|&t| ensemble.value(path, t)).collect();
        // `new` guarantees at least one fixing.
        self.payoff.value_on_average(&fixings).unwrap_or(0.0) * self.discount
    }
}

/// Evaluate `pricer` on every path of `ensemble`.
pub fn simulate_statistics(ensemble: &PathEnsemble, pricer: &dyn PathPricer) -> Statistics {
    let mut stats = Statistics::new();
    stats.add_all((0..ensemble.paths()).map(|p| pricer.value(ensemble, p)));
    stats
}

// ─── Tests ────────────────────────────────────────────────────────────────────
