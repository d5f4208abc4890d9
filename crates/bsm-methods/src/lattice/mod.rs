//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`BinomialTree`]: recombining Cox-Ross-Rubinstein tree
//! * [`TimeGrid`]: uniform grid of time points shared by the tree and the
//!   path simulator
//! * [`exercise_mask`]: per-step early-exercise flags resolved from an
//!   [`Exercise`]
//! * [`rollback`]: backward induction under an exercise mask

pub mod binomial_tree;

pub use binomial_tree::BinomialTree;

use bsm_core::{
    ensure, ensure_finite,
    errors::{Error, Result},
    Real, Time,
};
use bsm_instruments::Exercise;

// ─── TimeGrid ─────────────────────────────────────────────────────────────────

/// A uniform grid of time points `0, Δt, …, T`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    end: Time,
    steps: usize,
    dt: Time,
}

impl TimeGrid {
    /// Create a uniform time grid from 0 to `end` with `steps` intervals.
    pub fn uniform(end: Time, steps: usize) -> Result<Self> {
        ensure!(steps > 0, "number of steps must be positive");
        ensure!(
            end.is_finite() && end >= 0.0,
            "grid end must be finite and non-negative, got {end}"
        );
        Ok(Self {
            end,
            steps,
            dt: end / steps as Real,
        })
    }

    /// Number of time points (= steps + 1).
    pub fn size(&self) -> usize {
        self.steps + 1
    }

    /// Number of steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time at index `i`.
    pub fn time(&self, i: usize) -> Time {
        i as Real * self.dt
    }

    /// Time step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Final time.
    pub fn end(&self) -> Time {
        self.end
    }

    /// Index of the grid point closest to `t`, clamped to the grid.
    pub fn nearest_index(&self, t: Time) -> usize {
        if self.dt <= 0.0 || t <= 0.0 {
            return 0;
        }
        ((t / self.dt).round() as usize).min(self.steps)
    }
}

// ─── Exercise masks ───────────────────────────────────────────────────────────

/// Resolve an exercise style into per-step early-exercise flags.
///
/// `mask[i]` is true when the holder may exercise at grid index `i`. The
/// terminal payoff at index `steps` is always paid and does not depend on
/// the mask. A Bermudan time selects the grid point within half a step of
/// it, the later one on a tie; several times landing on one point select it
/// once.
///
/// Asian contracts have no exercise decision and are rejected.
pub fn exercise_mask(exercise: &Exercise, grid: &TimeGrid) -> Result<Vec<bool>> {
    let n = grid.size();
    match exercise {
        Exercise::European => Ok(vec![false; n]),
        Exercise::American => Ok(vec![true; n]),
        Exercise::Bermudan(times) => {
            let mut mask = vec![false; n];
            for &t in times.iter().filter(|&&t| t <= grid.end()) {
                mask[grid.nearest_index(t)] = true;
            }
            Ok(mask)
        }
        Exercise::Asian(_) => Err(Error::InvalidInput(
            "Asian averaging has no early-exercise schedule".into(),
        )),
    }
}

// ─── Backward-induction pricing ───────────────────────────────────────────────

/// Price by backward induction on a binomial tree.
///
/// # Arguments
/// * `tree`: the binomial tree (already constructed)
/// * `payoff`: payoff function `S → value`
/// * `discount`: per-step discount factor, typically `exp(−r · Δt)`
/// * `mask`: early-exercise flags, one per time index (see
///   [`exercise_mask`])
pub fn rollback(
    tree: &BinomialTree,
    payoff: &dyn Fn(Real) -> Real,
    discount: Real,
    mask: &[bool],
) -> Result<Real> {
    let n = tree.steps();
    ensure!(
        mask.len() == n + 1,
        "exercise mask has {} entries for {} time points",
        mask.len(),
        n + 1
    );
    let (pu, pd) = (tree.probability_up(), tree.probability_down());

    // Terminal values at maturity; index i counts down-moves.
    let mut values: Vec<Real> = (0..=n).map(|i| payoff(tree.underlying(n, i))).collect();

    // Roll back through the tree
    for j in (0..n).rev() {
        let exercisable = mask[j];
        for i in 0..=j {
            let hold = discount * (pu * values[i] + pd * values[i + 1]);
            values[i] = if exercisable {
                hold.max(payoff(tree.underlying(j, i)))
            } else {
                hold
            };
        }
    }

    let price = values[0];
    ensure_finite!(price, "lattice produced a non-finite price");
    Ok(price)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
