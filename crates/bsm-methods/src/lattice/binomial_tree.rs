//! Recombining Cox-Ross-Rubinstein binomial tree.
//!
//! `u = exp(σ√Δt)`, `d = 1/u`, `p = (exp((r−q)Δt) − d) / (u − d)`.
//!
//! Node `(j, i)` is the state at step `j` after `i` down-moves, priced as
//! `S₀·u^(j−i)·d^i`. Node prices are recomputed from powers on demand, so
//! no price array is stored.

use bsm_core::{
    ensure,
    errors::{Error, Result},
    Real, Time,
};
use bsm_processes::StochasticProcess1D;

/// A recombining binomial tree approximating a 1-D log-normal process.
///
/// The tree has `steps + 1` time layers, with layer `j` having `j + 1` nodes.
#[derive(Debug, Clone)]
pub struct BinomialTree {
    x0: Real,
    dt: Time,
    steps: usize,
    up: Real,
    down: Real,
    pu: Real,
}

impl BinomialTree {
    /// Cox-Ross-Rubinstein tree (equal jumps, `u·d = 1`).
    ///
    /// The jump size comes from the process standard deviation over one
    /// step and the up-probability from its expected growth, both measured
    /// at the initial value.
    ///
    /// Fails with [`Error::InvalidInput`] for zero steps and with
    /// [`Error::NumericalDegeneracy`] when `u == d` (zero horizon or zero
    /// diffusion) or when `p` falls outside `(0, 1)`.
    pub fn cox_ross_rubinstein(
        process: &dyn StochasticProcess1D,
        end: Time,
        steps: usize,
    ) -> Result<Self> {
        ensure!(steps > 0, "number of steps must be positive");
        ensure!(
            end.is_finite() && end >= 0.0,
            "time to expiration must be finite and non-negative, got {end}"
        );
        let x0 = process.x0();
        let dt = end / steps as Real;
        let dx = process.std_deviation_1d(0.0, x0, dt) / x0;
        let growth = process.expectation_1d(0.0, x0, dt) / x0;

        let up = dx.exp();
        let down = 1.0 / up;
        if !(up > down) {
            return Err(Error::NumericalDegeneracy(format!(
                "up and down factors coincide (u = d = {up}); expiry {end} leaves no lattice"
            )));
        }
        let pu = (growth - down) / (up - down);
        if !(pu > 0.0 && pu < 1.0) {
            return Err(Error::NumericalDegeneracy(format!(
                "risk-neutral probability {pu} outside (0, 1); increase the number of steps"
            )));
        }
        Ok(Self {
            x0,
            dt,
            steps,
            up,
            down,
            pu,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Initial underlying value (spot price).
    pub fn x0(&self) -> Real {
        self.x0
    }

    /// Up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Risk-neutral probability of an up-move.
    pub fn probability_up(&self) -> Real {
        self.pu
    }

    /// Risk-neutral probability of a down-move.
    pub fn probability_down(&self) -> Real {
        1.0 - self.pu
    }

    /// Number of nodes at time step `j`.
    pub fn size(&self, j: usize) -> usize {
        j + 1
    }

    /// Underlying value at step `j` after `i` down-moves.
    pub fn underlying(&self, j: usize, i: usize) -> Real {
        self.x0 * self.up.powi((j - i) as i32) * self.down.powi(i as i32)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
