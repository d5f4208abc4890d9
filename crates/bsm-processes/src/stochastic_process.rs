//! One-factor diffusion interface shared by the lattice and the path
//! simulator.
//!
//! The binomial tree reads the one-step mean and spread around `x0` to size
//! its moves; the path simulator only calls [`StochasticProcess1D::evolve_1d`]
//! with a standard normal shock. Everything else has an Euler default that a
//! process with a closed-form transition overrides.

use bsm_core::{Real, Time};

/// A scalar diffusion `dX = μ(t, X) dt + σ(t, X) dW`.
pub trait StochasticProcess1D: std::fmt::Debug + Send + Sync {
    /// Value at time zero.
    fn x0(&self) -> Real;

    /// `μ(t, x)`.
    fn drift_1d(&self, t: Time, x: Real) -> Real;

    /// `σ(t, x)`.
    fn diffusion_1d(&self, t: Time, x: Real) -> Real;

    /// Conditional mean of `X(t + dt)` given `X(t) = x`.
    fn expectation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        x + self.drift_1d(t, x) * dt
    }

    /// Conditional standard deviation of the increment over `dt`.
    fn std_deviation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        self.variance_1d(t, x, dt).sqrt()
    }

    /// Conditional variance of the increment over `dt`.
    fn variance_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        let sigma = self.diffusion_1d(t, x);
        sigma * sigma * dt
    }

    /// `X(t + dt)` for the standard normal shock `dw`.
    fn evolve_1d(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        self.expectation_1d(t, x, dt) + self.std_deviation_1d(t, x, dt) * dw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Arithmetic Brownian motion, which has no closed-form overrides.
    #[derive(Debug)]
    struct Bachelier {
        mu: Real,
        sigma: Real,
    }

    impl StochasticProcess1D for Bachelier {
        fn x0(&self) -> Real {
            1.0
        }
        fn drift_1d(&self, _t: Time, _x: Real) -> Real {
            self.mu
        }
        fn diffusion_1d(&self, _t: Time, _x: Real) -> Real {
            self.sigma
        }
    }

    #[test]
    fn euler_defaults() {
        let p = Bachelier { mu: 0.5, sigma: 2.0 };
        assert_abs_diff_eq!(p.expectation_1d(0.0, 1.0, 0.25), 1.125, epsilon = 1e-15);
        assert_abs_diff_eq!(p.variance_1d(0.0, 1.0, 0.25), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p.std_deviation_1d(0.0, 1.0, 0.25), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p.evolve_1d(0.0, 1.0, 0.25, -1.5), -0.375, epsilon = 1e-15);
    }
}
