//! Sample statistics of simulated payoffs and risk statistics of return
//! series.

use bsm_core::Real;

/// Risk statistics over realized return series.
pub mod risk;

pub use risk::{
    beta, expected_shortfall, max_drawdown, sharpe_ratio, sortino_ratio, value_at_risk,
};

/// Running mean and variance of Monte Carlo samples.
///
/// Welford's update keeps the sum of squared deviations directly, so a
/// near-constant payoff series does not lose its variance to cancellation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    count: usize,
    mean: Real,
    m2: Real,
}

impl Statistics {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as Real;
        self.m2 += delta * (x - self.mean);
    }

    /// Add every sample of an iterator.
    pub fn add_all<I: IntoIterator<Item = Real>>(&mut self, samples: I) {
        for x in samples {
            self.add(x);
        }
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean, `None` when empty.
    pub fn mean(&self) -> Option<Real> {
        (self.count > 0).then_some(self.mean)
    }

    /// Bessel-corrected sample variance, `None` below two samples.
    pub fn variance(&self) -> Option<Real> {
        (self.count > 1).then(|| self.m2.max(0.0) / (self.count - 1) as Real)
    }

    /// Sample standard deviation.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Standard error of the mean, `std_dev / √n`.
    pub fn error_estimate(&self) -> Option<Real> {
        self.std_dev().map(|s| s / (self.count as Real).sqrt())
    }

    /// Forget every sample.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl FromIterator<Real> for Statistics {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.add_all(iter);
        stats
    }
}
