//! Risk statistics over a series of periodic returns.
//!
//! All functions take plain slices of returns (e.g. daily simple returns of
//! an option position) and reject empty input with
//! [`Error::InvalidInput`]. Moments and quantiles come from `statrs`.

use bsm_core::{
    ensure,
    errors::{Error, Result},
    Real,
};
use statrs::statistics::{Data, OrderStatistics, Statistics as _};

fn require_returns(returns: &[Real]) -> Result<()> {
    ensure!(!returns.is_empty(), "return series must not be empty");
    ensure!(
        returns.iter().all(|r| r.is_finite()),
        "return series contains non-finite values"
    );
    Ok(())
}

fn require_confidence(confidence_level: Real) -> Result<()> {
    ensure!(
        confidence_level > 0.0 && confidence_level < 1.0,
        "confidence level must lie in (0, 1), got {confidence_level}"
    );
    Ok(())
}

/// Historical Value at Risk: the `(1 − confidence_level)` quantile of the
/// returns. A loss is reported as a negative return.
pub fn value_at_risk(returns: &[Real], confidence_level: Real) -> Result<Real> {
    require_returns(returns)?;
    require_confidence(confidence_level)?;
    let mut data = Data::new(returns.to_vec());
    Ok(data.quantile(1.0 - confidence_level))
}

/// Expected shortfall: mean of the returns at or below the
/// [`value_at_risk`] at the same confidence level.
pub fn expected_shortfall(returns: &[Real], confidence_level: Real) -> Result<Real> {
    let var = value_at_risk(returns, confidence_level)?;
    let tail: Vec<Real> = returns.iter().copied().filter(|&r| r <= var).collect();
    if tail.is_empty() {
        // The interpolated quantile can sit below every sample.
        return Ok(returns.iter().copied().fold(Real::INFINITY, Real::min));
    }
    Ok(tail.mean())
}

/// Beta of `asset_returns` against `market_returns`: sample covariance over
/// the sample variance of the market.
pub fn beta(asset_returns: &[Real], market_returns: &[Real]) -> Result<Real> {
    require_returns(asset_returns)?;
    require_returns(market_returns)?;
    ensure!(
        asset_returns.len() == market_returns.len(),
        "return series lengths differ: {} vs {}",
        asset_returns.len(),
        market_returns.len()
    );
    ensure!(asset_returns.len() >= 2, "beta needs at least two observations");

    let market_variance = market_returns.variance();
    if market_variance <= 0.0 {
        return Err(Error::NumericalDegeneracy(
            "market returns have zero variance".into(),
        ));
    }
    Ok(asset_returns.covariance(market_returns) / market_variance)
}

/// Sharpe ratio of the excess returns over `risk_free_rate` (per period),
/// using the population standard deviation.
pub fn sharpe_ratio(returns: &[Real], risk_free_rate: Real) -> Result<Real> {
    require_returns(returns)?;
    let excess: Vec<Real> = returns.iter().map(|r| r - risk_free_rate).collect();
    let sd = excess.iter().population_std_dev();
    if sd <= 0.0 {
        return Err(Error::NumericalDegeneracy(
            "excess returns have zero standard deviation".into(),
        ));
    }
    Ok(excess.iter().mean() / sd)
}

/// Sortino ratio: mean excess return over the downside deviation, the root
/// mean square of the shortfalls below `target_return`.
pub fn sortino_ratio(returns: &[Real], risk_free_rate: Real, target_return: Real) -> Result<Real> {
    require_returns(returns)?;
    let downside: Vec<Real> = returns
        .iter()
        .filter(|&&r| r < target_return)
        .map(|r| r - target_return)
        .collect();
    if downside.is_empty() {
        return Err(Error::NumericalDegeneracy(format!(
            "no returns below the target {target_return}"
        )));
    }
    let downside_risk = downside.quadratic_mean();
    let mean_excess = returns.iter().map(|r| r - risk_free_rate).mean();
    Ok(mean_excess / downside_risk)
}

/// Maximum drawdown of the compounded return path, as a fraction of the
/// running peak (0 = never below a previous peak).
pub fn max_drawdown(returns: &[Real]) -> Result<Real> {
    require_returns(returns)?;
    let mut wealth = 1.0;
    let mut peak = Real::NEG_INFINITY;
    let mut worst: Real = 0.0;
    for r in returns {
        wealth *= 1.0 + r;
        peak = peak.max(wealth);
        if peak > 0.0 {
            worst = worst.max((peak - wealth) / peak);
        }
    }
    Ok(worst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_returns() -> Vec<Real> {
        vec![
            0.012, -0.004, 0.007, -0.021, 0.003, 0.015, -0.009, 0.001, -0.013, 0.008, 0.004,
            -0.002, 0.019, -0.017, 0.006, 0.002, -0.006, 0.011, -0.001, 0.005,
        ]
    }

    #[test]
    fn var_is_a_lower_quantile() {
        let r = sample_returns();
        let var = value_at_risk(&r, 0.95).unwrap();
        let min = r.iter().copied().fold(f64::INFINITY, f64::min);
        assert!(var >= min && var < 0.0, "VaR = {var}");
        let var90 = value_at_risk(&r, 0.90).unwrap();
        assert!(var90 >= var, "lower confidence must give a smaller loss");
    }

    #[test]
    fn expected_shortfall_is_below_var() {
        let r = sample_returns();
        let var = value_at_risk(&r, 0.9).unwrap();
        let es = expected_shortfall(&r, 0.9).unwrap();
        assert!(es <= var, "ES = {es}, VaR = {var}");
    }

    #[test]
    fn beta_of_scaled_series() {
        let market = sample_returns();
        let asset: Vec<Real> = market.iter().map(|m| 0.001 + 2.5 * m).collect();
        assert_abs_diff_eq!(beta(&asset, &market).unwrap(), 2.5, epsilon = 1e-10);
    }

    #[test]
    fn beta_rejects_mismatched_lengths() {
        let err = beta(&[0.1, 0.2, 0.3], &[0.1, 0.2]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn sharpe_matches_hand_computation() {
        let r = [0.01, 0.03];
        // mean 0.02, population sd 0.01
        assert_abs_diff_eq!(sharpe_ratio(&r, 0.0).unwrap(), 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(sharpe_ratio(&r, 0.01).unwrap(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn sortino_uses_downside_only() {
        let r = [0.02, -0.01, 0.03, -0.03];
        // mean 0.0025, downside rms sqrt((0.0001 + 0.0009) / 2)
        let expected = 0.0025 / (0.0005_f64).sqrt();
        assert_abs_diff_eq!(sortino_ratio(&r, 0.0, 0.0).unwrap(), expected, epsilon = 1e-10);
        let err = sortino_ratio(&[0.01, 0.02], 0.0, 0.0).unwrap_err();
        assert!(err.is_numerical_degeneracy());
    }

    #[test]
    fn drawdown_of_known_path() {
        // 1 -> 1.1 -> 0.88 -> 0.968
        let dd = max_drawdown(&[0.1, -0.2, 0.1]).unwrap();
        assert_abs_diff_eq!(dd, 0.2, epsilon = 1e-12);
        assert_eq!(max_drawdown(&[0.01, 0.02]).unwrap(), 0.0);
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(value_at_risk(&[], 0.95).unwrap_err().is_invalid_input());
        assert!(max_drawdown(&[]).unwrap_err().is_invalid_input());
        assert!(value_at_risk(&[0.1], 1.5).unwrap_err().is_invalid_input());
    }
}
