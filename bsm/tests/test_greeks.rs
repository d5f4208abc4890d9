//! Finite-difference Greeks and implied volatility on top of the engines.

use approx::assert_abs_diff_eq;
use bsm::core::Error;
use bsm::instruments::{MarketData, OptionType, PricingEngine, VanillaOption};
use bsm::pricingengines::{
    default_engine, implied_volatility, AnalyticEuropeanEngine, BinomialEngine,
    FiniteDifferenceGreeks,
};

fn greeks() -> FiniteDifferenceGreeks {
    FiniteDifferenceGreeks::new(1e-3).unwrap()
}

#[test]
fn test_delta_bounds() {
    let m = MarketData::new(0.05, 0.3, 0.03);
    let expiry = 1.5;
    let cap = (-m.dividend_yield * expiry).exp();
    let engines: [&dyn PricingEngine; 2] = [&AnalyticEuropeanEngine, &BinomialEngine::new(300)];
    for engine in engines {
        for strike in [70.0, 90.0, 100.0, 110.0, 140.0] {
            let call = VanillaOption::european(OptionType::Call, strike, expiry, 100.0).unwrap();
            let put = VanillaOption::european(OptionType::Put, strike, expiry, 100.0).unwrap();
            let dc = greeks().delta(engine, &call, &m).unwrap();
            let dp = greeks().delta(engine, &put, &m).unwrap();
            assert!((-1e-9..=cap + 1e-9).contains(&dc), "{engine:?} call K={strike}: {dc}");
            assert!((-cap - 1e-9..=1e-9).contains(&dp), "{engine:?} put K={strike}: {dp}");
        }
    }
}

#[test]
fn test_finite_difference_gamma_matches_closed_form() {
    let m = MarketData::new(0.05, 0.2, 0.01);
    for strike in [90.0, 100.0, 115.0] {
        let option = VanillaOption::european(OptionType::Call, strike, 1.0, 100.0).unwrap();
        let analytic = option.price(&AnalyticEuropeanEngine, &m).unwrap();
        let fd = greeks().calculate(&AnalyticEuropeanEngine, &option, &m).unwrap();
        assert_abs_diff_eq!(fd.gamma, analytic.result("gamma").unwrap(), epsilon = 1e-5);
        assert_abs_diff_eq!(fd.delta, analytic.result("delta").unwrap(), epsilon = 1e-5);
        // Analytic vega and rho are quoted per 1 %, analytic theta per day.
        assert_abs_diff_eq!(fd.vega, analytic.result("vega").unwrap(), epsilon = 1e-4);
        assert_abs_diff_eq!(fd.rho, analytic.result("rho").unwrap(), epsilon = 1e-4);
        assert_abs_diff_eq!(fd.theta / 365.0, analytic.result("theta").unwrap(), epsilon = 1e-3);
    }
}

#[test]
fn test_greeks_leave_inputs_untouched() {
    let m = MarketData::new(0.05, 0.2, 0.0);
    let option = VanillaOption::american(OptionType::Put, 100.0, 1.0, 100.0).unwrap();
    let (before_option, before_market) = (option.clone(), m);
    greeks().calculate(&BinomialEngine::new(100), &option, &m).unwrap();
    assert_eq!(option, before_option);
    assert_eq!(m, before_market);
}

#[test]
fn test_implied_volatility_round_trip_on_lattice() {
    let option = VanillaOption::american(OptionType::Put, 100.0, 1.0, 100.0).unwrap();
    let m = MarketData::new(0.05, 0.3, 0.0);
    let engine = BinomialEngine::new(200);
    let price = engine.npv(&option, &m).unwrap();
    let sigma = implied_volatility(&option, &m.with_volatility(0.2), price, &engine, 1e-10).unwrap();
    assert_abs_diff_eq!(sigma, 0.3, epsilon = 1e-6);
}

#[test]
fn test_implied_volatility_with_default_engine() {
    let option = VanillaOption::european(OptionType::Put, 90.0, 0.5, 100.0).unwrap();
    let m = MarketData::new(0.02, 0.45, 0.0);
    let engine = default_engine(&option);
    let price = engine.npv(&option, &m).unwrap();
    let sigma = implied_volatility(&option, &m, price, engine.as_ref(), 1e-10).unwrap();
    assert_abs_diff_eq!(sigma, 0.45, epsilon = 1e-8);
}

#[test]
fn test_implied_volatility_below_intrinsic_fails() {
    let option = VanillaOption::european(OptionType::Put, 120.0, 1.0, 100.0).unwrap();
    let m = MarketData::new(0.0, 0.2, 0.0);
    // Below the zero-volatility value of 20.
    let err = implied_volatility(&option, &m, 5.0, &AnalyticEuropeanEngine, 1e-8).unwrap_err();
    assert!(matches!(err, Error::ConvergenceFailure(_)), "{err}");
}
