//! Vanilla payoffs: what a call or a put pays when exercised at a given
//! underlying price, or on the mean of a set of sampled prices.

use bsm_core::Real;
use std::fmt;

/// Right to buy or to sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// Pays `S − K` when positive.
    Call,
    /// Pays `K − S` when positive.
    Put,
}

impl OptionType {
    /// `φ` in `max(φ(S − K), 0)`.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Whether exercising at `price` against `strike` pays strictly positive.
    pub fn is_in_the_money(self, price: Real, strike: Real) -> bool {
        match self {
            OptionType::Call => price > strike,
            OptionType::Put => price < strike,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => f.write_str("Call"),
            OptionType::Put => f.write_str("Put"),
        }
    }
}

/// `max(φ(S − K), 0)` for a fixed strike `K`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    /// Call or put.
    pub option_type: OptionType,
    /// `K`.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Payoff of a call or put struck at `strike`.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }

    /// Amount paid when exercised with the underlying at `price`.
    pub fn value(&self, price: Real) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }

    /// Payoff on the arithmetic mean of `prices`; `None` when empty.
    pub fn value_on_average(&self, prices: &[Real]) -> Option<Real> {
        if prices.is_empty() {
            return None;
        }
        let mean = prices.iter().sum::<Real>() / prices.len() as Real;
        Some(self.value(mean))
    }
}

impl fmt::Display for PlainVanillaPayoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vanilla {} @ {}", self.option_type, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn kinked_at_the_strike() {
        let call = PlainVanillaPayoff::new(OptionType::Call, 100.0);
        let put = PlainVanillaPayoff { option_type: OptionType::Put, ..call };
        assert_eq!([call.value(110.0), call.value(100.0), call.value(90.0)], [10.0, 0.0, 0.0]);
        assert_eq!([put.value(110.0), put.value(100.0), put.value(90.0)], [0.0, 0.0, 10.0]);
    }

    #[test]
    fn average_payoff() {
        let p = PlainVanillaPayoff::new(OptionType::Call, 100.0);
        assert_abs_diff_eq!(p.value_on_average(&[90.0, 110.0, 130.0]).unwrap(), 10.0, epsilon = 1e-12);
        assert!(p.value_on_average(&[]).is_none());
    }

    #[test]
    fn moneyness() {
        assert!(OptionType::Call.is_in_the_money(101.0, 100.0));
        assert!(!OptionType::Call.is_in_the_money(100.0, 100.0));
        assert!(OptionType::Put.is_in_the_money(99.0, 100.0));
        assert_eq!(format!("{}", PlainVanillaPayoff::new(OptionType::Put, 95.0)), "Vanilla Put @ 95");
    }

    proptest! {
        #[test]
        fn payoffs_are_non_negative_and_satisfy_parity(
            strike in 1.0..500.0f64,
            spot in 0.01..1000.0f64,
        ) {
            let call = PlainVanillaPayoff::new(OptionType::Call, strike).value(spot);
            let put = PlainVanillaPayoff::new(OptionType::Put, strike).value(spot);
            prop_assert!(call >= 0.0 && put >= 0.0);
            prop_assert!((call - put - (spot - strike)).abs() < 1e-9);
            prop_assert_eq!(call > 0.0, OptionType::Call.is_in_the_money(spot, strike));
            prop_assert_eq!(put > 0.0, OptionType::Put.is_in_the_money(spot, strike));
        }

        #[test]
        fn constant_average_matches_terminal_payoff(
            strike in 1.0..500.0f64,
            spot in 0.01..1000.0f64,
            n in 1usize..50,
        ) {
            let p = PlainVanillaPayoff::new(OptionType::Put, strike);
            let avg = p.value_on_average(&vec![spot; n]).unwrap();
            prop_assert!((avg - p.value(spot)).abs() < 1e-9);
        }
    }
}
