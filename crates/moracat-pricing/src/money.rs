//! Rounding helpers
//!
//! Money is carried unrounded through a calculation and rounded once per
//! output field, so intermediate rounding never compounds.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a currency amount to 2 decimal places (half away from zero).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to a whole currency unit (half away from zero).
pub fn round_whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Scale a countable base quantity and round up to whole units.
pub fn ceil_units(base: u32, multiplier: Decimal) -> u32 {
    (Decimal::from(base) * multiplier)
        .ceil()
        .to_u32()
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(169.377713)), dec!(169.38));
        assert_eq!(round_money(dec!(0.125)), dec!(0.13));
        assert_eq!(round_money(dec!(6.7448)), dec!(6.74));
        assert_eq!(round_money(dec!(-0.125)), dec!(-0.13));
    }

    #[test]
    fn test_round_whole() {
        assert_eq!(round_whole(dec!(685.8)), dec!(686));
        assert_eq!(round_whole(dec!(968.4)), dec!(968));
        assert_eq!(round_whole(dec!(19.5)), dec!(20));
    }

    #[test]
    fn test_ceil_units() {
        assert_eq!(ceil_units(30, dec!(0.75)), 23);
        assert_eq!(ceil_units(30, dec!(2.0)), 60);
        assert_eq!(ceil_units(12, dec!(0.85)), 11);
        assert_eq!(ceil_units(0, dec!(4.0)), 0);
    }
}
