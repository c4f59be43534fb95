//! Smallest-currency-unit amounts
//!
//! The payment provider takes integer halalas (1 SAR = 100 halalas). All
//! conversions go through [`MinorUnits`] so a SAR amount can never be sent
//! where halalas are expected.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CheckoutError, CheckoutResult};

/// Amount in the smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl MinorUnits {
    /// Minor units per major unit
    pub const PER_MAJOR: i64 = 100;

    /// Wrap a raw provider amount
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Convert a major-unit amount, rounding half away from zero
    pub fn from_amount(amount: Decimal) -> CheckoutResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(CheckoutError::InvalidAmount(amount));
        }

        amount
            .checked_mul(Decimal::from(Self::PER_MAJOR))
            .map(|m| m.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|m| m.to_i64())
            .map(Self)
            .ok_or(CheckoutError::InvalidAmount(amount))
    }

    /// Raw value
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Back to a major-unit amount
    pub fn to_amount(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
