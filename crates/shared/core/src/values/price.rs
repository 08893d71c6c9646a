//! Fixed-point order price
//!
//! OUCH prices are unsigned 32-bit integers with 4 implied decimal places
//! (scale = 10_000), so the largest representable price is 429496.7295.
//!
//! Example: 123.45 is sent as 1_234_500

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Implied decimal places
pub const PRICE_DECIMALS: u32 = 4;
pub const PRICE_SCALE: u32 = 10_000;

/// Reasons a decimal price cannot become a [`ScaledPrice`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("price {0} is negative")]
    Negative(Decimal),

    #[error("price {0} does not fit in 32 bits once scaled")]
    Overflow(Decimal),

    #[error("price {0} has more than 4 decimal places")]
    PrecisionLoss(Decimal),
}

/// Price scaled by 10_000, as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ScaledPrice(u32);

impl ScaledPrice {
    pub const ZERO: ScaledPrice = ScaledPrice(0);
    pub const MAX: ScaledPrice = ScaledPrice(u32::MAX);

    /// Create from raw scaled value
    #[inline(always)]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw scaled value
    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Scale a decimal price
    ///
    /// With `strict` set, more than 4 significant decimal places is an
    /// error; otherwise the value is rounded half away from zero.
    /// Trailing zeros never count as lost precision.
    pub fn from_decimal(value: Decimal, strict: bool) -> Result<Self, PriceError> {
        if value < Decimal::ZERO {
            return Err(PriceError::Negative(value));
        }

        let rounded = if value.normalize().scale() > PRICE_DECIMALS {
            if strict {
                return Err(PriceError::PrecisionLoss(value));
            }
            value.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        } else {
            value
        };

        rounded
            .checked_mul(Decimal::from(PRICE_SCALE))
            .and_then(|scaled| scaled.to_u32())
            .map(Self)
            .ok_or(PriceError::Overflow(value))
    }

    /// Decimal value with exactly 4 decimal places
    #[inline]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(i64::from(self.0), PRICE_DECIMALS)
    }
}

impl Default for ScaledPrice {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for ScaledPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int_part = self.0 / PRICE_SCALE;
        let frac_part = self.0 % PRICE_SCALE;
        write!(f, "{}.{:04}", int_part, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_decimal() {
        let p = ScaledPrice::from_decimal(dec!(123.45), true).unwrap();
        assert_eq!(p.raw(), 1_234_500);

        let p = ScaledPrice::from_decimal(dec!(150.2500), true).unwrap();
        assert_eq!(p.raw(), 1_502_500);

        let p = ScaledPrice::from_decimal(dec!(0.0001), true).unwrap();
        assert_eq!(p.raw(), 1);
    }

    #[test]
    fn test_trailing_zeros_are_not_precision_loss() {
        let p = ScaledPrice::from_decimal(dec!(10.250000), true).unwrap();
        assert_eq!(p.raw(), 102_500);
    }

    #[test]
    fn test_strict_rejects_fifth_decimal() {
        assert_eq!(
            ScaledPrice::from_decimal(dec!(1.00005), true),
            Err(PriceError::PrecisionLoss(dec!(1.00005)))
        );
    }

    #[test]
    fn test_lenient_rounds_half_away_from_zero() {
        let p = ScaledPrice::from_decimal(dec!(1.00005), false).unwrap();
        assert_eq!(p.raw(), 10_001);

        let p = ScaledPrice::from_decimal(dec!(1.00004), false).unwrap();
        assert_eq!(p.raw(), 10_000);
    }

    #[test]
    fn test_negative() {
        assert_eq!(
            ScaledPrice::from_decimal(dec!(-0.01), false),
            Err(PriceError::Negative(dec!(-0.01)))
        );
    }

    #[test]
    fn test_upper_bound() {
        let p = ScaledPrice::from_decimal(dec!(429496.7295), true).unwrap();
        assert_eq!(p, ScaledPrice::MAX);

        assert_eq!(
            ScaledPrice::from_decimal(dec!(429496.7296), true),
            Err(PriceError::Overflow(dec!(429496.7296)))
        );
    }

    #[test]
    fn test_to_decimal_has_four_places() {
        let d = ScaledPrice::from_raw(1_234_500).to_decimal();
        assert_eq!(d, dec!(123.45));
        assert_eq!(d.scale(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(ScaledPrice::from_raw(1_234_500).to_string(), "123.4500");
        assert_eq!(ScaledPrice::from_raw(7).to_string(), "0.0007");
    }
}
