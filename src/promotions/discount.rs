//! Promo Discounts

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage discounts must be between 1 and 100 percent.
    #[error("percentage discount must be between 1 and 100, got {0}")]
    PercentOutOfRange(u32),

    /// Fixed discounts cannot be negative.
    #[error("fixed discount cannot be negative, got {0}")]
    NegativeAmount(i64),

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// How much a promo code takes off an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromoDiscount {
    /// A share of the order amount (e.g. "10% off")
    Percentage(Percentage),

    /// A fixed amount in minor units, capped at the order amount (e.g. "₹500 off")
    Fixed(i64),
}

impl PromoDiscount {
    /// A percentage discount of `points` percent.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentOutOfRange`] unless `1 <= points <= 100`.
    pub fn percent(points: u32) -> Result<Self, DiscountError> {
        if !(1..=100).contains(&points) {
            return Err(DiscountError::PercentOutOfRange(points));
        }

        Ok(Self::Percentage(Percentage::from(f64::from(points) / 100.0)))
    }

    /// A fixed discount of `amount` minor units.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::NegativeAmount`] if `amount` is below zero.
    pub fn fixed(amount: i64) -> Result<Self, DiscountError> {
        if amount < 0 {
            return Err(DiscountError::NegativeAmount(amount));
        }

        Ok(Self::Fixed(amount))
    }

    /// Amount taken off an order of `order_amount` minor units. Never exceeds the order.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentConversion`] if the percentage cannot be represented
    /// in minor units.
    pub fn amount_off(&self, order_amount: i64) -> Result<i64, DiscountError> {
        let order_amount = order_amount.max(0);

        let amount = match self {
            Self::Percentage(percent) => percent_of_minor(*percent, order_amount)?,
            Self::Fixed(amount) => *amount,
        };

        Ok(amount.clamp(0, order_amount))
    }
}

/// Calculate `percent` of an amount in minor units, rounding half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result does not fit in `i64`.
pub fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, DiscountError> {
    // `Percentage` is a fraction built from an `f64`; trim float noise before scaling.
    let fraction = (percent * Decimal::ONE).round_dp(6);

    let Some(minor) = Decimal::from_i64(minor) else {
        return Err(DiscountError::PercentConversion);
    };

    let Some(applied) = fraction.checked_mul(minor) else {
        return Err(DiscountError::PercentConversion);
    };

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
