//! Pricing
//!
//! Amounts are carried as integer minor units of a single ISO currency and only become
//! [`Money`] values when they need to be shown to a shopper.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Errors that can occur while parsing prices and currencies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The currency code is not one the storefront trades in.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The price string could not be parsed.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),
}

/// Resolve an ISO currency code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for codes outside the supported set.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "INR" => Ok(iso::INR),
        "GBP" => Ok(iso::GBP),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        other => Err(PriceError::UnknownCurrency(other.to_string())),
    }
}

/// Wrap an amount in minor units as [`Money`] for display.
pub fn money(minor: i64, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_minor(minor, currency)
}

/// Parse a price string in the form `AMOUNT CURRENCY` (e.g. `"2499.00 INR"`).
///
/// # Errors
///
/// - [`PriceError::InvalidPrice`]: the string is not `AMOUNT CURRENCY` or the amount overflows.
/// - [`PriceError::UnknownCurrency`]: the currency code is not supported.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = currency_from_code(code)?;

    Ok((parse_amount(amount)?, currency))
}

/// Parse a bare decimal amount (e.g. `"12.50"`) into minor units.
///
/// # Errors
///
/// Returns [`PriceError::InvalidPrice`] if the amount is not a decimal or does not fit in `i64`.
pub fn parse_amount(amount: &str) -> Result<i64, PriceError> {
    amount
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidPrice(amount.to_string()))?
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or_else(|| PriceError::InvalidPrice(amount.to_string()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        let (minor, currency) = parse_price("2499.50 INR")?;

        assert_eq!(minor, 249_950);
        assert_eq!(currency, iso::INR);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_missing_currency() {
        let result = parse_price("2.99");

        assert!(matches!(result, Err(PriceError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(PriceError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn currency_codes_are_case_insensitive() -> TestResult {
        assert_eq!(currency_from_code("gbp")?, iso::GBP);

        Ok(())
    }

    #[test]
    fn parse_amount_rounds_to_minor_units() -> TestResult {
        assert_eq!(parse_amount("10.005")?, 1001);
        assert_eq!(parse_amount("0")?, 0);

        Ok(())
    }
}
