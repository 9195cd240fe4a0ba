//! Promo Code Book
//!
//! An in-process promo code validator over a fixed set of codes.

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use tracing::debug;

use crate::promotions::{
    PromoCode, PromoRejection, PromoValidator, PromoVerdict, normalise_code,
};

/// Promo codes keyed by their upper-cased code.
#[derive(Debug, Clone)]
pub struct PromoCodeBook {
    currency: &'static Currency,
    codes: FxHashMap<String, PromoCode>,
}

impl PromoCodeBook {
    /// Create an empty book quoting amounts in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            codes: FxHashMap::default(),
        }
    }

    /// Add a code, returning the one it replaced.
    pub fn insert(&mut self, code: PromoCode) -> Option<PromoCode> {
        self.codes.insert(code.code().to_string(), code)
    }

    /// Look up a code, ignoring case and surrounding whitespace.
    pub fn get(&self, code: &str) -> Option<&PromoCode> {
        self.codes.get(&normalise_code(code))
    }

    /// Remove a code.
    pub fn remove(&mut self, code: &str) -> Option<PromoCode> {
        self.codes.remove(&normalise_code(code))
    }

    /// Count a redemption against `code` once an order using it has been placed.
    ///
    /// Returns `false` for unknown codes.
    pub fn record_redemption(&mut self, code: &str) -> bool {
        let Some(promo) = self.codes.get_mut(&normalise_code(code)) else {
            return false;
        };

        promo.redeem();

        true
    }

    /// Validate `code` against `order_amount` as of `now`.
    pub fn validate_at(&self, code: &str, order_amount: i64, now: Timestamp) -> PromoVerdict {
        let checked = self
            .get(code)
            .ok_or(PromoRejection::Unknown)
            .and_then(|promo| promo.check(order_amount, now));

        match checked {
            Ok(amount) => PromoVerdict::accepted(amount, self.currency),
            Err(rejection) => {
                debug!(code, ?rejection, "promo code refused");

                PromoVerdict::rejected(rejection.message(self.currency))
            }
        }
    }

    /// Currency amounts are quoted in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the book holds no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl PromoValidator for PromoCodeBook {
    fn validate(&self, code: &str, order_amount: i64) -> PromoVerdict {
        self.validate_at(code, order_amount, Timestamp::now())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use crate::{pricing::money, promotions::PromoDiscount};

    use super::*;

    fn book() -> TestResult<PromoCodeBook> {
        let mut book = PromoCodeBook::new(INR);

        book.insert(PromoCode::new("WELCOME10", PromoDiscount::percent(10)?)?);
        book.insert(
            PromoCode::new("SAVE500", PromoDiscount::fixed(500_00)?)?
                .with_min_order_amount(2_500_00)?,
        );
        book.insert(PromoCode::new("ONCE", PromoDiscount::fixed(100_00)?)?.with_usage_limit(1));

        Ok(book)
    }

    #[test]
    fn unknown_codes_are_invalid() -> TestResult {
        let verdict = book()?.validate("NOPE", 1_000_00);

        assert_eq!(verdict, PromoVerdict::rejected("Invalid promo code"));

        Ok(())
    }

    #[test]
    fn lookups_ignore_case() -> TestResult {
        let verdict = book()?.validate(" welcome10", 2_500_00);

        assert!(verdict.valid);
        assert_eq!(verdict.discount_amount, 250_00);
        assert_eq!(
            verdict.message,
            format!("Promo code applied! You saved {}", money(250_00, INR))
        );

        Ok(())
    }

    #[test]
    fn minimum_order_is_enforced() -> TestResult {
        let verdict = book()?.validate("SAVE500", 2_000_00);

        assert!(!verdict.valid);
        assert_eq!(verdict.discount_amount, 0);
        assert_eq!(
            verdict.message,
            format!("Minimum order amount is {}", money(2_500_00, INR))
        );

        Ok(())
    }

    #[test]
    fn redemptions_count_towards_the_limit() -> TestResult {
        let mut book = book()?;

        assert!(book.validate("ONCE", 1_000_00).valid);
        assert!(book.record_redemption("once"));

        let verdict = book.validate("ONCE", 1_000_00);

        assert_eq!(
            verdict,
            PromoVerdict::rejected("This promo code has reached its usage limit")
        );
        assert_eq!(book.get("ONCE").map(PromoCode::usage_count), Some(1));

        Ok(())
    }

    #[test]
    fn recording_unknown_codes_does_nothing() -> TestResult {
        let mut book = book()?;

        assert!(!book.record_redemption("NOPE"));
        assert_eq!(book.len(), 3);

        Ok(())
    }

    #[test]
    fn removed_codes_become_invalid() -> TestResult {
        let mut book = book()?;

        assert!(book.remove("welcome10").is_some());
        assert!(!book.validate("WELCOME10", 1_000_00).valid);

        Ok(())
    }
}
