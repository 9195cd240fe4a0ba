//! Promotions
//!
//! Promo codes a shopper can type at checkout, and the validation contract the cart uses
//! to turn a code into a discount.

use jiff::Timestamp;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::pricing::money;

pub mod book;
pub mod discount;

pub use book::PromoCodeBook;
pub use discount::{DiscountError, PromoDiscount};

/// Errors building a promo code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoError {
    /// Promo codes cannot be blank.
    #[error("promo code cannot be empty")]
    EmptyCode,

    /// Minimum order amounts cannot be negative.
    #[error("minimum order amount cannot be negative, got {0}")]
    NegativeMinimum(i64),

    /// Invalid discount configuration.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// A promo code and the rules for redeeming it.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoCode {
    code: String,
    discount: PromoDiscount,
    min_order_amount: Option<i64>,
    expires_at: Option<Timestamp>,
    active: bool,
    usage_count: u32,
    usage_limit: Option<u32>,
}

impl PromoCode {
    /// Create an active, never-expiring, unlimited code. The code is stored upper-cased.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::EmptyCode`] if `code` is blank.
    pub fn new(code: &str, discount: PromoDiscount) -> Result<Self, PromoError> {
        let code = normalise_code(code);

        if code.is_empty() {
            return Err(PromoError::EmptyCode);
        }

        Ok(Self {
            code,
            discount,
            min_order_amount: None,
            expires_at: None,
            active: true,
            usage_count: 0,
            usage_limit: None,
        })
    }

    /// Require a minimum order amount, in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::NegativeMinimum`] if `amount` is below zero.
    pub fn with_min_order_amount(mut self, amount: i64) -> Result<Self, PromoError> {
        if amount < 0 {
            return Err(PromoError::NegativeMinimum(amount));
        }

        self.min_order_amount = Some(amount);

        Ok(self)
    }

    /// Expire the code after `at`.
    #[must_use]
    pub fn with_expiry(mut self, at: Timestamp) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// Limit the number of redemptions.
    #[must_use]
    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    /// Start from `count` previous redemptions.
    #[must_use]
    pub fn with_usage_count(mut self, count: u32) -> Self {
        self.usage_count = count;
        self
    }

    /// Switch the code on or off.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The upper-cased code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The discount it grants.
    pub fn discount(&self) -> PromoDiscount {
        self.discount
    }

    /// Minimum order amount in minor units, if any.
    pub fn min_order_amount(&self) -> Option<i64> {
        self.min_order_amount
    }

    /// Expiry time, if any.
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    /// Whether the code is switched on.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Redemptions so far.
    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    /// Redemption limit, if any.
    pub fn usage_limit(&self) -> Option<u32> {
        self.usage_limit
    }

    /// Check whether the code can be redeemed against `order_amount` at `now`, returning
    /// the amount it takes off.
    ///
    /// # Errors
    ///
    /// Returns the [`PromoRejection`] for the first rule the code fails.
    pub fn check(&self, order_amount: i64, now: Timestamp) -> Result<i64, PromoRejection> {
        if !self.active {
            return Err(PromoRejection::Inactive);
        }

        if self.expires_at.is_some_and(|expires_at| now > expires_at) {
            return Err(PromoRejection::Expired);
        }

        if self
            .usage_limit
            .is_some_and(|limit| self.usage_count >= limit)
        {
            return Err(PromoRejection::UsageLimitReached);
        }

        match self.min_order_amount {
            Some(minimum) if order_amount < minimum => {
                return Err(PromoRejection::BelowMinimum { minimum });
            }
            _ => {}
        }

        self.discount
            .amount_off(order_amount)
            .map_err(PromoRejection::Discount)
    }

    pub(crate) fn redeem(&mut self) {
        self.usage_count = self.usage_count.saturating_add(1);
    }
}

pub(crate) fn normalise_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Why a promo code was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoRejection {
    /// No such code.
    Unknown,

    /// The code has been switched off.
    Inactive,

    /// The code is past its expiry.
    Expired,

    /// The code has been redeemed as often as allowed.
    UsageLimitReached,

    /// The order is below the code's minimum.
    BelowMinimum {
        /// Minimum order amount in minor units
        minimum: i64,
    },

    /// The discount could not be worked out.
    Discount(DiscountError),
}

impl PromoRejection {
    /// Shopper-facing message, with amounts in `currency`.
    pub fn message(&self, currency: &'static Currency) -> String {
        match self {
            Self::Unknown | Self::Discount(_) => "Invalid promo code".to_string(),
            Self::Inactive => "This promo code is no longer active".to_string(),
            Self::Expired => "This promo code has expired".to_string(),
            Self::UsageLimitReached => "This promo code has reached its usage limit".to_string(),
            Self::BelowMinimum { minimum } => {
                format!("Minimum order amount is {}", money(*minimum, currency))
            }
        }
    }
}

/// The answer to "can this code be used on this order?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoVerdict {
    /// Whether the code was accepted
    pub valid: bool,

    /// Amount off in minor units, zero when refused
    pub discount_amount: i64,

    /// Shopper-facing message
    pub message: String,
}

impl PromoVerdict {
    /// An accepted code saving `discount_amount`.
    pub fn accepted(discount_amount: i64, currency: &'static Currency) -> Self {
        Self {
            valid: true,
            discount_amount,
            message: format!(
                "Promo code applied! You saved {}",
                money(discount_amount, currency)
            ),
        }
    }

    /// A refused code.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            discount_amount: 0,
            message: message.into(),
        }
    }
}

/// Decides whether a promo code can be applied to an order.
///
/// Implementations must turn their own failures (an unreachable backend, say) into a
/// rejected verdict rather than an error.
pub trait PromoValidator {
    /// Validate `code` against an order of `order_amount` minor units.
    fn validate(&self, code: &str, order_amount: i64) -> PromoVerdict;
}
