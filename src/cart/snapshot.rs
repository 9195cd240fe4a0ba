//! Cart Snapshots
//!
//! The persisted form of a cart.

use serde::{Deserialize, Serialize};

use crate::{
    cart::{Cart, LineItem, NewLineItem},
    pricing::{PriceError, currency_from_code},
};

/// A cart as written to storage. Derived totals are not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// ISO currency code
    pub currency: String,

    /// Line items
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Applied discount in minor units
    #[serde(default)]
    pub discount_amount: i64,

    /// Applied promo code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,

    /// Whether a discount was applied at all
    #[serde(default)]
    pub discount_applied: bool,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        let discount = cart.discount();

        Self {
            currency: cart.currency().iso_alpha_code.to_string(),
            items: cart.items().to_vec(),
            discount_amount: discount.amount(),
            promo_code: discount.promo_code().map(ToString::to_string),
            discount_applied: discount.is_applied(),
        }
    }
}

impl TryFrom<CartSnapshot> for Cart {
    type Error = PriceError;

    /// Rebuild a cart. Lines that share an identity are merged and empty lines dropped, so
    /// a hand-edited snapshot still yields a consistent cart.
    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        let mut cart = Cart::new(currency_from_code(&snapshot.currency)?);

        for line in snapshot.items {
            let quantity = line.quantity;

            cart.add_item(NewLineItem::from(line), quantity);
        }

        if snapshot.discount_applied || snapshot.discount_amount > 0 {
            cart.apply_discount(snapshot.discount_amount, snapshot.promo_code);
        }

        Ok(cart)
    }
}
