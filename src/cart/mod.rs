//! Cart
//!
//! The shopping cart: line items keyed by product, size and colour, a running subtotal
//! and at most one applied promo discount.

use rusty_money::{Money, iso::Currency};

use crate::pricing::money;

pub mod line_item;
pub mod session;
pub mod snapshot;

pub use line_item::{LineItem, LineItemKey, NewLineItem};

/// Discount state of a cart, independent of its items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AppliedDiscount {
    /// No discount
    #[default]
    None,

    /// A discount worked out by the promo validator
    Applied {
        /// Amount off, in minor units
        amount: i64,

        /// The promo code that produced it
        promo_code: Option<String>,
    },
}

impl AppliedDiscount {
    /// Amount off in minor units, zero when no discount is applied.
    pub fn amount(&self) -> i64 {
        match self {
            Self::None => 0,
            Self::Applied { amount, .. } => *amount,
        }
    }

    /// The applied promo code, if any.
    pub fn promo_code(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Applied { promo_code, .. } => promo_code.as_deref(),
        }
    }

    /// Whether a discount is applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: &'static Currency,
    subtotal: i64,
    discount: AppliedDiscount,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
            subtotal: 0,
            discount: AppliedDiscount::None,
        }
    }

    /// Add `quantity` of an item, merging with an existing line of the same identity.
    ///
    /// Adding nothing is a no-op. Returns the line's quantity after the merge.
    pub fn add_item(&mut self, item: NewLineItem, quantity: u32) -> u32 {
        if quantity == 0 {
            return self.quantity_of(&item.key);
        }

        let merged = if let Some(line) = self.line_mut(&item.key) {
            line.quantity = line.quantity.saturating_add(quantity);
            line.quantity
        } else {
            self.items.push(item.into_line(quantity));
            quantity
        };

        self.recalculate();

        merged
    }

    /// Remove a line. Removing a line that is not in the cart does nothing.
    ///
    /// The applied discount is kept as-is, even if the subtotal drops below what the promo
    /// code required.
    pub fn remove_item(&mut self, key: &LineItemKey) -> Option<LineItem> {
        let index = self.items.iter().position(|line| &line.key == key)?;
        let removed = self.items.remove(index);

        self.recalculate();

        Some(removed)
    }

    /// Set a line's quantity. Zero or a negative quantity removes the line.
    ///
    /// Returns `false` if the line is not in the cart.
    pub fn update_quantity(&mut self, key: &LineItemKey, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(key).is_some();
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(line) = self.line_mut(key) else {
            return false;
        };

        line.quantity = quantity;
        self.recalculate();

        true
    }

    /// Empty the cart, dropping any discount.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = AppliedDiscount::None;
        self.recalculate();
    }

    /// Apply a discount, replacing whatever was applied before. Negative amounts count as
    /// zero.
    pub fn apply_discount(&mut self, amount: i64, promo_code: Option<String>) {
        self.discount = AppliedDiscount::Applied {
            amount: amount.max(0),
            promo_code,
        };
    }

    /// Drop the applied discount.
    pub fn remove_discount(&mut self) {
        self.discount = AppliedDiscount::None;
    }

    /// Lines in the cart, in the order they were first added.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line.
    pub fn get_item(&self, key: &LineItemKey) -> Option<&LineItem> {
        self.items.iter().find(|line| &line.key == key)
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of unit price times quantity over every line, in minor units.
    pub fn subtotal(&self) -> i64 {
        self.subtotal
    }

    /// The discount state.
    pub fn discount(&self) -> &AppliedDiscount {
        &self.discount
    }

    /// Subtotal less discount, never below zero, in minor units.
    pub fn final_total(&self) -> i64 {
        self.subtotal.saturating_sub(self.discount.amount()).max(0)
    }

    /// The cart currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Subtotal as money.
    pub fn subtotal_money(&self) -> Money<'static, Currency> {
        money(self.subtotal, self.currency)
    }

    /// Final total as money.
    pub fn final_total_money(&self) -> Money<'static, Currency> {
        money(self.final_total(), self.currency)
    }

    fn quantity_of(&self, key: &LineItemKey) -> u32 {
        self.get_item(key).map_or(0, |line| line.quantity)
    }

    fn line_mut(&mut self, key: &LineItemKey) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|line| &line.key == key)
    }

    fn recalculate(&mut self) {
        self.subtotal = self
            .items
            .iter()
            .fold(0_i64, |total, line| total.saturating_add(line.line_total()));
    }
}
