//! Cart Session
//!
//! Wraps a [`Cart`] for the lifetime of a shopping session: the cart is rehydrated from a
//! [`SnapshotStore`] when the session opens and written back after every change.

use rusty_money::iso::Currency;
use tracing::{debug, info, warn};

use crate::{
    cart::{Cart, LineItem, LineItemKey, NewLineItem, snapshot::CartSnapshot},
    notifications::{Notification, Notifier},
    promotions::{PromoValidator, PromoVerdict},
    storage::SnapshotStore,
};

/// A cart bound to its store and notifier.
///
/// The in-memory cart is the source of truth. Failed saves are logged and otherwise
/// ignored; the next successful save catches the store up.
#[derive(Debug)]
pub struct CartSession<S, N> {
    cart: Cart,
    store: S,
    notifier: N,
}

impl<S, N> CartSession<S, N>
where
    S: SnapshotStore<CartSnapshot>,
    N: Notifier,
{
    /// Open a session, restoring the last saved cart when there is one.
    ///
    /// Snapshots that cannot be read, or that were saved in a different currency, are
    /// discarded and the session starts with an empty cart.
    pub fn open(store: S, notifier: N, currency: &'static Currency) -> Self {
        let cart = match store.load() {
            Ok(Some(snapshot)) => match Cart::try_from(snapshot) {
                Ok(cart) if cart.currency() == currency => cart,
                Ok(cart) => {
                    warn!(
                        saved = cart.currency().iso_alpha_code,
                        expected = currency.iso_alpha_code,
                        "discarding cart saved in another currency"
                    );
                    Cart::new(currency)
                }
                Err(err) => {
                    warn!(error = %err, "discarding unreadable cart snapshot");
                    Cart::new(currency)
                }
            },
            Ok(None) => Cart::new(currency),
            Err(err) => {
                warn!(error = %err, "failed to load cart snapshot");
                Cart::new(currency)
            }
        };

        debug!(lines = cart.len(), subtotal = cart.subtotal(), "cart session opened");

        Self {
            cart,
            store,
            notifier,
        }
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add `quantity` of an item. See [`Cart::add_item`].
    pub fn add_item(&mut self, item: NewLineItem, quantity: u32) -> u32 {
        if quantity == 0 {
            return self.cart.add_item(item, 0);
        }

        let name = item.name.clone();
        let merged = self.cart.add_item(item, quantity);

        self.persist();
        self.notifier
            .notify(Notification::ItemAdded { name, quantity });

        merged
    }

    /// Remove a line. See [`Cart::remove_item`].
    pub fn remove_item(&mut self, key: &LineItemKey) -> Option<LineItem> {
        let removed = self.cart.remove_item(key)?;

        self.persist();
        self.notifier.notify(Notification::ItemRemoved {
            name: removed.name.clone(),
        });

        Some(removed)
    }

    /// Set a line's quantity. See [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, key: &LineItemKey, quantity: i64) -> bool {
        let Some(name) = self.cart.get_item(key).map(|line| line.name.clone()) else {
            return false;
        };

        self.cart.update_quantity(key, quantity);
        self.persist();

        let notification = match self.cart.get_item(key) {
            Some(line) => Notification::QuantityUpdated {
                name,
                quantity: line.quantity,
            },
            None => Notification::ItemRemoved { name },
        };

        self.notifier.notify(notification);

        true
    }

    /// Empty the cart and drop any discount.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
        self.notifier.notify(Notification::CartCleared);
    }

    /// Apply a discount worked out elsewhere. See [`Cart::apply_discount`].
    ///
    /// Shoppers go through [`CartSession::redeem_promo_code`]; this is for discounts the
    /// store grants itself.
    pub fn apply_discount(&mut self, amount: i64, promo_code: Option<String>) {
        self.cart.apply_discount(amount, promo_code);
        self.persist();
    }

    /// Drop the applied discount.
    pub fn remove_discount(&mut self) {
        if !self.cart.discount().is_applied() {
            return;
        }

        self.cart.remove_discount();
        self.persist();
        self.notifier.notify(Notification::DiscountRemoved);
    }

    /// Ask `validator` about `code` against the current subtotal and apply the discount if
    /// it is accepted. Refused codes leave the cart as it was.
    #[tracing::instrument(skip(self, validator))]
    pub fn redeem_promo_code<V>(&mut self, validator: &V, code: &str) -> PromoVerdict
    where
        V: PromoValidator + ?Sized,
    {
        let verdict = validator.validate(code, self.cart.subtotal());

        if verdict.valid {
            info!(discount = verdict.discount_amount, "promo code applied");

            self.cart
                .apply_discount(verdict.discount_amount, Some(code.trim().to_uppercase()));
            self.persist();
            self.notifier.notify(Notification::DiscountApplied {
                message: verdict.message.clone(),
            });
        } else {
            debug!(message = %verdict.message, "promo code refused");

            self.notifier.notify(Notification::PromoRejected {
                message: verdict.message.clone(),
            });
        }

        verdict
    }

    /// Re-run the applied promo code against the current subtotal.
    ///
    /// Removing items does not touch the discount, so a code can end up applied to a cart
    /// it no longer qualifies for. This refreshes the amount, or drops the discount if the
    /// code is now refused. Returns `None` when no promo code is applied.
    pub fn revalidate_discount<V>(&mut self, validator: &V) -> Option<PromoVerdict>
    where
        V: PromoValidator + ?Sized,
    {
        let code = self.cart.discount().promo_code()?.to_string();
        let verdict = validator.validate(&code, self.cart.subtotal());

        if verdict.valid {
            self.cart.apply_discount(verdict.discount_amount, Some(code));
            self.persist();
        } else {
            self.cart.remove_discount();
            self.persist();
            self.notifier.notify(Notification::PromoRejected {
                message: verdict.message.clone(),
            });
        }

        Some(verdict)
    }

    /// Empty the cart after an order has been placed.
    pub(crate) fn complete_order(&mut self, order_id: String) {
        self.cart.clear();
        self.persist();
        self.notifier.notify(Notification::OrderPlaced { order_id });
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&CartSnapshot::from(&self.cart)) {
            warn!(error = %err, "failed to save cart snapshot");
        }
    }
}
