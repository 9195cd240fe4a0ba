//! Notifications
//!
//! Short messages shown to the shopper after a cart change, such as "Added to cart".

use std::{cell::RefCell, fmt, rc::Rc};

use tracing::info;

/// A shopper-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Units of a product were added.
    ItemAdded {
        /// Product name
        name: String,

        /// Units added
        quantity: u32,
    },

    /// A line was removed.
    ItemRemoved {
        /// Product name
        name: String,
    },

    /// A line's quantity was changed.
    QuantityUpdated {
        /// Product name
        name: String,

        /// New quantity
        quantity: u32,
    },

    /// The cart was emptied.
    CartCleared,

    /// A promo code was accepted.
    DiscountApplied {
        /// Message from the validator
        message: String,
    },

    /// The applied discount was dropped.
    DiscountRemoved,

    /// A promo code was refused.
    PromoRejected {
        /// Message from the validator
        message: String,
    },

    /// An order was placed.
    OrderPlaced {
        /// Order id
        order_id: String,
    },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemAdded { name, quantity: 1 } => write!(f, "Added to cart: {name}"),
            Self::ItemAdded { name, quantity } => write!(f, "Added to cart: {name} x{quantity}"),
            Self::ItemRemoved { name } => write!(f, "Removed from cart: {name}"),
            Self::QuantityUpdated { name, quantity } => {
                write!(f, "Updated quantity: {name} x{quantity}")
            }
            Self::CartCleared => f.write_str("Cart cleared"),
            Self::DiscountApplied { message } | Self::PromoRejected { message } => {
                f.write_str(message)
            }
            Self::DiscountRemoved => f.write_str("Promo code removed"),
            Self::OrderPlaced { order_id } => write!(f, "Order placed: {order_id}"),
        }
    }
}

/// Something that can show notifications to the shopper.
pub trait Notifier {
    /// Show `notification`.
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        info!(%notification, "notify");
    }
}

/// Keeps every notification it receives. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    received: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, oldest first.
    pub fn received(&self) -> Vec<Notification> {
        self.received.borrow().clone()
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.received.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.borrow_mut().push(notification);
    }
}
