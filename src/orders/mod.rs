//! Orders
//!
//! Checkout turns the cart into an order request, hands it to an [`OrderSubmitter`] and
//! empties the cart once the order is placed.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    cart::{Cart, LineItem, session::CartSession, snapshot::CartSnapshot},
    notifications::Notifier,
    storage::{SnapshotStore, StorageError},
};

pub mod address;
pub mod desk;
pub mod history;

pub use address::{AddressError, AddressForm, ShippingAddress};
pub use desk::LocalOrderDesk;
pub use history::OrderHistory;

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Received, not yet confirmed
    #[default]
    Pending,

    /// Confirmed by the store
    Confirmed,

    /// Handed to the courier
    Shipped,

    /// Received by the shopper
    Delivered,

    /// Cancelled before delivery
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        })
    }
}

/// How the shopper pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card
    Card,

    /// UPI transfer
    Upi,

    /// Net banking
    NetBanking,

    /// Cash on delivery
    CashOnDelivery,
}

/// Errors from submitting an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order backend refused the order.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The order could not be recorded.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The delivery estimate could not be worked out.
    #[error(transparent)]
    Schedule(#[from] jiff::Error),
}

/// Errors from checking out.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing in the cart to order.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The shipping address is incomplete.
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    /// The order could not be placed.
    #[error(transparent)]
    Submission(#[from] OrderError),
}

/// Everything the order backend needs to place an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Ordered lines
    pub items: Vec<LineItem>,

    /// ISO currency code
    pub currency: String,

    /// Subtotal in minor units
    pub subtotal: i64,

    /// Discount in minor units
    pub discount_amount: i64,

    /// Amount payable in minor units
    pub total: i64,

    /// Applied promo code
    pub promo_code: Option<String>,

    /// Delivery address
    pub shipping: ShippingAddress,

    /// Payment method
    pub payment: PaymentMethod,
}

impl OrderRequest {
    /// Capture the cart's current totals.
    pub fn from_cart(cart: &Cart, shipping: ShippingAddress, payment: PaymentMethod) -> Self {
        Self {
            items: cart.items().to_vec(),
            currency: cart.currency().iso_alpha_code.to_string(),
            subtotal: cart.subtotal(),
            discount_amount: cart.discount().amount(),
            total: cart.final_total(),
            promo_code: cart.discount().promo_code().map(ToString::to_string),
            shipping,
            payment,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order id
    pub id: Uuid,

    /// Lifecycle status
    pub status: OrderStatus,

    /// Ordered lines
    pub items: Vec<LineItem>,

    /// ISO currency code
    pub currency: String,

    /// Subtotal in minor units
    pub subtotal: i64,

    /// Discount in minor units
    pub discount_amount: i64,

    /// Amount payable in minor units
    pub total: i64,

    /// Applied promo code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,

    /// Delivery address
    pub shipping: ShippingAddress,

    /// Payment method
    pub payment: PaymentMethod,

    /// When the order was placed
    pub created_at: Timestamp,

    /// When the order should arrive
    pub estimated_delivery: Timestamp,
}

/// Places orders.
pub trait OrderSubmitter {
    /// Place an order for `request`.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the order was not placed.
    fn create_order(&mut self, request: OrderRequest) -> Result<Order, OrderError>;
}

/// Check out the session's cart.
///
/// The cart is emptied only once `submitter` has placed the order; on any error it is
/// left exactly as it was.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart has no lines.
/// - [`CheckoutError::InvalidAddress`]: a required address field is missing.
/// - [`CheckoutError::Submission`]: the submitter did not place the order.
#[tracing::instrument(skip_all, fields(lines = session.cart().len()))]
pub fn checkout<S, N, O>(
    session: &mut CartSession<S, N>,
    submitter: &mut O,
    shipping: AddressForm,
    payment: PaymentMethod,
) -> Result<Order, CheckoutError>
where
    S: SnapshotStore<CartSnapshot>,
    N: Notifier,
    O: OrderSubmitter + ?Sized,
{
    if session.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let shipping = ShippingAddress::new(shipping)?;
    let request = OrderRequest::from_cart(session.cart(), shipping, payment);

    let order = submitter.create_order(request).inspect_err(|err| {
        warn!(error = %err, "order submission failed");
    })?;

    info!(order_id = %order.id, total = order.total, "order placed");

    session.complete_order(order.id.to_string());

    Ok(order)
}
