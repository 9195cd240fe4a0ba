//! Local Order Desk
//!
//! Places orders in-process and keeps the order history in a [`SnapshotStore`].

use jiff::{SignedDuration, Timestamp};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    orders::{Order, OrderError, OrderHistory, OrderRequest, OrderStatus, OrderSubmitter},
    storage::SnapshotStore,
};

/// Confirms every order it is given and records it in the history.
#[derive(Debug)]
pub struct LocalOrderDesk<S> {
    store: S,
    history: OrderHistory,
    delivery_days: u32,
}

impl<S: SnapshotStore<OrderHistory>> LocalOrderDesk<S> {
    /// Open the desk, loading previous orders from `store`. Orders are promised
    /// `delivery_days` after they are placed.
    pub fn new(store: S, delivery_days: u32) -> Self {
        let history = match store.load() {
            Ok(history) => history.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "failed to load order history");
                OrderHistory::default()
            }
        };

        Self {
            store,
            history,
            delivery_days,
        }
    }

    /// Orders placed so far.
    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    fn delivery_window(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.delivery_days) * 24)
    }
}

impl<S: SnapshotStore<OrderHistory>> OrderSubmitter for LocalOrderDesk<S> {
    fn create_order(&mut self, request: OrderRequest) -> Result<Order, OrderError> {
        let created_at = Timestamp::now();
        let estimated_delivery = created_at.checked_add(self.delivery_window())?;

        let order = Order {
            id: Uuid::now_v7(),
            status: OrderStatus::Confirmed,
            items: request.items,
            currency: request.currency,
            subtotal: request.subtotal,
            discount_amount: request.discount_amount,
            total: request.total,
            promo_code: request.promo_code,
            shipping: request.shipping,
            payment: request.payment,
            created_at,
            estimated_delivery,
        };

        let mut history = self.history.clone();
        history.record(order.clone());
        self.store.save(&history)?;
        self.history = history;

        info!(order_id = %order.id, "order confirmed");

        Ok(order)
    }
}
