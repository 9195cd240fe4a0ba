//! Order History

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::orders::Order;

/// Orders placed from this storefront, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    /// Record a newly placed order.
    pub fn record(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// Orders, newest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Look up an order by id.
    pub fn find(&self, id: &Uuid) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    /// Number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no orders have been placed.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
